use std::sync::OnceLock;

use regex::Regex;

/// `<scheme:...>` and `<user@host>` autolinks.
pub struct Autolink;

static URI: OnceLock<Regex> = OnceLock::new();
static EMAIL: OnceLock<Regex> = OnceLock::new();

impl Autolink {
    pub const OPEN: u8 = b'<';

    /// Matches an autolink at the start of `rest`, returning the destination,
    /// the visible text and the byte length consumed.
    pub fn scan(rest: &str) -> Option<(String, String, usize)> {
        let uri = URI.get_or_init(|| {
            Regex::new(r"^<([a-zA-Z][a-zA-Z0-9.+-]{1,31}:[^<>\x00-\x20]*)>").expect("uri autolink regex is valid")
        });
        if let Some(caps) = uri.captures(rest) {
            let url = caps[1].to_string();
            return Some((url.clone(), url, caps[0].len()));
        }
        let email = EMAIL.get_or_init(|| {
            Regex::new(
                r"^<([a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*)>",
            )
            .expect("email autolink regex is valid")
        });
        let caps = email.captures(rest)?;
        let address = caps[1].to_string();
        Some((format!("mailto:{address}"), address, caps[0].len()))
    }
}
