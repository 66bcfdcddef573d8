//! Raw HTML patterns shared by HTML blocks and inline HTML.

use std::sync::OnceLock;

use regex::Regex;

const TAG_NAME: &str = "[A-Za-z][A-Za-z0-9-]*";
const ATTRIBUTE_NAME: &str = "[a-zA-Z_:][a-zA-Z0-9_.:-]*";
const ATTRIBUTE_VALUE: &str = r#"(?:[^"'=<>`\x00-\x20]+|'[^']*'|"[^"]*")"#;

pub fn open_tag() -> String {
    format!(r"<{TAG_NAME}(?:\s+{ATTRIBUTE_NAME}(?:\s*=\s*{ATTRIBUTE_VALUE})?)*\s*/?>")
}

pub fn close_tag() -> String {
    format!(r"</{TAG_NAME}\s*>")
}

static INLINE_HTML: OnceLock<Regex> = OnceLock::new();

/// Matches an inline HTML construct at the start of the input.
pub fn inline_html() -> &'static Regex {
    INLINE_HTML.get_or_init(|| {
        let pattern = format!(
            r"^(?:{}|{}|<!-->|<!--->|(?s:<!--.*?-->)|(?s:<\?.*?\?>)|(?s:<![A-Za-z][^>]*>)|(?s:<!\[CDATA\[.*?\]\]>))",
            open_tag(),
            close_tag()
        );
        Regex::new(&pattern).expect("inline html regex is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<a href=\"x\">", true)]
    #[case("<br/>", true)]
    #[case("</div >", true)]
    #[case("<!-- c -->", true)]
    #[case("<?php x ?>", true)]
    #[case("<!DOCTYPE html>", true)]
    #[case("<![CDATA[ x ]]>", true)]
    #[case("<33>", false)]
    #[case("<a h*#ref=\"hi\">", false)]
    fn inline_html_patterns(#[case] input: &str, #[case] matches: bool) {
        assert_eq!(inline_html().is_match(input), matches);
    }
}
