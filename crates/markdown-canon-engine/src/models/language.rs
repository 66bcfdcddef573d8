use serde::Serialize;

/// Languages the fence-name lookup knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KnownLanguage {
    Bash,
    C,
    Cpp,
    CSharp,
    Css,
    Diff,
    Dockerfile,
    Go,
    Groovy,
    Html,
    Java,
    JavaScript,
    Json,
    Kotlin,
    Markdown,
    Php,
    PlainText,
    Properties,
    Python,
    Ruby,
    Rust,
    Scala,
    Sql,
    Swift,
    Toml,
    TypeScript,
    Xml,
    Yaml,
}

struct Entry {
    language: KnownLanguage,
    id: &'static str,
    display_name: &'static str,
    mime_type: &'static str,
    aliases: &'static [&'static str],
}

const TABLE: &[Entry] = &[
    Entry { language: KnownLanguage::Bash, id: "bash", display_name: "Shell Script", mime_type: "application/x-sh", aliases: &["sh", "shell", "zsh", "console", "shellscript"] },
    Entry { language: KnownLanguage::C, id: "c", display_name: "C", mime_type: "text/x-c", aliases: &["h"] },
    Entry { language: KnownLanguage::Cpp, id: "cpp", display_name: "C++", mime_type: "text/x-c++src", aliases: &["c++", "cc", "cxx", "hpp"] },
    Entry { language: KnownLanguage::CSharp, id: "csharp", display_name: "C#", mime_type: "text/x-csharp", aliases: &["c#", "cs"] },
    Entry { language: KnownLanguage::Css, id: "css", display_name: "CSS", mime_type: "text/css", aliases: &[] },
    Entry { language: KnownLanguage::Diff, id: "diff", display_name: "Diff", mime_type: "text/x-diff", aliases: &["patch"] },
    Entry { language: KnownLanguage::Dockerfile, id: "dockerfile", display_name: "Dockerfile", mime_type: "text/x-dockerfile", aliases: &["docker"] },
    Entry { language: KnownLanguage::Go, id: "go", display_name: "Go", mime_type: "text/x-go", aliases: &["golang"] },
    Entry { language: KnownLanguage::Groovy, id: "groovy", display_name: "Groovy", mime_type: "text/x-groovy", aliases: &["gradle"] },
    Entry { language: KnownLanguage::Html, id: "html", display_name: "HTML", mime_type: "text/html", aliases: &["htm", "xhtml"] },
    Entry { language: KnownLanguage::Java, id: "java", display_name: "Java", mime_type: "text/x-java", aliases: &[] },
    Entry { language: KnownLanguage::JavaScript, id: "javascript", display_name: "JavaScript", mime_type: "text/javascript", aliases: &["js", "jsx", "mjs", "cjs"] },
    Entry { language: KnownLanguage::Json, id: "json", display_name: "JSON", mime_type: "application/json", aliases: &["jsonc", "json5"] },
    Entry { language: KnownLanguage::Kotlin, id: "kotlin", display_name: "Kotlin", mime_type: "text/x-kotlin", aliases: &["kt", "kts"] },
    Entry { language: KnownLanguage::Markdown, id: "markdown", display_name: "Markdown", mime_type: "text/markdown", aliases: &["md"] },
    Entry { language: KnownLanguage::Php, id: "php", display_name: "PHP", mime_type: "text/x-php", aliases: &[] },
    Entry { language: KnownLanguage::PlainText, id: "text", display_name: "Plain text", mime_type: "text/plain", aliases: &["txt", "plain", "plaintext"] },
    Entry { language: KnownLanguage::Properties, id: "properties", display_name: "Properties", mime_type: "text/x-java-properties", aliases: &["ini", "conf"] },
    Entry { language: KnownLanguage::Python, id: "python", display_name: "Python", mime_type: "text/x-python", aliases: &["py", "py3", "python3"] },
    Entry { language: KnownLanguage::Ruby, id: "ruby", display_name: "Ruby", mime_type: "text/x-ruby", aliases: &["rb"] },
    Entry { language: KnownLanguage::Rust, id: "rust", display_name: "Rust", mime_type: "text/x-rust", aliases: &["rs"] },
    Entry { language: KnownLanguage::Scala, id: "scala", display_name: "Scala", mime_type: "text/x-scala", aliases: &["sc"] },
    Entry { language: KnownLanguage::Sql, id: "sql", display_name: "SQL", mime_type: "application/sql", aliases: &["mysql", "postgresql", "psql"] },
    Entry { language: KnownLanguage::Swift, id: "swift", display_name: "Swift", mime_type: "text/x-swift", aliases: &[] },
    Entry { language: KnownLanguage::Toml, id: "toml", display_name: "TOML", mime_type: "application/toml", aliases: &[] },
    Entry { language: KnownLanguage::TypeScript, id: "typescript", display_name: "TypeScript", mime_type: "application/typescript", aliases: &["ts", "tsx", "mts"] },
    Entry { language: KnownLanguage::Xml, id: "xml", display_name: "XML", mime_type: "application/xml", aliases: &["svg", "xsd", "xsl"] },
    Entry { language: KnownLanguage::Yaml, id: "yaml", display_name: "YAML", mime_type: "application/yaml", aliases: &["yml"] },
];

impl KnownLanguage {
    fn entry(self) -> &'static Entry {
        // Every variant has exactly one row.
        TABLE
            .iter()
            .find(|e| e.language == self)
            .unwrap_or(&TABLE[0])
    }

    /// Canonical fence name, e.g. `kotlin`.
    pub fn id(self) -> &'static str {
        self.entry().id
    }

    pub fn display_name(self) -> &'static str {
        self.entry().display_name
    }

    pub fn mime_type(self) -> &'static str {
        self.entry().mime_type
    }

    /// Case-insensitive lookup by canonical id or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        TABLE
            .iter()
            .find(|e| e.id == name || e.aliases.contains(&name.as_str()))
            .map(|e| e.language)
    }
}

/// The language of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CodeLanguage {
    Known(KnownLanguage),
    /// A name the lookup does not know, kept as written.
    Unknown(String),
}

impl CodeLanguage {
    pub fn from_name(name: &str) -> Self {
        match KnownLanguage::from_name(name) {
            Some(known) => CodeLanguage::Known(known),
            None => CodeLanguage::Unknown(name.trim().to_string()),
        }
    }

    /// Uses the first word of a fence info string; `None` when it is blank.
    pub fn from_info_string(info: &str) -> Option<Self> {
        info.split_whitespace().next().map(Self::from_name)
    }

    /// Canonical id for known languages, the original name otherwise.
    pub fn name(&self) -> &str {
        match self {
            CodeLanguage::Known(known) => known.id(),
            CodeLanguage::Unknown(name) => name,
        }
    }

    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            CodeLanguage::Known(known) => Some(known.mime_type()),
            CodeLanguage::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("kotlin", KnownLanguage::Kotlin)]
    #[case("KT", KnownLanguage::Kotlin)]
    #[case("rs", KnownLanguage::Rust)]
    #[case("yml", KnownLanguage::Yaml)]
    #[case("c++", KnownLanguage::Cpp)]
    #[case("sh", KnownLanguage::Bash)]
    fn known_aliases(#[case] name: &str, #[case] expected: KnownLanguage) {
        assert_eq!(KnownLanguage::from_name(name), Some(expected));
    }

    #[test]
    fn every_language_has_an_entry() {
        for entry in TABLE {
            assert_eq!(entry.language.id(), entry.id);
            assert_eq!(KnownLanguage::from_name(entry.id), Some(entry.language));
        }
    }

    #[test]
    fn info_string_uses_first_word() {
        assert_eq!(
            CodeLanguage::from_info_string("python title=\"x\""),
            Some(CodeLanguage::Known(KnownLanguage::Python))
        );
        assert_eq!(CodeLanguage::from_info_string("   "), None);
        assert_eq!(
            CodeLanguage::from_info_string("brainfuck"),
            Some(CodeLanguage::Unknown("brainfuck".into()))
        );
    }

    #[test]
    fn names_round_trip() {
        let known = CodeLanguage::from_name("py");
        assert_eq!(known.name(), "python");
        assert_eq!(CodeLanguage::from_name(known.name()), known);
        assert_eq!(known.mime_type(), Some("text/x-python"));
        assert_eq!(CodeLanguage::Unknown("zig".into()).mime_type(), None);
    }
}
