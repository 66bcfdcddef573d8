use std::any::Any;
use std::fmt;

use markdown_canon_engine::CustomBlockData;
use markdown_canon_engine::parsing::blocks::CustomNodeData;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Note,
        AlertKind::Tip,
        AlertKind::Important,
        AlertKind::Warning,
        AlertKind::Caution,
    ];

    /// Case-insensitive lookup of the name inside `[!...]`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Marker name as written in Markdown, e.g. `WARNING`.
    pub fn name(self) -> &'static str {
        match self {
            AlertKind::Note => "NOTE",
            AlertKind::Tip => "TIP",
            AlertKind::Important => "IMPORTANT",
            AlertKind::Warning => "WARNING",
            AlertKind::Caution => "CAUTION",
        }
    }

    /// Plain-text lead-in written before the alert's content.
    pub fn premise(self) -> &'static str {
        match self {
            AlertKind::Caution => "\u{1F6D1} Caution! ",
            AlertKind::Important => "\u{26A0}\u{FE0F} Important! ",
            AlertKind::Note => "\u{2139}\u{FE0F} Note: ",
            AlertKind::Tip => "\u{1F4A1} Tip: ",
            AlertKind::Warning => "\u{26A0}\u{FE0F} Warning: ",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of an alert, in both the raw and the normalized tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
}

impl CustomNodeData for Alert {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl CustomBlockData for Alert {
    fn label(&self) -> String {
        format!("Alert({:?})", self.kind)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_data(&self, other: &dyn CustomBlockData) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("NOTE", Some(AlertKind::Note))]
    #[case("tip", Some(AlertKind::Tip))]
    #[case("Caution", Some(AlertKind::Caution))]
    #[case("DANGER", None)]
    fn kinds_by_name(#[case] name: &str, #[case] expected: Option<AlertKind>) {
        assert_eq!(AlertKind::from_name(name), expected);
    }

    #[test]
    fn payloads_compare_structurally() {
        let warning = Alert {
            kind: AlertKind::Warning,
        };
        assert!(warning.eq_data(&Alert {
            kind: AlertKind::Warning
        }));
        assert!(!warning.eq_data(&Alert { kind: AlertKind::Tip }));
        assert_eq!(warning.label(), "Alert(Warning)");
    }
}
