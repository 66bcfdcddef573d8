use crate::extensions::ExtensionId;

/// Failures surfaced by the processing pipeline.
///
/// Malformed Markdown never produces an error: every construct degrades to a
/// simpler one (unmatched emphasis becomes text, an unresolved reference
/// stays literal). These variants cover structural and programming errors.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("This doesn't look like a Markdown document")]
    NotADocument,

    #[error("Unexpected block in document tree: {kind}")]
    UnexpectedBlock { kind: &'static str },

    #[error("Extension registered twice: {id}")]
    DuplicateExtension { id: ExtensionId },

    #[error("Extension {id} failed: {message}")]
    Extension { id: ExtensionId, message: String },
}
