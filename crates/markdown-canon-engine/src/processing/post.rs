use std::fmt;
use std::sync::Arc;

use crate::parsing::blocks::RawNode;

/// Rewrites the raw tree after parsing and before processing.
///
/// Post-processors take the tree by value and hand it back, so each one holds
/// it exclusively while it splices nodes.
pub trait PostProcessor: Send + Sync + fmt::Debug {
    fn process(&self, document: RawNode) -> RawNode;
}

/// Threads `document` through `processors` in order.
pub fn run_all(document: RawNode, processors: &[Arc<dyn PostProcessor>]) -> RawNode {
    processors.iter().fold(document, |document, processor| {
        log::trace!("Running post-processor {processor:?}");
        processor.process(document)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::RawKind;
    use crate::parsing::rope::Span;

    #[derive(Debug)]
    struct AppendBreak;

    impl PostProcessor for AppendBreak {
        fn process(&self, mut document: RawNode) -> RawNode {
            let span = Span::new(document.span.end, document.span.end);
            document.children.push(RawNode::new(RawKind::ThematicBreak, span));
            document
        }
    }

    #[test]
    fn runs_every_processor_in_order() {
        let processors: Vec<Arc<dyn PostProcessor>> = vec![Arc::new(AppendBreak), Arc::new(AppendBreak)];
        let document = run_all(RawNode::new(RawKind::Document, Span::new(0, 0)), &processors);
        assert_eq!(document.children.len(), 2);
    }
}
