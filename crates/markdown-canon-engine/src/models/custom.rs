use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::extensions::ExtensionId;

use super::block::Block;

/// Payload of a normalized custom block.
///
/// Implementations are plain data types owned by their extension; consumers
/// recover them with [`CustomBlock::data`].
pub trait CustomBlockData: fmt::Debug + Send + Sync + 'static {
    /// Short human-readable form, e.g. `Alert(Warning)`.
    fn label(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another payload of any type.
    fn eq_data(&self, other: &dyn CustomBlockData) -> bool;
}

/// A block produced by an extension.
#[derive(Debug, Clone)]
pub struct CustomBlock {
    pub extension: ExtensionId,
    pub data: Arc<dyn CustomBlockData>,
    pub children: Vec<Block>,
}

impl CustomBlock {
    pub fn new(extension: ExtensionId, data: impl CustomBlockData, children: Vec<Block>) -> Self {
        Self {
            extension,
            data: Arc::new(data),
            children,
        }
    }

    /// Downcasts the payload.
    pub fn data<T: 'static>(&self) -> Option<&T> {
        self.data.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for CustomBlock {
    fn eq(&self, other: &Self) -> bool {
        self.extension == other.extension && self.data.eq_data(other.data.as_ref()) && self.children == other.children
    }
}

impl Serialize for CustomBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CustomBlock", 3)?;
        state.serialize_field("extension", &self.extension)?;
        state.serialize_field("label", &self.data.label())?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}
