use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Fields shared by every block type.
///
/// `id` is `None` when the API returned a missing or malformed id; such a
/// block still renders but cannot be addressed in a [`super::BlockTree`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: Option<BlockId>,
    pub has_children: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id: Some(id),
            has_children: false,
        }
    }
}
