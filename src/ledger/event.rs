use serde::{Deserialize, Serialize};

/// A narrative event waiting in the pending queue.
///
/// Ephemeral: lives only in memory until mined into a block. Events that
/// have not been mined are lost on process exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEvent {
    pub title: String,
    pub narrative: String,
    pub linked_blocks: Vec<u64>,
}
