use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};
use crate::catalog::TaskTemplate;
use crate::grid::Span;
use crate::session::DragMode;

/// Every accepted state change in the planner produces an Event.
/// Renderers redraw on them; the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlannerEvent {
    BlockCreated {
        block: Block,
        at: DateTime<Utc>,
    },
    /// A drag proposal was committed to the store.
    BlockUpdated {
        id: BlockId,
        mode: DragMode,
        before: Span,
        after: Span,
        at: DateTime<Utc>,
    },
    /// A drag proposal collided and was dropped. The ghost still shows it.
    ProposalRejected {
        id: BlockId,
        mode: DragMode,
        proposed: Span,
        at: DateTime<Utc>,
    },
    BlockDeleted {
        block: Block,
        at: DateTime<Utc>,
    },
    DragStarted {
        id: BlockId,
        mode: DragMode,
        origin: Span,
        at: DateTime<Utc>,
    },
    DragEnded {
        id: BlockId,
        mode: DragMode,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task: TaskTemplate,
        at: DateTime<Utc>,
    },
    TaskEdited {
        previous_name: String,
        task: TaskTemplate,
        blocks_updated: usize,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        name: String,
        blocks_removed: usize,
        at: DateTime<Utc>,
    },
    CategoryAdded {
        name: String,
        at: DateTime<Utc>,
    },
    CategoryRenamed {
        old: String,
        new: String,
        tasks_updated: usize,
        blocks_updated: usize,
        at: DateTime<Utc>,
    },
    /// Tasks and blocks of the deleted category moved to `Other`.
    CategoryDeleted {
        name: String,
        tasks_updated: usize,
        blocks_updated: usize,
        at: DateTime<Utc>,
    },
    DocumentImported {
        categories: usize,
        tasks: usize,
        blocks: usize,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = PlannerEvent::DragEnded {
            id: BlockId::new(),
            mode: DragMode::ResizeTop,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DragEnded");
        assert_eq!(json["mode"], "resize_top");
    }
}
