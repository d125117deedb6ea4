//! Placed blocks on the day timeline.
//!
//! A [`Block`] is a snapshot of a task template stamped onto the timeline at a
//! given start and duration. The [`BlockStore`] owns every placed block and
//! keeps the timeline free of overlaps.

mod store;

pub use store::{validate_blocks, BlockStore, MutateOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::catalog::TaskTemplate;
use crate::grid::Span;

/// Unique, never-reused block identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Allocate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlockId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A placed time interval. Serialized verbatim into planner documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    pub category: String,
    pub color: String,
    /// Minutes from midnight.
    pub start: i32,
    /// Length in minutes.
    pub duration: i32,
}

impl Block {
    /// Stamp a template onto the timeline with a fresh id.
    pub fn from_template(template: &TaskTemplate, span: Span) -> Self {
        Self {
            id: BlockId::new(),
            name: template.name.clone(),
            category: template.category.clone(),
            color: template.color.clone(),
            start: span.start,
            duration: span.duration,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.duration)
    }

    pub fn end(&self) -> i32 {
        self.span().end()
    }

    fn set_span(&mut self, span: Span) {
        self.start = span.start;
        self.duration = span.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_ids_are_unique() {
        assert_ne!(BlockId::new(), BlockId::new());
    }

    #[test]
    fn block_id_parses_its_display_form() {
        let id = BlockId::new();
        let parsed: BlockId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<BlockId>().is_err());
    }

    #[test]
    fn from_template_copies_fields() {
        let template = TaskTemplate::new("Work", "Productivity", "bg-blue-400");
        let block = Block::from_template(&template, Span::new(600, 30));
        assert_eq!(block.name, "Work");
        assert_eq!(block.category, "Productivity");
        assert_eq!(block.color, "bg-blue-400");
        assert_eq!(block.end(), 630);
    }

    #[test]
    fn block_serializes_flat() {
        let template = TaskTemplate::new("Sleep", "Physical", "bg-purple-400");
        let block = Block::from_template(&template, Span::new(0, 480));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["start"], 0);
        assert_eq!(json["duration"], 480);
        assert!(json["id"].is_string());
    }
}
