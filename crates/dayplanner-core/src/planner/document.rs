//! Planner export/import document.
//!
//! The document is the JSON shape `{categories, tasks, blocks}` written by
//! export and read by import. Each key is optional on import: a present array
//! replaces its collection wholesale, a missing one leaves it alone.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::Planner;
use crate::block::{validate_blocks, Block};
use crate::catalog::{CategorySet, TaskCatalog, TaskTemplate};
use crate::error::{ImportError, Result};
use crate::events::PlannerEvent;
use crate::grid::GridGeometry;

/// File name export uses when the caller does not pick one.
pub const DEFAULT_DOCUMENT_NAME: &str = "time-management-config.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategorySet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskTemplate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
}

impl PlannerDocument {
    /// Serialize the document to a pretty JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document.
    ///
    /// # Errors
    /// Returns [`ImportError::Malformed`] for invalid JSON or a wrong shape.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a document from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Write the document to disk.
    ///
    /// # Errors
    /// Returns an error if the document cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check the blocks, if any, against the timeline invariants.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self, grid: &GridGeometry) -> Result<(), ImportError> {
        match &self.blocks {
            Some(blocks) => validate_blocks(blocks, grid),
            None => Ok(()),
        }
    }
}

impl Planner {
    /// Snapshot all three collections.
    pub fn export_document(&self) -> PlannerDocument {
        PlannerDocument {
            categories: Some(self.categories.clone()),
            tasks: Some(self.tasks.iter().cloned().collect()),
            blocks: Some(self.blocks.as_slice().to_vec()),
        }
    }

    /// Validate, then replace every collection present in `document`.
    ///
    /// Nothing is replaced when validation fails.
    ///
    /// # Errors
    /// Returns the first invariant violation among the document's blocks.
    pub fn import_document(&mut self, document: PlannerDocument) -> Result<PlannerEvent, ImportError> {
        document.validate(&self.grid)?;
        Ok(self.import_unchecked(document))
    }

    /// Replace every collection present in `document` verbatim, without
    /// checking block invariants.
    pub fn import_unchecked(&mut self, document: PlannerDocument) -> PlannerEvent {
        if let Some(categories) = document.categories {
            self.categories = categories;
        }
        if let Some(tasks) = document.tasks {
            self.tasks = TaskCatalog::new(tasks);
        }
        if let Some(blocks) = document.blocks {
            self.blocks.replace_all(blocks);
        }
        info!(
            categories = self.categories.len(),
            tasks = self.tasks.len(),
            blocks = self.blocks.len(),
            "document imported"
        );
        PlannerEvent::DocumentImported {
            categories: self.categories.len(),
            tasks: self.tasks.len(),
            blocks: self.blocks.len(),
            at: Utc::now(),
        }
    }
}
