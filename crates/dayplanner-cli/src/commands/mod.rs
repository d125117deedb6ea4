pub mod block;
pub mod breakdown;
pub mod category;
pub mod config;
pub mod document;
pub mod grid;
pub mod task;

use std::error::Error;
use std::path::PathBuf;

use dayplanner_core::{format_time_12, Block, Config, Planner, PlannerDocument};
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn Error>>;

/// A planner loaded from its document. Commands apply one change and save.
pub struct Workspace {
    pub config: Config,
    pub path: PathBuf,
    pub planner: Planner,
}

impl Workspace {
    /// Load the document at `file`, or the configured default. A missing
    /// document starts from the built-in presets.
    pub fn open(file: Option<PathBuf>) -> Result<Self, Box<dyn Error>> {
        let config = Config::load_or_default();
        let path = document_path(file, &config);
        let mut planner = Planner::new(config.grid());
        if path.exists() {
            planner.import_document(PlannerDocument::load(&path)?)?;
        } else {
            debug!(path = %path.display(), "no document yet, using presets");
        }
        Ok(Self {
            config,
            path,
            planner,
        })
    }

    pub fn save(&self) -> CommandResult {
        self.planner.export_document().save(&self.path)?;
        Ok(())
    }
}

pub fn document_path(file: Option<PathBuf>, config: &Config) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(&config.planner.default_document))
}

/// `10:00 AM - 10:30 AM`
pub fn time_range(start: i32, duration: i32) -> String {
    format!(
        "{} - {}",
        format_time_12(start),
        format_time_12(start + duration)
    )
}

pub fn describe(block: &Block) -> String {
    format!(
        "{}  {} ({})",
        time_range(block.start, block.duration),
        block.name,
        block.category
    )
}
