use std::path::PathBuf;

use clap::Subcommand;
use dayplanner_core::{PlannerEvent, OTHER_CATEGORY};

use super::{CommandResult, Workspace};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories
    List,
    /// Add a category
    Add {
        /// Category name
        name: String,
    },
    /// Rename a category; tasks and blocks follow
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },
    /// Delete a category; its tasks and blocks move to Other
    Delete {
        /// Category name
        name: String,
    },
}

pub fn run(file: Option<PathBuf>, action: CategoryAction) -> CommandResult {
    let mut ws = Workspace::open(file)?;
    match action {
        CategoryAction::List => {
            for name in ws.planner.categories().iter() {
                println!("{name}");
            }
            return Ok(());
        }
        CategoryAction::Add { name } => {
            if ws.planner.add_category(&name).is_none() {
                return Err(format!("category name is empty or already taken: '{name}'").into());
            }
            println!("added {}", name.trim());
        }
        CategoryAction::Rename { old, new } => {
            if old == OTHER_CATEGORY {
                return Err(format!("{OTHER_CATEGORY} cannot be renamed").into());
            }
            let Some(PlannerEvent::CategoryRenamed {
                new,
                tasks_updated,
                blocks_updated,
                ..
            }) = ws.planner.rename_category(&old, &new)
            else {
                return Err(format!("cannot rename '{old}' to '{new}'").into());
            };
            println!(
                "renamed {old} -> {new}, {tasks_updated} task(s) and {blocks_updated} block(s) updated"
            );
        }
        CategoryAction::Delete { name } => {
            if name == OTHER_CATEGORY {
                return Err(format!("{OTHER_CATEGORY} cannot be deleted").into());
            }
            let Some(PlannerEvent::CategoryDeleted {
                tasks_updated,
                blocks_updated,
                ..
            }) = ws.planner.delete_category(&name)
            else {
                return Err(format!("unknown category: {name}").into());
            };
            println!(
                "deleted {name}, {tasks_updated} task(s) and {blocks_updated} block(s) moved to {OTHER_CATEGORY}"
            );
        }
    }
    ws.save()
}
