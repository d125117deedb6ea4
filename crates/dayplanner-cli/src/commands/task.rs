use std::path::PathBuf;

use clap::Subcommand;
use dayplanner_core::PlannerEvent;

use super::{CommandResult, Workspace};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List task templates
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a task template with a random color
    Add {
        /// Task name
        name: String,
        /// Category (defaults to planner.default_category)
        #[arg(long)]
        category: Option<String>,
    },
    /// Rename or recategorize a task; placed blocks follow
    Edit {
        /// Current task name
        name: String,
        /// New name
        #[arg(long = "name")]
        new_name: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a task and every block placed from it
    Delete {
        /// Task name
        name: String,
    },
}

pub fn run(file: Option<PathBuf>, action: TaskAction) -> CommandResult {
    let mut ws = Workspace::open(file)?;
    match action {
        TaskAction::List { json } => {
            let tasks: Vec<_> = ws.planner.tasks().iter().collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for task in tasks {
                    println!("{:<16} {:<14} {}", task.name, task.category, task.color);
                }
            }
            return Ok(());
        }
        TaskAction::Add { name, category } => {
            let category = category.unwrap_or_else(|| ws.config.planner.default_category.clone());
            if !ws.planner.categories().contains(&category) {
                return Err(format!("unknown category: {category}").into());
            }
            let Some(PlannerEvent::TaskAdded { task, .. }) = ws.planner.add_task(&name, &category)
            else {
                return Err(format!("task name is empty or already taken: '{name}'").into());
            };
            println!("added {} ({}, {})", task.name, task.category, task.color);
        }
        TaskAction::Edit {
            name,
            new_name,
            category,
        } => {
            let current = ws
                .planner
                .tasks()
                .find(&name)
                .cloned()
                .ok_or_else(|| format!("unknown task: {name}"))?;
            let new_name = new_name.unwrap_or(current.name);
            let category = category.unwrap_or(current.category);
            if !ws.planner.categories().contains(&category) {
                return Err(format!("unknown category: {category}").into());
            }
            let Some(PlannerEvent::TaskEdited {
                task,
                blocks_updated,
                ..
            }) = ws.planner.edit_task(&name, &new_name, &category)
            else {
                return Err(format!("cannot rename '{name}' to '{new_name}'").into());
            };
            println!(
                "edited {name} -> {} ({}), {blocks_updated} block(s) updated",
                task.name, task.category
            );
        }
        TaskAction::Delete { name } => {
            let Some(PlannerEvent::TaskDeleted { blocks_removed, .. }) =
                ws.planner.delete_task(&name)
            else {
                return Err(format!("unknown task: {name}").into());
            };
            println!("deleted {name}, {blocks_removed} block(s) removed");
        }
    }
    ws.save()
}
