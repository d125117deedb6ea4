use std::path::PathBuf;

use dayplanner_core::{Config, Planner};

use super::{breakdown, describe, document_path, CommandResult, Workspace};

pub fn init(file: Option<PathBuf>, force: bool) -> CommandResult {
    let config = Config::load_or_default();
    let path = document_path(file, &config);
    if path.exists() && !force {
        return Err(format!(
            "document already exists: {} (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    Planner::new(config.grid()).export_document().save(&path)?;
    println!("created {}", path.display());
    Ok(())
}

pub fn show(file: Option<PathBuf>, json: bool) -> CommandResult {
    let ws = Workspace::open(file)?;
    if json {
        println!("{}", ws.planner.export_document().to_json()?);
        return Ok(());
    }

    let mut blocks: Vec<_> = ws.planner.blocks().iter().collect();
    blocks.sort_by_key(|b| b.start);

    println!("Timeline ({})", ws.path.display());
    if blocks.is_empty() {
        println!("  no blocks planned");
    }
    for block in blocks {
        println!("  {}  {}", describe(block), block.id);
    }
    println!();
    breakdown::print(&ws.planner.breakdown(&ws.config.chart_colors()));
    Ok(())
}
