use std::path::PathBuf;

use dayplanner_core::CategoryBreakdown;

use super::{CommandResult, Workspace};

pub fn run(file: Option<PathBuf>, json: bool) -> CommandResult {
    let ws = Workspace::open(file)?;
    let breakdown = ws.planner.breakdown(&ws.config.chart_colors());
    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print(&breakdown);
    }
    Ok(())
}

pub fn print(breakdown: &CategoryBreakdown) {
    println!("Time per category");
    if breakdown.is_empty() {
        println!("  nothing planned yet");
        return;
    }
    for slice in &breakdown.slices {
        println!(
            "  {:<14} {:>5} min  {:>3}%  {}",
            slice.category, slice.minutes, slice.percent, slice.color
        );
    }
    let total = breakdown.total_minutes;
    println!("  total {}h {:02}m", total / 60, total % 60);
}
