use std::path::PathBuf;

use clap::Subcommand;
use dayplanner_core::grid::DEFAULT_DURATION;
use dayplanner_core::{clamp_span, format_time_12, BlockId, PlannerEvent, PointerTarget, Span};

use super::{describe, time_range, CommandResult, Workspace};

#[derive(Subcommand)]
pub enum BlockAction {
    /// List placed blocks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drag a block by its body from one pointer position to another
    Move {
        /// Block ID
        id: BlockId,
        /// Pointer offset at press
        #[arg(allow_hyphen_values = true)]
        from_y: f64,
        /// Pointer offset at release
        #[arg(allow_hyphen_values = true)]
        to_y: f64,
    },
    /// Drag a block's top edge
    ResizeTop {
        /// Block ID
        id: BlockId,
        #[arg(allow_hyphen_values = true)]
        from_y: f64,
        #[arg(allow_hyphen_values = true)]
        to_y: f64,
    },
    /// Drag a block's bottom edge
    ResizeBottom {
        /// Block ID
        id: BlockId,
        #[arg(allow_hyphen_values = true)]
        from_y: f64,
        #[arg(allow_hyphen_values = true)]
        to_y: f64,
    },
    /// Delete a block
    Delete {
        /// Block ID
        id: BlockId,
    },
}

pub fn run(file: Option<PathBuf>, action: BlockAction) -> CommandResult {
    match action {
        BlockAction::List { json } => list(file, json),
        BlockAction::Move { id, from_y, to_y } => drag(file, id, PointerTarget::Body, from_y, to_y),
        BlockAction::ResizeTop { id, from_y, to_y } => {
            drag(file, id, PointerTarget::TopHandle, from_y, to_y)
        }
        BlockAction::ResizeBottom { id, from_y, to_y } => {
            drag(file, id, PointerTarget::BottomHandle, from_y, to_y)
        }
        BlockAction::Delete { id } => {
            let mut ws = Workspace::open(file)?;
            let Some(PlannerEvent::BlockDeleted { block, .. }) = ws.planner.delete_block(id) else {
                return Err(format!("block not found: {id}").into());
            };
            ws.save()?;
            println!("deleted: {}", describe(&block));
            Ok(())
        }
    }
}

/// Palette drop.
pub fn drop_task(file: Option<PathBuf>, task: &str, offset_px: f64) -> CommandResult {
    let mut ws = Workspace::open(file)?;
    if ws.planner.tasks().find(task).is_none() {
        return Err(format!("unknown task: {task}").into());
    }
    let Some(PlannerEvent::BlockCreated { block, .. }) = ws.planner.drop_task(task, offset_px) else {
        let start = ws.planner.grid().snap_minutes(offset_px);
        let slot = clamp_span(Span::new(start, DEFAULT_DURATION));
        return Err(format!("slot at {} is occupied", format_time_12(slot.start)).into());
    };
    ws.save()?;
    println!("created {}: {}", block.id, describe(&block));
    Ok(())
}

fn list(file: Option<PathBuf>, json: bool) -> CommandResult {
    let ws = Workspace::open(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(ws.planner.blocks().as_slice())?);
        return Ok(());
    }
    for block in ws.planner.blocks().iter() {
        println!("{}  {}", block.id, describe(block));
    }
    Ok(())
}

/// One pointer-down / move / up gesture.
fn drag(
    file: Option<PathBuf>,
    id: BlockId,
    target: PointerTarget,
    from_y: f64,
    to_y: f64,
) -> CommandResult {
    let mut ws = Workspace::open(file)?;
    let mut guard = ws
        .planner
        .begin_drag(id, target, from_y)
        .ok_or_else(|| format!("block not found: {id}"))?;
    let event = guard.pointer_move(to_y);
    guard.finish();

    match event {
        Some(PlannerEvent::BlockUpdated { before, after, .. }) => {
            if before == after {
                println!("unchanged: {}", time_range(after.start, after.duration));
                return Ok(());
            }
            ws.save()?;
            println!(
                "{} -> {}",
                time_range(before.start, before.duration),
                time_range(after.start, after.duration)
            );
            Ok(())
        }
        Some(PlannerEvent::ProposalRejected { proposed, .. }) => Err(format!(
            "rejected: start {} duration {} collides with another block",
            proposed.start, proposed.duration
        )
        .into()),
        _ => Ok(()),
    }
}
