use clap::Subcommand;
use dayplanner_core::{clamp_span, Config, Span};

use super::CommandResult;

#[derive(Subcommand)]
pub enum GridAction {
    /// Snap a pixel offset to minutes
    Snap {
        /// Raw pointer offset
        #[arg(allow_hyphen_values = true)]
        offset_px: f64,
    },
    /// Clamp a start/duration pair into the day
    Clamp {
        /// Start minute
        #[arg(allow_hyphen_values = true)]
        start: i32,
        /// Duration in minutes
        #[arg(allow_hyphen_values = true)]
        duration: i32,
    },
    /// Print the timeline rows
    Labels,
}

pub fn run(action: GridAction) -> CommandResult {
    let grid = Config::load_or_default().grid();
    match action {
        GridAction::Snap { offset_px } => println!("{}", grid.snap_minutes(offset_px)),
        GridAction::Clamp { start, duration } => {
            let span = clamp_span(Span::new(start, duration));
            println!("{} {}", span.start, span.duration);
        }
        GridAction::Labels => {
            for row in grid.slot_labels() {
                println!(
                    "{:>7.1}  {}",
                    grid.minute_to_offset(row.minute),
                    row.label.unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}
