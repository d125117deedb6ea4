//! # Day Planner Core Library
//!
//! This library provides the scheduling engine behind the single-day visual
//! planner: named, categorized tasks are placed on a 24-hour timeline as
//! non-overlapping blocks, then summarized as a per-category breakdown. All
//! operations are available through the standalone CLI; any GUI is a thin
//! layer over the same core.
//!
//! ## Architecture
//!
//! - **Grid**: pointer offsets to snapped minutes, day/duration clamping
//! - **Block Store**: placed blocks under the no-overlap invariant
//! - **Drag Session**: single-slot move/resize state machine
//! - **Aggregate**: category totals and chart slices, recomputed per query
//! - **Planner**: owns categories, templates, blocks and the drag slot, and
//!   runs the rename/delete cascades
//!
//! ## Key Components
//!
//! - [`Planner`]: entry point for every mutation
//! - [`BlockStore`]: collision-checked block storage
//! - [`DragSession`]: pointer gesture state machine
//! - [`Config`]: application configuration management

pub mod aggregate;
pub mod block;
pub mod catalog;
pub mod error;
pub mod events;
pub mod grid;
pub mod palette;
pub mod planner;
pub mod session;
pub mod storage;

pub use aggregate::{category_totals, CategoryBreakdown, ChartColors, ChartSlice};
pub use block::{Block, BlockId, BlockStore, MutateOutcome};
pub use catalog::{CategorySet, TaskCatalog, TaskTemplate, OTHER_CATEGORY};
pub use error::{ConfigError, CoreError, ImportError};
pub use events::PlannerEvent;
pub use grid::{clamp_block, clamp_span, format_time_12, snap_minutes, GridGeometry, Span};
pub use planner::{DragGuard, Planner, PlannerDocument};
pub use session::{DragMode, DragSession, DragState, Ghost, PointerTarget};
pub use storage::Config;
