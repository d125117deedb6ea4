//! The planner: categories, task templates, placed blocks and the drag slot.
//!
//! All mutations are synchronous. Catalog edits walk and rewrite their
//! dependents before returning, and pointer events each make at most one
//! store mutation attempt.
//!
//! ## Usage
//!
//! ```ignore
//! let mut planner = Planner::default();
//! planner.drop_task("Work", 300.0);            // 10:00 AM, 30 min
//! planner.pointer_down(id, PointerTarget::BottomHandle, 315.0);
//! planner.pointer_move(345.0);                 // grow by one slot
//! planner.pointer_up();
//! ```

mod document;
mod drag;

pub use document::{PlannerDocument, DEFAULT_DOCUMENT_NAME};
pub use drag::DragGuard;

use chrono::Utc;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::aggregate::{category_totals, CategoryBreakdown, ChartColors};
use crate::block::{BlockId, BlockStore, MutateOutcome};
use crate::catalog::{CategorySet, TaskCatalog, TaskTemplate, OTHER_CATEGORY};
use crate::events::PlannerEvent;
use crate::grid::GridGeometry;
use crate::palette::pick_color;
use crate::session::{DragSession, Ghost, PointerTarget};

/// Owner of the planner state.
#[derive(Debug, Clone)]
pub struct Planner {
    grid: GridGeometry,
    categories: CategorySet,
    tasks: TaskCatalog,
    blocks: BlockStore,
    session: DragSession,
    /// Guide line while a palette item hovers over the timeline.
    palette_hover: Option<i32>,
    rng: StdRng,
}

impl Planner {
    /// A planner with the default categories and task presets.
    pub fn new(grid: GridGeometry) -> Self {
        Self::with_catalog(grid, CategorySet::default(), TaskCatalog::presets())
    }

    pub fn with_catalog(grid: GridGeometry, categories: CategorySet, tasks: TaskCatalog) -> Self {
        Self {
            grid,
            categories,
            tasks,
            blocks: BlockStore::new(),
            session: DragSession::new(),
            palette_hover: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make color assignment deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn tasks(&self) -> &TaskCatalog {
        &self.tasks
    }

    pub fn blocks(&self) -> &BlockStore {
        &self.blocks
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn ghost(&self) -> Option<Ghost> {
        self.session.ghost()
    }

    /// Minute of the guide line, from the active drag or a palette hover.
    pub fn hover_minute(&self) -> Option<i32> {
        self.session.hover_minute().or(self.palette_hover)
    }

    pub fn category_totals(&self) -> IndexMap<String, i32> {
        category_totals(self.blocks.iter())
    }

    pub fn breakdown(&self, colors: &ChartColors) -> CategoryBreakdown {
        CategoryBreakdown::compute(self.blocks.iter(), colors)
    }

    // ── Blocks ───────────────────────────────────────────────────────

    /// Track a palette item dragged over the timeline.
    pub fn drag_over(&mut self, offset_px: f64) {
        self.palette_hover = Some(self.grid.snap_minutes(offset_px));
    }

    /// Palette drag left the timeline without dropping.
    pub fn drag_cancel(&mut self) {
        self.palette_hover = None;
    }

    /// Drop the template called `task` at a raw pixel offset.
    ///
    /// Unknown templates and occupied slots are ignored.
    pub fn drop_task(&mut self, task: &str, offset_px: f64) -> Option<PlannerEvent> {
        self.palette_hover = None;
        let Some(template) = self.tasks.find(task) else {
            debug!(task, "drop ignored: unknown task");
            return None;
        };
        let block = self.blocks.create(template, offset_px, &self.grid)?;
        info!(id = %block.id, task, start = block.start, "block created");
        Some(PlannerEvent::BlockCreated {
            block,
            at: Utc::now(),
        })
    }

    pub fn delete_block(&mut self, id: BlockId) -> Option<PlannerEvent> {
        let block = self.blocks.delete(id)?;
        info!(%id, "block deleted");
        Some(PlannerEvent::BlockDeleted {
            block,
            at: Utc::now(),
        })
    }

    // ── Pointer gestures ─────────────────────────────────────────────

    /// Start a drag on block `id`.
    ///
    /// Ignored while another session is active, for control buttons, and for
    /// unknown blocks.
    pub fn pointer_down(
        &mut self,
        id: BlockId,
        target: PointerTarget,
        pointer_y: f64,
    ) -> Option<PlannerEvent> {
        if self.session.is_active() {
            debug!(%id, "pointer-down ignored: drag already active");
            return None;
        }
        let mode = target.drag_mode()?;
        let origin = self.blocks.get(id)?.span();
        if !self.session.begin(id, mode, origin, pointer_y) {
            return None;
        }
        self.palette_hover = None;
        Some(PlannerEvent::DragStarted {
            id,
            mode,
            origin,
            at: Utc::now(),
        })
    }

    /// Feed a pointer position to the active drag.
    ///
    /// Returns `BlockUpdated` when the store accepted the proposal,
    /// `ProposalRejected` when it did not, `None` while idle.
    pub fn pointer_move(&mut self, pointer_y: f64) -> Option<PlannerEvent> {
        let proposal = self.session.track(pointer_y, &self.grid)?;
        let at = Utc::now();
        match self.blocks.mutate(proposal.target, |_| proposal.span) {
            MutateOutcome::Applied { before, after } => Some(PlannerEvent::BlockUpdated {
                id: proposal.target,
                mode: proposal.mode,
                before,
                after,
                at,
            }),
            MutateOutcome::Rejected { .. } | MutateOutcome::NotFound => {
                Some(PlannerEvent::ProposalRejected {
                    id: proposal.target,
                    mode: proposal.mode,
                    proposed: proposal.span,
                    at,
                })
            }
        }
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) -> Option<PlannerEvent> {
        self.end_drag()
    }

    /// Pointer left the interactive surface.
    pub fn pointer_leave(&mut self) -> Option<PlannerEvent> {
        self.end_drag()
    }

    /// Start a drag whose release is tied to the returned guard.
    pub fn begin_drag(
        &mut self,
        id: BlockId,
        target: PointerTarget,
        pointer_y: f64,
    ) -> Option<DragGuard<'_>> {
        self.pointer_down(id, target, pointer_y)?;
        Some(DragGuard::new(self))
    }

    fn end_drag(&mut self) -> Option<PlannerEvent> {
        self.palette_hover = None;
        let drag = self.session.end()?;
        debug!(id = %drag.target, mode = ?drag.mode, "drag ended");
        Some(PlannerEvent::DragEnded {
            id: drag.target,
            mode: drag.mode,
            at: Utc::now(),
        })
    }

    // ── Task templates ───────────────────────────────────────────────

    /// Add a template with a random color. The category must exist.
    pub fn add_task(&mut self, name: &str, category: &str) -> Option<PlannerEvent> {
        if !self.categories.contains(category) {
            return None;
        }
        let color = pick_color(&mut self.rng);
        let task = self
            .tasks
            .add(TaskTemplate::new(name, category, color))?
            .clone();
        info!(task = %task.name, "task added");
        Some(PlannerEvent::TaskAdded {
            task,
            at: Utc::now(),
        })
    }

    /// Rename/recategorize the template `name`, re-roll its color, and
    /// rewrite every block stamped from it.
    pub fn edit_task(&mut self, name: &str, new_name: &str, new_category: &str) -> Option<PlannerEvent> {
        if !self.categories.contains(new_category) {
            return None;
        }
        let color = pick_color(&mut self.rng);
        self.tasks
            .edit(name, TaskTemplate::new(new_name, new_category, color))?;
        let task = self.tasks.find(new_name.trim())?.clone();
        let blocks_updated = self.blocks.cascade_task_rename(name, &task);
        info!(previous = name, task = %task.name, blocks_updated, "task edited");
        Some(PlannerEvent::TaskEdited {
            previous_name: name.to_string(),
            task,
            blocks_updated,
            at: Utc::now(),
        })
    }

    /// Remove the template `name` and every block stamped from it.
    pub fn delete_task(&mut self, name: &str) -> Option<PlannerEvent> {
        let removed = self.tasks.remove(name);
        let blocks_removed = self.blocks.cascade_task_delete(name);
        if removed.is_none() && blocks_removed == 0 {
            return None;
        }
        info!(task = name, blocks_removed, "task deleted");
        Some(PlannerEvent::TaskDeleted {
            name: name.to_string(),
            blocks_removed,
            at: Utc::now(),
        })
    }

    // ── Categories ───────────────────────────────────────────────────

    pub fn add_category(&mut self, name: &str) -> Option<PlannerEvent> {
        if !self.categories.add(name) {
            return None;
        }
        Some(PlannerEvent::CategoryAdded {
            name: name.trim().to_string(),
            at: Utc::now(),
        })
    }

    /// Rename a category and rewrite every task and block that uses it.
    pub fn rename_category(&mut self, old: &str, new: &str) -> Option<PlannerEvent> {
        let new = new.trim();
        if !self.categories.rename(old, new) {
            return None;
        }
        let tasks_updated = self.tasks.retag_category(old, new);
        let blocks_updated = self.blocks.cascade_category_rename(old, new);
        info!(old, new, tasks_updated, blocks_updated, "category renamed");
        Some(PlannerEvent::CategoryRenamed {
            old: old.to_string(),
            new: new.to_string(),
            tasks_updated,
            blocks_updated,
            at: Utc::now(),
        })
    }

    /// Delete a category, moving its tasks and blocks to `Other`.
    pub fn delete_category(&mut self, name: &str) -> Option<PlannerEvent> {
        if !self.categories.remove(name) {
            return None;
        }
        let tasks_updated = self.tasks.retag_category(name, OTHER_CATEGORY);
        let blocks_updated = self.blocks.cascade_category_delete(name);
        info!(category = name, tasks_updated, blocks_updated, "category deleted");
        Some(PlannerEvent::CategoryDeleted {
            name: name.to_string(),
            tasks_updated,
            blocks_updated,
            at: Utc::now(),
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(GridGeometry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Span;
    use crate::session::DragMode;

    fn planner() -> Planner {
        Planner::default().with_seed(42)
    }

    fn created_id(event: Option<PlannerEvent>) -> BlockId {
        match event {
            Some(PlannerEvent::BlockCreated { block, .. }) => block.id,
            other => panic!("Expected BlockCreated, got {other:?}"),
        }
    }

    #[test]
    fn drop_unknown_task_is_ignored() {
        let mut p = planner();
        assert!(p.drop_task("Nap", 300.0).is_none());
        assert!(p.blocks().is_empty());
    }

    #[test]
    fn drop_clears_palette_hover() {
        let mut p = planner();
        p.drag_over(301.0);
        assert_eq!(p.hover_minute(), Some(600));
        p.drop_task("Work", 301.0);
        assert_eq!(p.hover_minute(), None);
    }

    #[test]
    fn resize_bottom_via_pointer_events() {
        let mut p = planner();
        let id = created_id(p.drop_task("Work", 300.0));

        assert!(matches!(
            p.pointer_down(id, PointerTarget::BottomHandle, 315.0),
            Some(PlannerEvent::DragStarted { mode: DragMode::ResizeBottom, .. })
        ));
        assert!(matches!(p.pointer_move(345.0), Some(PlannerEvent::BlockUpdated { .. })));
        assert_eq!(p.blocks().get(id).unwrap().span(), Span::new(600, 90));
        assert!(matches!(p.pointer_up(), Some(PlannerEvent::DragEnded { .. })));
        assert!(p.ghost().is_none());
        assert!(p.pointer_move(400.0).is_none());
    }

    #[test]
    fn button_press_never_starts_drag() {
        let mut p = planner();
        let id = created_id(p.drop_task("Work", 300.0));
        assert!(p.pointer_down(id, PointerTarget::Button, 300.0).is_none());
        assert!(!p.session().is_active());
    }

    #[test]
    fn pointer_down_during_drag_is_ignored() {
        let mut p = planner();
        let a = created_id(p.drop_task("Work", 0.0));
        let b = created_id(p.drop_task("Sleep", 300.0));
        p.pointer_down(a, PointerTarget::Body, 0.0).unwrap();
        assert!(p.pointer_down(b, PointerTarget::TopHandle, 300.0).is_none());
        assert_eq!(p.session().active().unwrap().target, a);
    }

    #[test]
    fn rejected_move_stalls_block_but_ghost_follows() {
        let mut p = planner();
        let a = created_id(p.drop_task("Work", 0.0));
        created_id(p.drop_task("Sleep", 60.0));

        p.pointer_down(a, PointerTarget::Body, 0.0).unwrap();
        assert!(matches!(p.pointer_move(30.0), Some(PlannerEvent::BlockUpdated { .. })));
        assert_eq!(p.blocks().get(a).unwrap().start, 60);

        // Sleep sits at [120, 150).
        assert!(matches!(p.pointer_move(60.0), Some(PlannerEvent::ProposalRejected { .. })));
        assert_eq!(p.blocks().get(a).unwrap().start, 60);
        assert_eq!(p.ghost().unwrap().proposed, Span::new(120, 30));
    }

    #[test]
    fn pointer_leave_releases_session() {
        let mut p = planner();
        let id = created_id(p.drop_task("Work", 0.0));
        p.pointer_down(id, PointerTarget::TopHandle, 0.0).unwrap();
        assert!(p.pointer_leave().is_some());
        assert!(!p.session().is_active());
        assert!(p.pointer_leave().is_none());
    }

    #[test]
    fn edit_task_rewrites_blocks() {
        let mut p = planner();
        p.drop_task("Work", 0.0);
        p.drop_task("Work", 60.0);
        let event = p.edit_task("Work", "Job", "Productivity").unwrap();
        match event {
            PlannerEvent::TaskEdited { blocks_updated, task, .. } => {
                assert_eq!(blocks_updated, 2);
                assert!(p.blocks().iter().all(|b| b.name == "Job" && b.color == task.color));
            }
            other => panic!("Expected TaskEdited, got {other:?}"),
        }
        assert!(p.tasks().find("Work").is_none());
    }

    #[test]
    fn add_task_requires_known_category() {
        let mut p = planner();
        assert!(p.add_task("Walk", "Nope").is_none());
        assert!(p.add_task("Walk", "Physical").is_some());
        assert!(p.tasks().find("Walk").is_some());
    }

    #[test]
    fn delete_category_moves_dependents_to_other() {
        let mut p = planner();
        p.drop_task("Sleep", 0.0);
        let event = p.delete_category("Physical").unwrap();
        assert!(matches!(
            event,
            PlannerEvent::CategoryDeleted { blocks_updated: 1, .. }
        ));
        assert!(!p.categories().contains("Physical"));
        assert_eq!(p.tasks().find("Sleep").unwrap().category, OTHER_CATEGORY);
        assert_eq!(p.blocks().as_slice()[0].category, OTHER_CATEGORY);
        assert!(p.delete_category(OTHER_CATEGORY).is_none());
    }
}
