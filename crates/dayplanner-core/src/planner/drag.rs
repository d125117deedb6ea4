//! Scoped drag sessions.

use super::Planner;
use crate::events::PlannerEvent;

/// Holds the planner's drag slot for as long as it lives.
///
/// Dropping the guard on any path (gesture finished, early return, panic
/// unwinding) releases the session exactly like a pointer-up.
#[derive(Debug)]
pub struct DragGuard<'a> {
    planner: &'a mut Planner,
}

impl<'a> DragGuard<'a> {
    pub(super) fn new(planner: &'a mut Planner) -> Self {
        Self { planner }
    }

    /// Read-only view of the planner mid-gesture.
    pub fn planner(&self) -> &Planner {
        self.planner
    }

    pub fn pointer_move(&mut self, pointer_y: f64) -> Option<PlannerEvent> {
        self.planner.pointer_move(pointer_y)
    }

    /// Release with a pointer-up and return its event.
    pub fn finish(self) -> Option<PlannerEvent> {
        self.planner.pointer_up()
    }
}

impl Drop for DragGuard<'_> {
    fn drop(&mut self) {
        self.planner.end_drag();
    }
}
