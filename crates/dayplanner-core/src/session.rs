//! Drag session state machine.
//!
//! One session slot exists per planner. A pointer-down on a block claims it,
//! pointer-moves turn the pointer delta into a proposed geometry, and a
//! pointer-up or pointer-leave releases it.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging(Move | ResizeTop | ResizeBottom) -> Idle
//! ```
//!
//! The session never touches the store itself. It hands each proposal to the
//! caller, which validates it through the block store; the ghost keeps the raw
//! proposal whether or not the store accepted it.

use serde::{Deserialize, Serialize};

use crate::block::BlockId;
use crate::grid::{GridGeometry, Span, MIN_DURATION};

/// Gesture kind of an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    Move,
    ResizeTop,
    ResizeBottom,
}

impl DragMode {
    /// Geometry proposed for a snapped minute `delta` from the origin.
    ///
    /// Moving shifts the whole block. Resizing the top edge keeps the bottom
    /// edge fixed; resizing the bottom edge keeps the start fixed.
    pub fn propose(self, origin: Span, delta: i32) -> Span {
        match self {
            Self::Move => Span::new(origin.start.saturating_add(delta), origin.duration),
            Self::ResizeTop => {
                let start = origin.start.saturating_add(delta);
                Span::new(start, origin.end().saturating_sub(start))
            }
            Self::ResizeBottom => Span::new(origin.start, origin.duration.saturating_add(delta)),
        }
    }
}

/// What a pointer-down landed on within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    Body,
    TopHandle,
    BottomHandle,
    /// A control button (e.g. delete). Never starts a drag.
    Button,
}

impl PointerTarget {
    pub fn drag_mode(self) -> Option<DragMode> {
        match self {
            Self::Body => Some(DragMode::Move),
            Self::TopHandle => Some(DragMode::ResizeTop),
            Self::BottomHandle => Some(DragMode::ResizeBottom),
            Self::Button => None,
        }
    }

    /// Pick the effective target when several hit-test at once.
    ///
    /// Buttons swallow the press, edge handles win over the body.
    pub fn resolve(hits: &[PointerTarget]) -> Option<PointerTarget> {
        if hits.contains(&Self::Button) {
            return Some(Self::Button);
        }
        [Self::TopHandle, Self::BottomHandle, Self::Body]
            .into_iter()
            .find(|t| hits.contains(t))
    }
}

/// Non-committed preview of the current proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ghost {
    /// The raw proposal, possibly out of range.
    pub proposed: Span,
}

impl Ghost {
    /// Geometry the preview is drawn with: never above the top of the day
    /// and never shorter than the minimum duration.
    pub fn display_span(&self) -> Span {
        Span::new(
            self.proposed.start.max(0),
            self.proposed.duration.max(MIN_DURATION),
        )
    }
}

/// Data captured when a session starts, plus the live preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDrag {
    pub mode: DragMode,
    pub target: BlockId,
    pub origin: Span,
    pub origin_pointer_y: f64,
    pub ghost: Ghost,
    /// Snapped minute under the pointer, for the guide line.
    pub hover_minute: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// A proposal produced by a pointer-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub target: BlockId,
    pub mode: DragMode,
    pub span: Span,
}

/// The single drag-session slot.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    pub fn ghost(&self) -> Option<Ghost> {
        self.active().map(|d| d.ghost)
    }

    pub fn hover_minute(&self) -> Option<i32> {
        self.active().and_then(|d| d.hover_minute)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Claim the slot. Returns `false`, changing nothing, when a session is
    /// already active.
    pub fn begin(&mut self, target: BlockId, mode: DragMode, origin: Span, pointer_y: f64) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = DragState::Dragging(ActiveDrag {
            mode,
            target,
            origin,
            origin_pointer_y: pointer_y,
            ghost: Ghost { proposed: origin },
            hover_minute: None,
        });
        true
    }

    /// Translate a pointer position into a proposal and update the preview.
    /// `None` while idle.
    pub fn track(&mut self, pointer_y: f64, grid: &GridGeometry) -> Option<Proposal> {
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };
        let delta = grid.snap_minutes(pointer_y - drag.origin_pointer_y);
        let span = drag.mode.propose(drag.origin, delta);
        drag.ghost = Ghost { proposed: span };
        drag.hover_minute = Some(grid.snap_minutes(pointer_y));
        Some(Proposal {
            target: drag.target,
            mode: drag.mode,
            span,
        })
    }

    /// Release the slot, dropping the ghost and guide. Returns the session
    /// that was active, if any.
    pub fn end(&mut self) -> Option<ActiveDrag> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }
}
