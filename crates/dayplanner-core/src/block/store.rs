//! Block storage with the no-overlap invariant.
//!
//! Every geometry change goes through clamp + collision check. A change that
//! would collide leaves the store untouched, so callers observe either the old
//! state or the fully applied new one.

use std::collections::HashSet;

use tracing::debug;

use super::{Block, BlockId};
use crate::catalog::{TaskTemplate, OTHER_CATEGORY};
use crate::error::ImportError;
use crate::grid::{clamp_span, GridGeometry, Span, DEFAULT_DURATION};

/// Result of a geometry mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutateOutcome {
    /// The clamped proposal was committed.
    Applied { before: Span, after: Span },
    /// The clamped proposal collides with another block; nothing changed.
    Rejected { proposed: Span },
    /// No block has the given id.
    NotFound,
}

impl MutateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Owns the placed blocks, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// True if any stored block other than `exclude` intersects `candidate`.
    pub fn overlaps(&self, candidate: Span, exclude: Option<BlockId>) -> bool {
        self.blocks
            .iter()
            .any(|b| Some(b.id) != exclude && b.span().intersects(&candidate))
    }

    // ── Geometry mutations ───────────────────────────────────────────

    /// Stamp `template` at a raw pixel offset.
    ///
    /// The offset is snapped, the default duration applied and the span
    /// clamped. Creation happens at exactly that slot or not at all.
    pub fn create(
        &mut self,
        template: &TaskTemplate,
        raw_offset_px: f64,
        grid: &GridGeometry,
    ) -> Option<Block> {
        self.create_at(template, grid.snap_minutes(raw_offset_px))
    }

    /// Stamp `template` at a minute value with the default duration.
    pub fn create_at(&mut self, template: &TaskTemplate, start: i32) -> Option<Block> {
        let span = clamp_span(Span::new(start, DEFAULT_DURATION));
        if self.overlaps(span, None) {
            debug!(task = %template.name, start = span.start, "drop rejected: slot occupied");
            return None;
        }
        let block = Block::from_template(template, span);
        self.blocks.push(block.clone());
        Some(block)
    }

    /// Apply `transform` to a block's geometry, clamp, and commit if it does
    /// not collide with any other block.
    pub fn mutate<F>(&mut self, id: BlockId, transform: F) -> MutateOutcome
    where
        F: FnOnce(Span) -> Span,
    {
        let Some(index) = self.blocks.iter().position(|b| b.id == id) else {
            return MutateOutcome::NotFound;
        };
        let before = self.blocks[index].span();
        let proposed = clamp_span(transform(before));
        if self.overlaps(proposed, Some(id)) {
            debug!(%id, start = proposed.start, duration = proposed.duration, "mutation rejected: collision");
            return MutateOutcome::Rejected { proposed };
        }
        self.blocks[index].set_span(proposed);
        MutateOutcome::Applied {
            before,
            after: proposed,
        }
    }

    /// Remove a single block.
    pub fn delete(&mut self, id: BlockId) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        Some(self.blocks.remove(index))
    }

    /// Replace every block at once. No validation happens here; see
    /// [`validate_blocks`].
    pub fn replace_all(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
    }

    // ── Cascades ─────────────────────────────────────────────────────
    //
    // Cascades only rewrite labels, never geometry, so no collision check.

    /// Rewrite `old` to `new` on every matching block. Returns the count.
    pub fn cascade_category_rename(&mut self, old: &str, new: &str) -> usize {
        self.rewrite(|b| b.category == old, |b| b.category = new.to_string())
    }

    /// Reassign every block in `old` to the sentinel category.
    pub fn cascade_category_delete(&mut self, old: &str) -> usize {
        self.cascade_category_rename(old, OTHER_CATEGORY)
    }

    /// Copy the edited template's fields onto every block stamped from
    /// `name`.
    pub fn cascade_task_rename(&mut self, name: &str, fields: &TaskTemplate) -> usize {
        self.rewrite(
            |b| b.name == name,
            |b| {
                b.name = fields.name.clone();
                b.category = fields.category.clone();
                b.color = fields.color.clone();
            },
        )
    }

    /// Remove every block stamped from `name`. Returns how many were removed.
    pub fn cascade_task_delete(&mut self, name: &str) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.name != name);
        before - self.blocks.len()
    }

    fn rewrite<P, W>(&mut self, pred: P, mut write: W) -> usize
    where
        P: Fn(&Block) -> bool,
        W: FnMut(&mut Block),
    {
        let mut count = 0;
        for block in self.blocks.iter_mut() {
            if pred(block) {
                write(block);
                count += 1;
            }
        }
        count
    }
}

/// Check an arbitrary block list against the timeline invariants.
///
/// Every block must lie inside the day, be at least the minimum duration,
/// sit on the grid resolution, and no two blocks may share an id or overlap.
pub fn validate_blocks(blocks: &[Block], grid: &GridGeometry) -> Result<(), ImportError> {
    let resolution = grid.resolution();
    let mut seen = HashSet::with_capacity(blocks.len());

    for block in blocks {
        if !seen.insert(block.id) {
            return Err(ImportError::DuplicateId(block.id));
        }
        if !block.span().is_within_day() {
            return Err(invalid(block, "outside the day or shorter than the minimum"));
        }
        if block.start % resolution != 0 || block.duration % resolution != 0 {
            return Err(invalid(block, format!("not aligned to {resolution}-minute slots")));
        }
    }

    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by_key(|b| b.start);
    for pair in sorted.windows(2) {
        if pair[0].span().intersects(&pair[1].span()) {
            return Err(invalid(pair[1], format!("overlaps block {}", pair[0].id)));
        }
    }

    Ok(())
}

fn invalid(block: &Block, reason: impl Into<String>) -> ImportError {
    ImportError::InvalidBlock {
        id: block.id,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work() -> TaskTemplate {
        TaskTemplate::new("Work", "Productivity", "bg-blue-400")
    }

    fn sleep() -> TaskTemplate {
        TaskTemplate::new("Sleep", "Physical", "bg-purple-400")
    }

    fn store_with(spans: &[(i32, i32)]) -> (BlockStore, Vec<BlockId>) {
        let mut store = BlockStore::new();
        let mut ids = Vec::new();
        for &(start, duration) in spans {
            let block = Block::from_template(&work(), Span::new(start, duration));
            ids.push(block.id);
            store.blocks.push(block);
        }
        (store, ids)
    }

    #[test]
    fn create_snaps_offset() {
        let mut store = BlockStore::new();
        let block = store.create(&work(), 300.0, &GridGeometry::default()).unwrap();
        assert_eq!(block.span(), Span::new(600, 30));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_clamps_to_last_slot() {
        let mut store = BlockStore::new();
        let block = store.create(&work(), 5000.0, &GridGeometry::default()).unwrap();
        assert_eq!(block.span(), Span::new(1410, 30));
    }

    #[test]
    fn create_on_occupied_slot_is_rejected() {
        let (mut store, _) = store_with(&[(0, 480)]);
        assert!(store.create_at(&sleep(), 400).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.as_slice()[0].span(), Span::new(0, 480));
    }

    #[test]
    fn create_next_to_existing_block_is_allowed() {
        let (mut store, _) = store_with(&[(0, 480)]);
        assert!(store.create_at(&sleep(), 480).is_some());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn overlaps_respects_exclusion() {
        let (store, ids) = store_with(&[(600, 60)]);
        assert!(store.overlaps(Span::new(630, 30), None));
        assert!(!store.overlaps(Span::new(630, 30), Some(ids[0])));
        assert!(!store.overlaps(Span::new(660, 30), None));
    }

    #[test]
    fn mutate_clamps_negative_start() {
        let (mut store, ids) = store_with(&[(600, 60)]);
        let outcome = store.mutate(ids[0], |s| Span::new(s.start - 650, s.duration));
        assert_eq!(
            outcome,
            MutateOutcome::Applied {
                before: Span::new(600, 60),
                after: Span::new(0, 60),
            }
        );
    }

    #[test]
    fn mutate_clamps_duration_at_day_end() {
        let (mut store, ids) = store_with(&[(1410, 30)]);
        let outcome = store.mutate(ids[0], |s| Span::new(s.start, s.duration + 60));
        assert!(outcome.is_applied());
        assert_eq!(store.get(ids[0]).unwrap().span(), Span::new(1410, 30));
    }

    #[test]
    fn colliding_mutation_leaves_store_unchanged() {
        let (mut store, ids) = store_with(&[(0, 60), (120, 60)]);
        let snapshot = store.as_slice().to_vec();
        let outcome = store.mutate(ids[1], |s| Span::new(s.start - 90, s.duration));
        assert_eq!(
            outcome,
            MutateOutcome::Rejected {
                proposed: Span::new(30, 60)
            }
        );
        assert_eq!(store.as_slice(), snapshot.as_slice());
    }

    #[test]
    fn mutate_unknown_id() {
        let (mut store, _) = store_with(&[(0, 60)]);
        assert_eq!(store.mutate(BlockId::new(), |s| s), MutateOutcome::NotFound);
    }

    #[test]
    fn delete_removes_only_target() {
        let (mut store, ids) = store_with(&[(0, 60), (120, 60)]);
        assert!(store.delete(ids[0]).is_some());
        assert!(store.delete(ids[0]).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.as_slice()[0].id, ids[1]);
    }

    #[test]
    fn category_cascades_rewrite_labels_only() {
        let mut store = BlockStore::new();
        store.create_at(&sleep(), 0).unwrap();
        store.create_at(&work(), 600).unwrap();

        assert_eq!(store.cascade_category_rename("Physical", "Body"), 1);
        assert_eq!(store.as_slice()[0].category, "Body");
        assert_eq!(store.as_slice()[0].span(), Span::new(0, 30));

        assert_eq!(store.cascade_category_delete("Productivity"), 1);
        assert_eq!(store.as_slice()[1].category, OTHER_CATEGORY);
    }

    #[test]
    fn task_cascades() {
        let mut store = BlockStore::new();
        store.create_at(&work(), 0).unwrap();
        store.create_at(&work(), 60).unwrap();
        store.create_at(&sleep(), 120).unwrap();

        let edited = TaskTemplate::new("Deep Work", "Mental", "bg-cyan-400");
        assert_eq!(store.cascade_task_rename("Work", &edited), 2);
        assert!(store.iter().filter(|b| b.name == "Deep Work").all(|b| b.category == "Mental"));

        assert_eq!(store.cascade_task_delete("Deep Work"), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.as_slice()[0].name, "Sleep");
    }

    #[test]
    fn validate_accepts_touching_blocks() {
        let (store, _) = store_with(&[(0, 480), (480, 30)]);
        assert!(validate_blocks(store.as_slice(), &GridGeometry::default()).is_ok());
    }

    #[test]
    fn validate_rejects_overlap_out_of_range_and_misalignment() {
        let grid = GridGeometry::default();
        let (store, _) = store_with(&[(0, 480), (400, 60)]);
        assert!(matches!(
            validate_blocks(store.as_slice(), &grid),
            Err(ImportError::InvalidBlock { .. })
        ));

        let (store, _) = store_with(&[(1430, 30)]);
        assert!(validate_blocks(store.as_slice(), &grid).is_err());

        let (store, _) = store_with(&[(15, 30)]);
        assert!(validate_blocks(store.as_slice(), &grid).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let (store, _) = store_with(&[(0, 30)]);
        let mut blocks = store.as_slice().to_vec();
        let mut dup = blocks[0].clone();
        dup.start = 60;
        blocks.push(dup);
        assert!(matches!(
            validate_blocks(&blocks, &GridGeometry::default()),
            Err(ImportError::DuplicateId(_))
        ));
    }
}
