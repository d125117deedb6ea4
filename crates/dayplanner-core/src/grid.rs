//! Grid math for the single-day timeline.
//!
//! The timeline is a fixed 1440-minute day drawn as a column of slots. Every
//! slot is `slot_height_px` tall and covers `resolution` minutes. Pointer
//! offsets are converted to minutes by rounding to the nearest slot, and block
//! geometry is clamped into the day before it is validated against the store.
//!
//! All functions here are pure and total.

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// Minutes in the planned day.
pub const DAY_MINUTES: i32 = 1440;

/// Shortest block the timeline accepts.
pub const MIN_DURATION: i32 = 30;

/// Duration stamped onto blocks created by a palette drop.
pub const DEFAULT_DURATION: i32 = 30;

/// Default minute granularity of one slot.
pub const RESOLUTION: i32 = 30;

/// Default on-screen height of one slot.
pub const SLOT_HEIGHT_PX: f64 = 15.0;

/// A proposed or committed placement on the day: `[start, start + duration)`.
///
/// Proposals may hold out-of-range values (negative starts, durations past
/// the end of the day); [`clamp_span`] brings them back into the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i32,
    pub duration: i32,
}

impl Span {
    pub fn new(start: i32, duration: i32) -> Self {
        Self { start, duration }
    }

    /// Exclusive end minute.
    pub fn end(&self) -> i32 {
        self.start.saturating_add(self.duration)
    }

    /// Half-open interval intersection. Spans that only touch at an endpoint
    /// do not intersect.
    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// True when the span satisfies the day and minimum-duration bounds.
    pub fn is_within_day(&self) -> bool {
        self.start >= 0 && self.duration >= MIN_DURATION && self.end() <= DAY_MINUTES
    }
}

/// Clamp a span into the day.
///
/// `start` is clamped into `[0, DAY_MINUTES - MIN_DURATION]` first, then
/// `duration` into `[MIN_DURATION, DAY_MINUTES - start]`. The result always
/// lies inside the day; this never rejects.
pub fn clamp_span(span: Span) -> Span {
    let start = span.start.clamp(0, DAY_MINUTES - MIN_DURATION);
    let duration = span.duration.clamp(MIN_DURATION, DAY_MINUTES - start);
    Span { start, duration }
}

/// Clamp a block's geometry into the day, keeping its identity and labels.
pub fn clamp_block(block: &Block) -> Block {
    let span = clamp_span(block.span());
    Block {
        start: span.start,
        duration: span.duration,
        ..block.clone()
    }
}

/// Slot geometry of the timeline.
///
/// Construct through [`GridGeometry::new`] so the slot height and resolution
/// are always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    slot_height_px: f64,
    resolution: i32,
}

impl GridGeometry {
    /// Build a geometry. Returns `None` for non-positive or non-finite values
    /// and for a resolution that does not divide [`MIN_DURATION`].
    ///
    /// Default-duration drops and clamping to `DAY_MINUTES - MIN_DURATION`
    /// only land on slot boundaries when the resolution divides both.
    pub fn new(slot_height_px: f64, resolution: i32) -> Option<Self> {
        if !slot_height_px.is_finite() || slot_height_px <= 0.0 || resolution <= 0 {
            return None;
        }
        if MIN_DURATION % resolution != 0 || DAY_MINUTES % resolution != 0 {
            return None;
        }
        Some(Self {
            slot_height_px,
            resolution,
        })
    }

    pub fn slot_height_px(&self) -> f64 {
        self.slot_height_px
    }

    pub fn resolution(&self) -> i32 {
        self.resolution
    }

    /// Number of slots drawn for the day.
    pub fn slots_per_day(&self) -> i32 {
        DAY_MINUTES / self.resolution
    }

    /// Round a raw pixel offset to the nearest slot and return it in minutes.
    ///
    /// Halves round up (toward positive infinity), so `7.5px` snaps to one
    /// slot and `-7.5px` to zero. Non-finite offsets snap to zero.
    pub fn snap_minutes(&self, offset_px: f64) -> i32 {
        let limit = f64::from(i32::MAX / self.resolution);
        let slots = (offset_px / self.slot_height_px + 0.5).floor();
        if slots.is_nan() {
            return 0;
        }
        slots.clamp(-limit, limit) as i32 * self.resolution
    }

    /// Round a minute value to the nearest multiple of the resolution, using
    /// the same half-up rule as [`snap_minutes`](Self::snap_minutes).
    pub fn snap_to_resolution(&self, minutes: i32) -> i32 {
        let half = self.resolution / 2;
        minutes
            .saturating_add(half)
            .div_euclid(self.resolution)
            .saturating_mul(self.resolution)
    }

    /// Pixel offset of a minute from the top of the timeline.
    pub fn minute_to_offset(&self, minute: i32) -> f64 {
        f64::from(minute) / f64::from(self.resolution) * self.slot_height_px
    }

    /// Drawn height of a block. Never less than half a slot.
    pub fn block_height(&self, duration: i32) -> f64 {
        (self.slot_height_px / 2.0).max(self.minute_to_offset(duration))
    }

    /// Row labels for the timeline. Only rows that begin on the hour carry a
    /// label.
    pub fn slot_labels(&self) -> Vec<SlotLabel> {
        (0..self.slots_per_day())
            .map(|i| {
                let minute = i * self.resolution;
                SlotLabel {
                    minute,
                    label: (minute % 60 == 0).then(|| format_time_12(minute)),
                }
            })
            .collect()
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            slot_height_px: SLOT_HEIGHT_PX,
            resolution: RESOLUTION,
        }
    }
}

/// One timeline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLabel {
    pub minute: i32,
    pub label: Option<String>,
}

/// Snap a raw pixel offset with the default geometry.
pub fn snap_minutes(offset_px: f64) -> i32 {
    GridGeometry::default().snap_minutes(offset_px)
}

/// Snap a minute value to the default resolution.
pub fn snap_to_resolution(minutes: i32) -> i32 {
    GridGeometry::default().snap_to_resolution(minutes)
}

/// Format minutes from midnight as a 12-hour clock time, e.g. `10:30 AM`.
///
/// The end of the day (`1440`) wraps to `12:00 AM`.
pub fn format_time_12(minute: i32) -> String {
    let minute = minute.rem_euclid(DAY_MINUTES);
    let hour = minute / 60;
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let ampm = if hour < 12 { "AM" } else { "PM" };
    format!("{display_hour}:{:02} {ampm}", minute % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_slot() {
        assert_eq!(snap_minutes(300.0), 600);
        assert_eq!(snap_minutes(0.0), 0);
        assert_eq!(snap_minutes(7.0), 0);
        assert_eq!(snap_minutes(7.5), 30);
        assert_eq!(snap_minutes(22.0), 30);
        assert_eq!(snap_minutes(23.0), 60);
    }

    #[test]
    fn snap_handles_negative_deltas() {
        assert_eq!(snap_minutes(-7.5), 0);
        assert_eq!(snap_minutes(-8.0), -30);
        assert_eq!(snap_minutes(-325.0), -660);
    }

    #[test]
    fn snap_non_finite_is_bounded() {
        assert_eq!(snap_minutes(f64::NAN), 0);
        assert_eq!(snap_minutes(f64::INFINITY) % RESOLUTION, 0);
        assert_eq!(snap_minutes(f64::NEG_INFINITY) % RESOLUTION, 0);
    }

    #[test]
    fn snap_to_resolution_is_idempotent() {
        for m in [-61, -15, 0, 14, 15, 29, 44, 45, 600, 1439] {
            let once = snap_to_resolution(m);
            assert_eq!(snap_to_resolution(once), once);
            assert_eq!(once % RESOLUTION, 0);
        }
        assert_eq!(snap_to_resolution(14), 0);
        assert_eq!(snap_to_resolution(15), 30);
    }

    #[test]
    fn clamp_pulls_start_into_day() {
        assert_eq!(clamp_span(Span::new(-50, 60)), Span::new(0, 60));
        assert_eq!(clamp_span(Span::new(1430, 30)), Span::new(1410, 30));
    }

    #[test]
    fn clamp_trims_duration_to_day_end() {
        assert_eq!(clamp_span(Span::new(1410, 90)), Span::new(1410, 30));
        assert_eq!(clamp_span(Span::new(1200, 600)), Span::new(1200, 240));
    }

    #[test]
    fn clamp_raises_short_duration() {
        assert_eq!(clamp_span(Span::new(600, 0)), Span::new(600, 30));
        assert_eq!(clamp_span(Span::new(600, -90)), Span::new(600, 30));
    }

    #[test]
    fn clamp_block_keeps_identity() {
        let template = crate::catalog::TaskTemplate::new("Work", "Productivity", "bg-blue-400");
        let block = Block::from_template(&template, Span::new(1410, 90));
        let clamped = clamp_block(&block);
        assert_eq!(clamped.id, block.id);
        assert_eq!(clamped.span(), Span::new(1410, 30));
    }

    #[test]
    fn touching_spans_do_not_intersect() {
        let a = Span::new(0, 480);
        assert!(!a.intersects(&Span::new(480, 30)));
        assert!(a.intersects(&Span::new(400, 60)));
        assert!(a.intersects(&Span::new(0, 1440)));
    }

    #[test]
    fn geometry_rejects_bad_values() {
        assert!(GridGeometry::new(0.0, 30).is_none());
        assert!(GridGeometry::new(15.0, 0).is_none());
        assert!(GridGeometry::new(f64::NAN, 30).is_none());
        assert!(GridGeometry::new(20.0, 15).is_some());
    }

    #[test]
    fn geometry_rejects_resolution_off_the_minimum_duration() {
        for resolution in [45, 60, 7, 120] {
            assert!(GridGeometry::new(15.0, resolution).is_none(), "{resolution}");
        }
        for resolution in [1, 5, 10, 15, 30] {
            let grid = GridGeometry::new(15.0, resolution).unwrap();
            assert_eq!(clamp_span(Span::new(5000, 30)).start % grid.resolution(), 0);
            assert_eq!(DEFAULT_DURATION % grid.resolution(), 0);
        }
    }

    #[test]
    fn custom_geometry_snaps_with_its_own_ratio() {
        let grid = GridGeometry::new(10.0, 15).unwrap();
        assert_eq!(grid.snap_minutes(100.0), 150);
        assert_eq!(grid.slots_per_day(), 96);
    }

    #[test]
    fn offsets_and_heights() {
        let grid = GridGeometry::default();
        assert_eq!(grid.minute_to_offset(600), 300.0);
        assert_eq!(grid.block_height(60), 30.0);
        assert_eq!(grid.block_height(0), 7.5);
    }

    #[test]
    fn slot_labels_mark_hours_only() {
        let labels = GridGeometry::default().slot_labels();
        assert_eq!(labels.len(), 48);
        assert_eq!(labels[0].label.as_deref(), Some("12:00 AM"));
        assert_eq!(labels[1].label, None);
        assert_eq!(labels[26].label.as_deref(), Some("1:00 PM"));
    }

    #[test]
    fn twelve_hour_formatting() {
        assert_eq!(format_time_12(0), "12:00 AM");
        assert_eq!(format_time_12(600), "10:00 AM");
        assert_eq!(format_time_12(630), "10:30 AM");
        assert_eq!(format_time_12(720), "12:00 PM");
        assert_eq!(format_time_12(1410), "11:30 PM");
        assert_eq!(format_time_12(1440), "12:00 AM");
    }
}
