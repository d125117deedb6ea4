//! Built-in presets and colors.
//!
//! Task colors are utility-class names handed to the renderer verbatim;
//! category colors are hex strings for the breakdown chart.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::TaskTemplate;

/// Categories a fresh planner starts with.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Physical",
    "Spiritual",
    "Social",
    "Mental",
    "Productivity",
    "Other",
];

/// Built-in task presets as `(name, category, color)`.
pub const DEFAULT_TASKS: [(&str, &str, &str); 18] = [
    ("Work", "Productivity", "bg-blue-400"),
    ("Sleep", "Physical", "bg-purple-400"),
    ("Breakfast", "Physical", "bg-yellow-400"),
    ("Lunch", "Physical", "bg-orange-400"),
    ("Dinner", "Physical", "bg-red-400"),
    ("Family Time", "Social", "bg-green-400"),
    ("Prayer", "Spiritual", "bg-indigo-400"),
    ("Meditation", "Spiritual", "bg-teal-400"),
    ("Reading", "Mental", "bg-cyan-400"),
    ("Entertainment", "Social", "bg-pink-400"),
    ("Personal Projects", "Productivity", "bg-violet-400"),
    ("Home Projects", "Productivity", "bg-fuchsia-400"),
    ("Mass", "Spiritual", "bg-rose-400"),
    ("Rosary", "Spiritual", "bg-amber-400"),
    ("Benediction", "Spiritual", "bg-stone-400"),
    ("Prepare for Day", "Physical", "bg-lime-400"),
    ("Prepare for Night", "Physical", "bg-emerald-400"),
    ("Workout", "Physical", "bg-emerald-500"),
];

/// Pool new and edited templates draw their color from.
pub const TASK_COLORS: [&str; 25] = [
    "bg-blue-400",
    "bg-purple-400",
    "bg-yellow-400",
    "bg-orange-400",
    "bg-red-400",
    "bg-green-400",
    "bg-indigo-400",
    "bg-teal-400",
    "bg-cyan-400",
    "bg-pink-400",
    "bg-gray-400",
    "bg-lime-400",
    "bg-emerald-400",
    "bg-violet-400",
    "bg-fuchsia-400",
    "bg-rose-400",
    "bg-amber-400",
    "bg-stone-400",
    "bg-neutral-400",
    "bg-slate-400",
    "bg-zinc-400",
    "bg-sky-400",
    "bg-emerald-500",
    "bg-violet-500",
    "bg-fuchsia-500",
];

/// Chart colors of the default categories.
pub const CATEGORY_COLORS: [(&str, &str); 6] = [
    ("Physical", "#10B981"),
    ("Spiritual", "#8B5CF6"),
    ("Social", "#EC4899"),
    ("Mental", "#06B6D4"),
    ("Productivity", "#3B82F6"),
    ("Other", "#6B7280"),
];

/// Chart color for categories without an entry.
pub const FALLBACK_CHART_COLOR: &str = "#ccc";

pub fn default_tasks() -> Vec<TaskTemplate> {
    DEFAULT_TASKS
        .iter()
        .map(|&(name, category, color)| TaskTemplate::new(name, category, color))
        .collect()
}

/// Pick a random task color.
pub fn pick_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TASK_COLORS.choose(rng).copied().unwrap_or(TASK_COLORS[0])
}
