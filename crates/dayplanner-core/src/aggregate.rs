//! Category breakdown of the planned day.
//!
//! Totals are recomputed from the blocks on every query; nothing is cached.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::block::Block;
use crate::palette::{CATEGORY_COLORS, FALLBACK_CHART_COLOR};

/// Sum block durations per category, in order of first appearance.
pub fn category_totals<'a, I>(blocks: I) -> IndexMap<String, i32>
where
    I: IntoIterator<Item = &'a Block>,
{
    let mut totals = IndexMap::new();
    for block in blocks {
        *totals.entry(block.category.clone()).or_insert(0) += block.duration;
    }
    totals
}

/// Category to chart color lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartColors {
    pub colors: IndexMap<String, String>,
    pub fallback: String,
}

impl ChartColors {
    pub fn color_of(&self, category: &str) -> &str {
        self.colors
            .get(category)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            colors: CATEGORY_COLORS
                .iter()
                .map(|&(name, color)| (name.to_string(), color.to_string()))
                .collect(),
            fallback: FALLBACK_CHART_COLOR.to_string(),
        }
    }
}

/// One wedge of the breakdown chart. Angles are radians, clockwise from the
/// positive x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub category: String,
    pub minutes: i32,
    pub fraction: f64,
    /// Rounded whole percent, as shown in the legend.
    pub percent: u32,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ChartSlice {
    /// Slices over half the circle need the SVG large-arc flag.
    pub fn large_arc(&self) -> bool {
        self.fraction > 0.5
    }
}

/// Totals plus chart slices for the current blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub total_minutes: i32,
    pub slices: Vec<ChartSlice>,
}

impl CategoryBreakdown {
    pub fn compute<'a, I>(blocks: I, colors: &ChartColors) -> Self
    where
        I: IntoIterator<Item = &'a Block>,
    {
        Self::from_totals(&category_totals(blocks), colors)
    }

    pub fn from_totals(totals: &IndexMap<String, i32>, colors: &ChartColors) -> Self {
        let total_minutes: i32 = totals.values().sum();
        if total_minutes <= 0 {
            return Self {
                total_minutes: 0,
                slices: Vec::new(),
            };
        }

        let mut cumulative = 0.0;
        let slices = totals
            .iter()
            .map(|(category, &minutes)| {
                let fraction = f64::from(minutes) / f64::from(total_minutes);
                let start_angle = cumulative * TAU;
                cumulative += fraction;
                ChartSlice {
                    category: category.clone(),
                    minutes,
                    fraction,
                    percent: (fraction * 100.0).round() as u32,
                    color: colors.color_of(category).to_string(),
                    start_angle,
                    end_angle: cumulative * TAU,
                }
            })
            .collect();

        Self {
            total_minutes,
            slices,
        }
    }

    /// Nothing planned yet; the chart shows its empty state.
    pub fn is_empty(&self) -> bool {
        self.total_minutes == 0
    }
}
