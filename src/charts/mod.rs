//! Plot-ready chart data.
//!
//! Builders in [`dashboard`] are pure functions of a table; `ui::plot` turns
//! the structures below into egui_plot items.

pub mod dashboard;

use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    /// Categories on the y axis, first bar at the bottom.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub category_label: String,
    pub value_label: String,
    pub orientation: Orientation,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Slice>,
    /// Inner radius as a fraction of the outer one; 0 for a full pie.
    pub hole: f64,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Share of slice `i` in [0, 1].
    pub fn fraction(&self, i: usize) -> f64 {
        let total = self.total();
        match self.slices.get(i) {
            Some(slice) if total > 0 => slice.count as f64 / total as f64,
            _ => 0.0,
        }
    }
}

/// Equal-width bins starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub value_label: String,
    pub start: f64,
    pub width: f64,
    pub counts: Vec<usize>,
    pub color: Color32,
}

impl Histogram {
    /// Bin `values`; values outside `[start, start + width * bins)` are dropped.
    pub fn from_values<I>(title: &str, value_label: &str, values: I, start: f64, width: f64, bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = vec![0; bins];
        for v in values {
            let offset = (v - start) / width;
            if offset >= 0.0 && offset < bins as f64 {
                counts[offset as usize] += 1;
            }
        }
        Self {
            title: title.to_string(),
            value_label: value_label.to_string(),
            start,
            width,
            counts,
            color: Color32::from_rgb(0x1e, 0x88, 0xe5),
        }
    }

    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + self.width * (i as f64 + 0.5)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    pub color: Color32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub title: String,
    /// `None` renders as "N/A".
    pub value: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub bands: Vec<GaugeBand>,
}

impl Gauge {
    /// Needle position in [0, 1].
    pub fn fraction(&self) -> Option<f64> {
        let v = self.value?;
        (self.max > self.min).then(|| ((v - self.min) / (self.max - self.min)).clamp(0.0, 1.0))
    }
}

/// Per-contact profile; every axis normalised to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    pub title: String,
    pub axes: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<usize>,
    pub color: Color32,
}

/// One bar per category, split into stacked series.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBars {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}
