use std::f64::consts::{FRAC_PI_2, PI, TAU};

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar as PlotBar, BarChart as PlotBarChart, GridMark, Legend, Line, Plot, PlotPoint, Points, Polygon, Text,
};

use crate::charts::{BarChart, Gauge, Heatmap, Histogram, Orientation, PieChart, RadarChart, ScatterChart, StackedBars};
use crate::color::{ColorScale, UNCATEGORISED};
use crate::data::model::format_number;

pub const PLOT_HEIGHT: f32 = 280.0;

/// Arc pieces are at most this wide so every polygon stays convex.
const ARC_STEP: f64 = PI / 36.0;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn title(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).strong());
}

fn no_data(ui: &mut Ui, chart_title: &str) {
    title(ui, chart_title);
    ui.weak("No data for the current filters.");
}

/// Axis labels for categories placed at 0, 1, 2, …
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

/// A plot without axes, grid or navigation; for pies, gauges and radars.
fn canvas(id: &str) -> Plot<'_> {
    Plot::new(id)
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
}

fn polar(radius: f64, angle: f64) -> [f64; 2] {
    [radius * angle.cos(), radius * angle.sin()]
}

/// Annular sector between `inner` and `outer` radius, split into convex pieces.
fn sector(inner: f64, outer: f64, from: f64, to: f64) -> Vec<Vec<[f64; 2]>> {
    let steps = ((to - from).abs() / ARC_STEP).ceil().max(1.0) as usize;
    let delta = (to - from) / steps as f64;
    (0..steps)
        .map(|k| {
            let a0 = from + delta * k as f64;
            let a1 = a0 + delta;
            if inner <= 0.0 {
                vec![[0.0, 0.0], polar(outer, a0), polar(outer, a1)]
            } else {
                vec![polar(inner, a0), polar(outer, a0), polar(outer, a1), polar(inner, a1)]
            }
        })
        .collect()
}

fn filled(points: Vec<[f64; 2]>, color: Color32, name: &str) -> Polygon<'_> {
    Polygon::new(points)
        .fill_color(color)
        .stroke(Stroke::new(0.5, color))
        .name(name)
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, chart: &BarChart) {
    if chart.is_empty() {
        return no_data(ui, &chart.title);
    }
    title(ui, &chart.title);

    let horizontal = chart.orientation == Orientation::Horizontal;
    let bars: Vec<PlotBar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            PlotBar::new(i as f64, bar.value)
                .name(&bar.label)
                .fill(bar.color)
                .width(0.7)
        })
        .collect();
    let mut plot_bars = PlotBarChart::new(bars).name(&chart.value_label);
    if horizontal {
        plot_bars = plot_bars.horizontal();
    }

    let labels: Vec<String> = chart.labels().into_iter().map(str::to_string).collect();
    let mut plot = Plot::new(&chart.title)
        .height(PLOT_HEIGHT)
        .allow_scroll(false)
        .show_grid(false);
    plot = if horizontal {
        plot.y_axis_formatter(category_formatter(labels))
            .x_axis_label(&chart.value_label)
            .include_x(0.0)
    } else {
        plot.x_axis_formatter(category_formatter(labels))
            .y_axis_label(&chart.value_label)
            .include_y(0.0)
    };
    plot.show(ui, |plot_ui| plot_ui.bar_chart(plot_bars));
}

pub fn histogram(ui: &mut Ui, hist: &Histogram) {
    if hist.counts.iter().all(|&n| n == 0) {
        return no_data(ui, &hist.title);
    }
    title(ui, &hist.title);

    let bars: Vec<PlotBar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &n)| PlotBar::new(hist.bin_center(i), n as f64).width(hist.width * 0.95))
        .collect();
    let chart = PlotBarChart::new(bars).color(hist.color).name("Count");

    Plot::new(&hist.title)
        .height(PLOT_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(&hist.value_label)
        .y_axis_label("Count")
        .include_y(0.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

pub fn stacked_bars(ui: &mut Ui, chart: &StackedBars) {
    if chart.categories.is_empty() {
        return no_data(ui, &chart.title);
    }
    title(ui, &chart.title);

    let mut layers: Vec<PlotBarChart> = Vec::with_capacity(chart.series.len());
    for series in &chart.series {
        let bars = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &n)| PlotBar::new(i as f64, n as f64).width(0.7))
            .collect();
        let below: Vec<&PlotBarChart> = layers.iter().collect();
        let layer = PlotBarChart::new(bars)
            .name(&series.name)
            .color(series.color)
            .stack_on(&below);
        layers.push(layer);
    }

    Plot::new(&chart.title)
        .height(PLOT_HEIGHT)
        .allow_scroll(false)
        .legend(Legend::default())
        .x_axis_formatter(category_formatter(chart.categories.clone()))
        .y_axis_label("Number of Contacts")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for layer in layers {
                plot_ui.bar_chart(layer);
            }
        });
}

// ---------------------------------------------------------------------------
// Pie / donut
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, chart: &PieChart) {
    if chart.total() == 0 {
        return no_data(ui, &chart.title);
    }
    title(ui, &chart.title);

    canvas(&chart.title)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            // clockwise from twelve o'clock
            let mut angle = FRAC_PI_2;
            for (i, slice) in chart.slices.iter().enumerate() {
                let fraction = chart.fraction(i);
                let end = angle - fraction * TAU;
                for piece in sector(chart.hole, 1.0, angle, end) {
                    plot_ui.polygon(filled(piece, slice.color, &slice.label));
                }
                if fraction >= 0.04 {
                    let mid = (angle + end) / 2.0;
                    let [x, y] = polar((1.0 + chart.hole) / 2.0 + 0.1, mid);
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), format!("{:.1}%", fraction * 100.0))
                            .color(Color32::WHITE),
                    );
                }
                angle = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

pub fn scatter(ui: &mut Ui, chart: &ScatterChart) {
    if chart.points.is_empty() {
        return no_data(ui, &chart.title);
    }
    title(ui, &chart.title);

    Plot::new(&chart.title)
        .height(PLOT_HEIGHT)
        .x_axis_label(&chart.x_label)
        .y_axis_label(&chart.y_label)
        .show(ui, |plot_ui| {
            for point in &chart.points {
                plot_ui.points(
                    Points::new(vec![[point.x, point.y]])
                        .radius(point.radius)
                        .color(point.color)
                        .name(&point.label),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Gauge
// ---------------------------------------------------------------------------

/// Half-disc gauge; the scale runs from the left (min) to the right (max).
pub fn gauge(ui: &mut Ui, gauge: &Gauge) {
    title(ui, &gauge.title);

    let span = gauge.max - gauge.min;
    let to_angle = |v: f64| {
        let t = if span > 0.0 { (v - gauge.min) / span } else { 0.0 };
        PI * (1.0 - t.clamp(0.0, 1.0))
    };

    canvas(&gauge.title).height(PLOT_HEIGHT * 0.7).show(ui, |plot_ui| {
        for band in &gauge.bands {
            for piece in sector(0.6, 1.0, to_angle(band.from), to_angle(band.to)) {
                plot_ui.polygon(filled(piece, band.color, ""));
            }
        }
        let label = match (gauge.value, gauge.fraction()) {
            (Some(value), Some(t)) => {
                let needle = polar(0.95, PI * (1.0 - t));
                plot_ui.line(Line::new(vec![[0.0, 0.0], needle]).color(Color32::DARK_GRAY).width(3.0));
                format_number(value)
            }
            _ => "N/A".to_string(),
        };
        plot_ui.text(
            Text::new(PlotPoint::new(0.0, -0.15), RichText::new(label).size(22.0).strong())
                .anchor(Align2::CENTER_CENTER),
        );
    });
}

// ---------------------------------------------------------------------------
// Radar
// ---------------------------------------------------------------------------

pub fn radar(ui: &mut Ui, chart: &RadarChart) {
    title(ui, &chart.title);
    let n = chart.axes.len();
    if n < 3 {
        ui.weak("Not enough metrics to draw a profile.");
        return;
    }
    let axis_angle = |i: usize| FRAC_PI_2 - TAU * i as f64 / n as f64;

    canvas(&chart.title).show(ui, |plot_ui| {
        // grid rings and spokes
        for ring in [0.25, 0.5, 0.75, 1.0] {
            let ring_points: Vec<[f64; 2]> = (0..=n).map(|i| polar(ring, axis_angle(i % n))).collect();
            plot_ui.line(Line::new(ring_points).color(Color32::from_gray(170)).width(0.5));
        }
        for (i, (name, _)) in chart.axes.iter().enumerate() {
            let angle = axis_angle(i);
            plot_ui.line(Line::new(vec![[0.0, 0.0], polar(1.0, angle)]).color(Color32::from_gray(170)).width(0.5));
            let [x, y] = polar(1.18, angle);
            plot_ui.text(Text::new(PlotPoint::new(x, y), name.as_str()));
        }

        let fill = Color32::from_rgba_unmultiplied(0x1e, 0x88, 0xe5, 90);
        let vertex = |i: usize| polar(chart.axes[i % n].1.clamp(0.0, 1.0), axis_angle(i % n));
        // fan of triangles, each convex
        for i in 0..n {
            plot_ui.polygon(
                Polygon::new(vec![[0.0, 0.0], vertex(i), vertex(i + 1)])
                    .fill_color(fill)
                    .stroke(Stroke::NONE),
            );
        }
        let outline: Vec<[f64; 2]> = (0..=n).map(vertex).collect();
        plot_ui.line(Line::new(outline).color(Color32::from_rgb(0x1e, 0x88, 0xe5)).width(2.0));
    });
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

/// Square cells coloured on a blue → red scale over [-1, 1]; first row on top.
pub fn heatmap(ui: &mut Ui, map: &Heatmap) {
    title(ui, &map.title);
    let n = map.labels.len();
    if n == 0 {
        ui.weak("No data for the current filters.");
        return;
    }
    let scale = ColorScale::diverging();
    let mut row_labels = map.labels.clone();
    row_labels.reverse();

    Plot::new(&map.title)
        .height(PLOT_HEIGHT + 40.0)
        .data_aspect(1.0)
        .show_grid(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_x(false)
        .show_y(false)
        .x_axis_formatter(category_formatter(map.labels.clone()))
        .y_axis_formatter(category_formatter(row_labels))
        .show(ui, |plot_ui| {
            for (r, row) in map.values.iter().enumerate() {
                let y = (n - 1 - r) as f64;
                for (c, value) in row.iter().enumerate() {
                    let x = c as f64;
                    let color = value.map_or(UNCATEGORISED, |v| scale.at((v + 1.0) / 2.0));
                    let cell = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(filled(cell, color, ""));
                    let text = value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
                    plot_ui.text(Text::new(PlotPoint::new(x, y), text).color(Color32::BLACK));
                }
            }
        });
}
