// Fitness-over-generations chart.
//
// Scene building is a pure function of the buffered points and the target
// dimensions — no surface, no I/O — so the projection math is testable on
// its own. The component below just paints the scene as SVG; the viewBox
// scales with the container, so resize redraw costs nothing extra.

use dioxus::prelude::*;

use super::history::{FitnessHistory, HistoryPoint};

pub const GRID_ROWS: usize = 10;
pub const GRID_COLS: usize = 10;

const VIEW_W: f64 = 720.0;
const VIEW_H: f64 = 260.0;

/// A straight segment in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caption {
    pub x: f64,
    pub y: f64,
    pub text: &'static str,
}

/// Drawing instructions for one frame of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub width: f64,
    pub height: f64,
    pub grid: Vec<GridLine>,
    /// `"x,y x,y ..."`, suitable for `<polyline points=... />`; absent
    /// when fewer than two points are buffered.
    pub polyline: Option<String>,
    pub markers: Vec<Marker>,
    pub captions: [Caption; 2],
}

/// Project the buffered series onto a width×height view.
///
/// x spreads generations across the span (guarded so a single-generation
/// series still lands at a finite coordinate); y maps fitness over the
/// fixed [0, 1] range, higher fitness drawn higher.
pub fn project(points: &[HistoryPoint], width: f64, height: f64) -> ChartScene {
    let min_gen = points.iter().map(|p| p.generation).min().unwrap_or(0);
    let max_gen = points.iter().map(|p| p.generation).max().unwrap_or(0);

    let markers: Vec<Marker> = points
        .iter()
        .map(|p| {
            let (x, y) = project_point(p, min_gen, max_gen, width, height);
            Marker { x, y }
        })
        .collect();

    let polyline = if markers.len() < 2 {
        None
    } else {
        let mut pts = String::new();
        for m in &markers {
            if !pts.is_empty() {
                pts.push(' ');
            }
            pts.push_str(&format!("{:.2},{:.2}", m.x, m.y));
        }
        Some(pts)
    };

    ChartScene {
        width,
        height,
        grid: grid_lines(width, height),
        polyline,
        markers,
        captions: [
            Caption {
                x: width * 0.5,
                y: height - 4.0,
                text: "generation",
            },
            Caption {
                x: 6.0,
                y: 12.0,
                text: "avg fitness",
            },
        ],
    }
}

pub fn project_point(
    p: &HistoryPoint,
    min_gen: u64,
    max_gen: u64,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let span = max_gen.saturating_sub(min_gen).max(1) as f64;
    let x = (p.generation.saturating_sub(min_gen)) as f64 / span * width;
    let y = height - p.avg_fitness * height;
    (x, y)
}

fn grid_lines(width: f64, height: f64) -> Vec<GridLine> {
    let mut lines = Vec::with_capacity(GRID_COLS + GRID_ROWS + 2);
    for i in 0..=GRID_COLS {
        let x = width * (i as f64 / GRID_COLS as f64);
        lines.push(GridLine {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: height,
        });
    }
    for i in 0..=GRID_ROWS {
        let y = height * (i as f64 / GRID_ROWS as f64);
        lines.push(GridLine {
            x1: 0.0,
            y1: y,
            x2: width,
            y2: y,
        });
    }
    lines
}

#[component]
pub fn FitnessChart(history: Signal<FitnessHistory>) -> Element {
    let scene = {
        let history = history.read();
        let points: Vec<HistoryPoint> = history.as_series().copied().collect();
        project(&points, VIEW_W, VIEW_H)
    };
    let poly = scene.polyline.clone().unwrap_or_default();

    rsx! {
        div {
            style: "width:100%; background:#020617; border-radius:14px; border:1px solid #334155; padding:12px;",
            div { style: "color:#94a3b8; font-size:12px; margin-bottom:6px;", "Average fitness by generation" }
            svg {
                style: "width:100%; height:auto; display:block;",
                view_box: "0 0 {scene.width} {scene.height}",

                for seg in scene.grid.iter() {
                    line {
                        x1: "{seg.x1}", y1: "{seg.y1}",
                        x2: "{seg.x2}", y2: "{seg.y2}",
                        stroke: "#1f2937", "stroke-width": "1",
                    }
                }

                if !poly.is_empty() {
                    polyline {
                        points: "{poly}",
                        fill: "none",
                        stroke: "#22d3ee",
                        stroke_width: "2",
                        stroke_linejoin: "round",
                        stroke_linecap: "round",
                    }
                }

                for m in scene.markers.iter() {
                    circle { cx: "{m.x}", cy: "{m.y}", r: "3", fill: "#f97316" }
                }

                for c in scene.captions.iter() {
                    text { x: "{c.x}", y: "{c.y}", fill: "#94a3b8", "font-size": "10", "{c.text}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(generation: u64, avg_fitness: f64) -> HistoryPoint {
        HistoryPoint {
            generation,
            avg_fitness,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn grid_is_ten_by_ten() {
        let scene = project(&[], 720.0, 260.0);
        assert_eq!(scene.grid.len(), GRID_COLS + GRID_ROWS + 2);
        let verticals = scene.grid.iter().filter(|l| l.x1 == l.x2).count();
        let horizontals = scene.grid.iter().filter(|l| l.y1 == l.y2).count();
        assert_eq!(verticals, GRID_COLS + 1);
        assert_eq!(horizontals, GRID_ROWS + 1);
    }

    #[test]
    fn points_project_onto_the_generation_span() {
        let points = [point(10, 0.5), point(15, 0.25), point(20, 1.0)];
        let scene = project(&points, 100.0, 200.0);

        assert_eq!(scene.markers.len(), 3);
        assert_eq!(scene.markers[0].x, 0.0);
        assert_eq!(scene.markers[1].x, 50.0);
        assert_eq!(scene.markers[2].x, 100.0);

        // y = height - fitness * height, higher fitness drawn higher.
        assert_eq!(scene.markers[0].y, 100.0);
        assert_eq!(scene.markers[1].y, 150.0);
        assert_eq!(scene.markers[2].y, 0.0);
    }

    #[test]
    fn single_point_has_a_marker_but_no_polyline() {
        let scene = project(&[point(3, 0.6)], 720.0, 260.0);
        assert_eq!(scene.markers.len(), 1);
        assert!(scene.polyline.is_none());
    }

    #[test]
    fn two_points_make_a_polyline() {
        let scene = project(&[point(1, 0.2), point(2, 0.4)], 100.0, 100.0);
        let poly = scene.polyline.expect("two points should connect");
        assert_eq!(poly.split(' ').count(), 2);
    }

    #[test]
    fn degenerate_span_stays_finite() {
        // Same generation twice (the simulation may replay); the span
        // guard keeps x at zero instead of dividing by zero.
        let scene = project(&[point(4, 0.3), point(4, 0.7)], 100.0, 100.0);
        assert!(scene.markers.iter().all(|m| m.x == 0.0));
        assert!(scene.markers.iter().all(|m| m.x.is_finite() && m.y.is_finite()));
    }

    #[test]
    fn captions_name_both_axes() {
        let scene = project(&[], 720.0, 260.0);
        let texts: Vec<&str> = scene.captions.iter().map(|c| c.text).collect();
        assert!(texts.contains(&"generation"));
        assert!(texts.contains(&"avg fitness"));
    }
}
