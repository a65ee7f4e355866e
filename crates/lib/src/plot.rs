//! Plot payloads carried by plot entries.
//!
//! The core never draws anything. It only carries the data to whatever
//! renders charts at the UI boundary.

use serde::{Deserialize, Serialize};

/// A single scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for PlotPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Scatter data attached to a plot entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<PlotPoint>,
}

impl PlotData {
    pub fn new(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        points: impl IntoIterator<Item = PlotPoint>,
    ) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            points: points.into_iter().collect(),
        }
    }

    /// The fixed illustrative dataset sent whenever a message asks for a plot.
    pub fn sample() -> Self {
        Self::new(
            "x",
            "y",
            [(1.0, 2.0), (2.0, 1.0), (3.0, 4.0), (4.0, 3.0), (5.0, 5.0)].map(PlotPoint::from),
        )
    }

    /// Smallest box containing every point, as `((min_x, min_y), (max_x, max_y))`.
    ///
    /// Returns `None` for an empty dataset.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let first = self.points.first()?;
        let init = ((first.x, first.y), (first.x, first.y));
        Some(
            self.points
                .iter()
                .fold(init, |((min_x, min_y), (max_x, max_y)), p| {
                    (
                        (min_x.min(p.x), min_y.min(p.y)),
                        (max_x.max(p.x), max_y.max(p.y)),
                    )
                }),
        )
    }
}
