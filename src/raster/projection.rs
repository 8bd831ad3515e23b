// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::Pixel;
use crate::{BoundingBox, Node};

/// Geographic axis of a [BoundingBox].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
        }
    }
}

/// Error conditions which may occur when creating a [Projection].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    /// The bounding box has no (or a non-finite) extent along an axis,
    /// so positions can't be scaled onto the canvas.
    #[error("degenerate bounds: zero {0} extent")]
    DegenerateBounds(Axis),

    /// There is no bounding box at all - the graph has no nodes.
    #[error("no bounds: the graph has no nodes")]
    NoBounds,
}

/// Controls how geographic extents are stretched onto the canvas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// Longitude spans all rows and latitude spans all columns.
    #[default]
    PerAxis,

    /// Both axes span `rows` pixels, regardless of the number of columns.
    /// Non-square canvases get a distorted aspect ratio, and with fewer
    /// columns than rows some positions land outside of the canvas.
    Legacy,
}

/// Linear mapping from latitude/longitude into [Pixels](Pixel).
///
/// Longitude is mapped onto rows, and latitude onto columns:
/// the minimum of each maps to 0, and the maximum to the last row or column.
/// Fractional pixel coordinates are truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    bbox: BoundingBox,
    row_scale: f64,
    col_scale: f64,
}

impl Projection {
    /// Creates a projection of `bbox` onto a canvas of `rows` by `cols` pixels.
    ///
    /// Fails with [ProjectionError::DegenerateBounds] if either the latitude or the
    /// longitude extent of `bbox` is zero or not finite.
    pub fn new(
        bbox: BoundingBox,
        rows: usize,
        cols: usize,
        scaling: Scaling,
    ) -> Result<Self, ProjectionError> {
        let lat_extent = bbox.max_lat - bbox.min_lat;
        if !(lat_extent.is_finite() && lat_extent > 0.0) {
            return Err(ProjectionError::DegenerateBounds(Axis::Latitude));
        }

        let lon_extent = bbox.max_lon - bbox.min_lon;
        if !(lon_extent.is_finite() && lon_extent > 0.0) {
            return Err(ProjectionError::DegenerateBounds(Axis::Longitude));
        }

        let last_row = rows.saturating_sub(1) as f64;
        let last_col = cols.saturating_sub(1) as f64;
        let (row_scale, col_scale) = match scaling {
            Scaling::PerAxis => (last_row, last_col),
            Scaling::Legacy => (last_row, last_row),
        };

        Ok(Self {
            bbox,
            row_scale,
            col_scale,
        })
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Maps a position onto a [Pixel]. Positions outside of the bounding box
    /// map outside of the canvas.
    pub fn to_pixel(&self, lat: f64, lon: f64) -> Pixel {
        let row = self.row_scale * (lon - self.bbox.min_lon) / (self.bbox.max_lon - self.bbox.min_lon);
        let col = self.col_scale * (lat - self.bbox.min_lat) / (self.bbox.max_lat - self.bbox.min_lat);
        Pixel {
            row: row as i64,
            col: col as i64,
        }
    }

    /// Maps the position of a [Node] onto a [Pixel].
    pub fn project(&self, node: &Node) -> Pixel {
        self.to_pixel(node.lat, node.lon)
    }
}
