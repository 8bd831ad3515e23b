// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Rendering of a [Graph](crate::Graph) and routes into grayscale images.

mod canvas;
mod line;
mod projection;
mod render;

pub use canvas::{Canvas, MAX_INTENSITY};
pub use line::{draw_line, draw_point, line_points};
pub use projection::{Axis, Projection, ProjectionError, Scaling};
pub use render::{render_network, RenderError, RenderOptions, Rendering, Style};

/// Position of a [Canvas] cell. Might lie outside of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub row: i64,
    pub col: i64,
}
