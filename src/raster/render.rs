// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io;
use std::path::Path;

use super::{draw_line, draw_point, Canvas, Projection, ProjectionError, Scaling};
use crate::{Graph, Node};

/// Error which can occur when rendering a [Graph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("{0}")]
    Projection(#[from] ProjectionError),

    #[error("canvas of {rows}x{cols} pixels is too large")]
    CanvasTooLarge { rows: usize, cols: usize },
}

/// Intensities and sizes used when drawing roads and routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Intensity of roads and junctions.
    pub road_intensity: u8,

    /// Blot size used when drawing roads.
    pub road_thickness: u32,

    /// Blot size of nodes with at least one edge.
    pub junction_size: u32,

    /// Intensity of the route and its nodes.
    pub route_intensity: u8,

    /// Blot size used when drawing the route.
    pub route_thickness: u32,

    /// Blot size of nodes on the route.
    pub waypoint_size: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            road_intensity: 180,
            road_thickness: 2,
            junction_size: 4,
            route_intensity: 50,
            route_thickness: 4,
            waypoint_size: 8,
        }
    }
}

/// Additional controls for [render_network].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Height of the image, in pixels.
    pub rows: usize,

    /// Width of the image, in pixels.
    pub cols: usize,

    /// How the graph's bounding box is stretched onto the image.
    pub scaling: Scaling,

    pub style: Style,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rows: 3000,
            cols: 3000,
            scaling: Scaling::default(),
            style: Style::default(),
        }
    }
}

/// A [Canvas] with a road network drawn onto it, together with the
/// [Projection] used to draw it, so that routes can be overlaid later.
#[derive(Debug, Clone)]
pub struct Rendering {
    canvas: Canvas,
    projection: Projection,
    style: Style,
}

impl Rendering {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Highlights a route over the already drawn road network.
    ///
    /// Every node of the route gets a waypoint blot, and consecutive
    /// nodes are connected by route lines. Route pixels replace whatever
    /// was drawn there before.
    pub fn overlay_route(&mut self, route: &[Node]) {
        let style = self.style;
        let mut prev = None;

        for node in route {
            let at = self.projection.project(node);
            draw_point(&mut self.canvas, at, style.waypoint_size, style.route_intensity);

            if let Some(prev) = prev {
                draw_line(
                    &mut self.canvas,
                    prev,
                    at,
                    style.route_thickness,
                    style.route_intensity,
                );
            }
            prev = Some(at);
        }

        log::debug!("overlaid a route of {} nodes", route.len());
    }

    /// Saves the image in the [PGM](Canvas::write_pgm) format at the provided path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let f = File::create(path)?;
        self.canvas.write_pgm(io::BufWriter::new(f))
    }
}

/// Draws all edges of the graph onto a new canvas, as per the provided [RenderOptions].
///
/// Nodes with at least one edge are drawn as junction blots, and every edge as a road line.
/// The whole bounding box of the graph is stretched onto the canvas.
///
/// Fails before drawing anything if the graph has no nodes, if its
/// bounding box has no extent along one of the axes, or if the canvas can't be allocated.
pub fn render_network(g: &Graph, options: &RenderOptions) -> Result<Rendering, RenderError> {
    let bbox = g.bounding_box().ok_or(ProjectionError::NoBounds)?;
    let projection = Projection::new(bbox, options.rows, options.cols, options.scaling)?;
    let mut canvas =
        Canvas::try_new(options.rows, options.cols).ok_or(RenderError::CanvasTooLarge {
            rows: options.rows,
            cols: options.cols,
        })?;
    let style = options.style;

    for node in g.iter() {
        if !g.neighbor_ids(node.id).is_empty() {
            draw_point(
                &mut canvas,
                projection.project(node),
                style.junction_size,
                style.road_intensity,
            );
        }
    }

    let mut edges: usize = 0;
    for (a, b) in g.edges() {
        draw_line(
            &mut canvas,
            projection.project(a),
            projection.project(b),
            style.road_thickness,
            style.road_intensity,
        );
        edges += 1;
    }

    log::debug!(
        "rendered {} edges onto a {}x{} canvas",
        edges,
        options.rows,
        options.cols,
    );

    Ok(Rendering {
        canvas,
        projection,
        style,
    })
}
