// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Breadth-first routing over [OpenStreetMap](https://www.openstreetmap.org/) extracts,
//! with the road network and the found route rendered into a grayscale
//! [PGM](https://netpbm.sourceforge.net/doc/pgm.html) image.
//!
//! Every traversable way becomes a chain of undirected, unweighted edges.
//! Routes are shortest in hop count, not in distance.
//!
//! # Example
//!
//! ```no_run
//! let options = routemap::osm::Options::default();
//! let g = routemap::osm::load_graph_from_file(&options, "path/to/campus.osm")
//!     .expect("failed to load campus.osm");
//!
//! let route = g.compute_route(5162977672, 8062710380);
//! println!("Route has {} nodes", route.len());
//!
//! let mut rendering = routemap::raster::render_network(&g, &routemap::raster::RenderOptions::default())
//!     .expect("failed to render the road network");
//! rendering.overlay_route(&route);
//! rendering.save("campus.pgm").expect("failed to save the image");
//! ```

mod graph;
pub mod osm;
pub mod raster;
mod search;

pub use graph::{Graph, GraphError, SegmentPairing};
pub use search::find_route;

/// Represents a point of the road network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

/// Represents a stretch of road as an ordered list of [Node] ids.
///
/// Only traversable ways contribute edges to a [Graph].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub traversable: bool,
}

/// The minimal latitude/longitude rectangle containing a set of [Nodes](Node).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Creates a bounding box containing a single position.
    pub fn around(lat: f64, lon: f64) -> Self {
        Self {
            min_lat: lat,
            max_lat: lat,
            min_lon: lon,
            max_lon: lon,
        }
    }

    /// Grows the bounding box to contain the provided position.
    pub fn expand(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }

    /// Checks whether the provided position lies within the bounding box (edges included).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}
