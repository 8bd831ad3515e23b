// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Extraction of road networks from [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML) files.
//!
//! Only `node` and `way` elements are read. A way is traversable
//! if it has a [highway](https://wiki.openstreetmap.org/wiki/Key:highway) tag.

mod reader;

pub use reader::{
    load_graph_from_buffer, load_graph_from_file, load_graph_from_io, read_records_from_buffer,
    read_records_from_file, read_records_from_io, Error, FileFormat, Options, Records,
};
