// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io;
use std::path::Path;

use crate::{Graph, GraphError, Node, SegmentPairing, Way};

mod model;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    #[default]
    Xml,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format based on the file extension, falling back to [FileFormat::Xml].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("gz") => Self::XmlGz,
            Some("bz2") => Self::XmlBz2,
            _ => Self::Xml,
        }
    }
}

/// Additional controls for interpreting OSM data as a [Graph].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// How the nodes of a way are paired into edges.
    pub pairing: SegmentPairing,
}

/// Error which can occur when loading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("graph: {0}")]
    Graph(#[from] GraphError),
}

/// Node and way records extracted from OSM data, in file order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Records {
    pub nodes: Vec<Node>,
    pub ways: Vec<Way>,
}

impl Records {
    fn from_features<I>(features: I) -> Result<Self, quick_xml::Error>
    where
        I: Iterator<Item = Result<model::Feature, quick_xml::Error>>,
    {
        let mut r = Self::default();
        for f in features {
            match f? {
                model::Feature::Node(n) => r.nodes.push(n),
                model::Feature::Way(w) => r.ways.push(w.into()),
            }
        }

        log::info!("read {} nodes and {} ways", r.nodes.len(), r.ways.len());
        Ok(r)
    }

    /// Builds a [Graph] from the records, as per the provided [Options].
    pub fn into_graph(self, options: &Options) -> Result<Graph, GraphError> {
        Graph::build_with(self.nodes, self.ways, options.pairing)
    }
}

/// Reads OSM records from a reader in the provided format.
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn read_records_from_io<R: io::Read>(format: FileFormat, reader: R) -> Result<Records, Error> {
    let records = match format {
        FileFormat::Xml => {
            let b = io::BufReader::new(reader);
            Records::from_features(xml::Reader::from_io(b))?
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            let b = io::BufReader::new(d);
            Records::from_features(xml::Reader::from_io(b))?
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            let b = io::BufReader::new(d);
            Records::from_features(xml::Reader::from_io(b))?
        }
    };
    Ok(records)
}

/// Reads OSM records from a file at the provided path.
pub fn read_records_from_file<P: AsRef<Path>>(
    format: FileFormat,
    path: P,
) -> Result<Records, Error> {
    let f = File::open(path)?;
    read_records_from_io(format, f)
}

/// Reads OSM records from a static buffer.
pub fn read_records_from_buffer(format: FileFormat, data: &[u8]) -> Result<Records, Error> {
    if format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        Ok(Records::from_features(xml::Reader::from_buffer(data))?)
    } else {
        // Wrap the buffer in a cursor and use the IO path
        read_records_from_io(format, io::Cursor::new(data))
    }
}

/// Parse OSM data from a reader into a [Graph] as per the provided [Options].
pub fn load_graph_from_io<R: io::Read>(options: &Options, reader: R) -> Result<Graph, Error> {
    let records = read_records_from_io(options.file_format, reader)?;
    Ok(records.into_graph(options)?)
}

/// Parse OSM data from a file at the provided path into a [Graph] as per the provided [Options].
pub fn load_graph_from_file<P: AsRef<Path>>(options: &Options, path: P) -> Result<Graph, Error> {
    let records = read_records_from_file(options.file_format, path)?;
    Ok(records.into_graph(options)?)
}

/// Parse OSM data from a static buffer into a [Graph] as per the provided [Options].
pub fn load_graph_from_buffer(options: &Options, data: &[u8]) -> Result<Graph, Error> {
    let records = read_records_from_buffer(options.file_format, data)?;
    Ok(records.into_graph(options)?)
}
