use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use routemap::osm::FileFormat;
use routemap::raster::{RenderOptions, Scaling};
use routemap::SegmentPairing;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] routemap::osm::Error);

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct ImageSaveError(PathBuf, #[source] std::io::Error);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Xml => FileFormat::Xml,
            Format::XmlGz => FileFormat::XmlGz,
            Format::XmlBz2 => FileFormat::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    /// ID of the start node
    #[arg(allow_hyphen_values = true)]
    from_id: i64,

    /// ID of the end node
    #[arg(allow_hyphen_values = true)]
    to_id: i64,

    /// Where to save the PGM image
    output: PathBuf,

    /// Height of the image, in pixels
    #[arg(long, default_value_t = 3000)]
    rows: usize,

    /// Width of the image, in pixels
    #[arg(long, default_value_t = 3000)]
    cols: usize,

    /// Format of the OSM file; guessed from the extension if not provided
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Stretch both axes over the number of rows
    #[arg(long)]
    legacy_scaling: bool,

    /// Only connect the 1st-2nd, 3rd-4th, ... nodes of ways
    #[arg(long)]
    disjoint_pairs: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let options = routemap::osm::Options {
        file_format: cli
            .format
            .map(FileFormat::from)
            .unwrap_or_else(|| FileFormat::from_path(&cli.osm_file)),
        pairing: if cli.disjoint_pairs {
            SegmentPairing::Disjoint
        } else {
            SegmentPairing::Chained
        },
    };
    let g = load_graph(&options, &cli.osm_file)?;

    let route = g.compute_route(cli.from_id, cli.to_id);
    if route.is_empty() {
        log::warn!("no route between {} and {}", cli.from_id, cli.to_id);
    } else {
        log::info!("route has {} nodes", route.len());
    }

    let render_options = RenderOptions {
        rows: cli.rows,
        cols: cli.cols,
        scaling: if cli.legacy_scaling {
            Scaling::Legacy
        } else {
            Scaling::PerAxis
        },
        ..RenderOptions::default()
    };
    let mut rendering = routemap::raster::render_network(&g, &render_options)?;
    rendering.overlay_route(&route);

    rendering
        .save(&cli.output)
        .map_err(|e| ImageSaveError(cli.output.clone(), e))?;
    log::info!("saved {}", cli.output.display());

    Ok(())
}

fn load_graph<P: AsRef<Path>>(
    options: &routemap::osm::Options,
    path: P,
) -> Result<routemap::Graph, GraphLoadError> {
    match routemap::osm::load_graph_from_file(options, path.as_ref()) {
        Ok(g) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
