use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter},
    path::Path,
    process::ExitCode,
};

use clap::Parser;
use cli::{initialize_tracing, Cli, Command};
use facets::{de::engine::store_bounds, Aabb, Geometry, GeometryOptions, MeshSource, Semantic};
use interleave::schema::MeshMetadata;

mod cli;

#[derive(Debug, thiserror::Error)]
enum InspectError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Geometry(#[from] facets::Error),
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_filter, cli.log_format);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), InspectError> {
    let options = GeometryOptions::default().with_handedness(cli.handedness.into());
    match &cli.command {
        Command::Gltf { file } => {
            let geometry = Geometry::from_source(facets::de::gltf::import(file)?, options)?;
            report(&geometry)?;
        }
        Command::Engine {
            metadata,
            buffer,
            write_bounds,
        } => {
            let mut meta: MeshMetadata =
                serde_json::from_reader(BufReader::new(File::open(metadata)?))?;
            let bytes = fs::read(buffer)?;
            let source = MeshSource::from_engine(&meta, &bytes)?;
            let geometry = Geometry::from_source(source, options)?;
            let bounds = report(&geometry)?;
            if let Some(out) = write_bounds {
                write_metadata(&mut meta, &bounds, out)?;
            }
        }
    }
    Ok(())
}

/// Resolve the generated attributes of every primitive and log a summary.
fn report(geometry: &Geometry) -> Result<Aabb<f32>, facets::Error> {
    tracing::debug!(
        handedness = ?geometry.options().handedness,
        "resolving generated attributes"
    );
    for (i, primitive) in geometry.primitives().iter().enumerate() {
        for semantic in Semantic::ALL.into_iter().filter(|s| s.is_synthesizable()) {
            match geometry.attribute(i, semantic) {
                Ok(_) => {}
                Err(e @ facets::Error::MissingPrerequisite { .. }) => {
                    tracing::warn!("{e}");
                }
                Err(e) => return Err(e),
            }
        }
        let present: Vec<&str> = Semantic::ALL
            .into_iter()
            .filter(|s| primitive.contains(*s))
            .map(Semantic::source_key)
            .collect();
        let stats = primitive.synthesis_stats();
        tracing::info!(
            primitive = i,
            vertices = primitive.vertex_count(),
            triangles = primitive.triangle_indices().len() / 3,
            attributes = ?present,
            generated_normals = stats.normals,
            generated_tangents = stats.tangents,
            "primitive"
        );
    }
    let bounds = geometry.bounding_box();
    let (min, max) = bounds.to_arrays();
    tracing::info!(name = geometry.name(), ?min, ?max, "bounds");
    Ok(bounds)
}

fn write_metadata(
    meta: &mut MeshMetadata,
    bounds: &Aabb<f32>,
    out: &Path,
) -> Result<(), InspectError> {
    store_bounds(meta, bounds);
    serde_json::to_writer_pretty(BufWriter::new(File::create(out)?), meta)?;
    tracing::info!(path = ?out, "wrote metadata");
    Ok(())
}
