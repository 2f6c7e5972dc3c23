//! `uvtool bake`: JSON snapshot in, per-loop colors out.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use mesh_color_id::{BakeParams, bake_mesh_detailed, quantize_rgba};
use mesh_loops::LoopMesh;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A mesh as flat loop arrays with one interleaved UV layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    pub face_count: usize,
    pub loop_starts: Vec<u32>,
    pub loop_totals: Vec<u32>,
    pub vertex_indices: Vec<u32>,
    pub uv_coords: Vec<f32>,
}

impl Snapshot {
    fn view(&self) -> Result<LoopMesh<'_>> {
        Ok(LoopMesh::from_flat(
            self.face_count,
            &self.loop_starts,
            &self.loop_totals,
            &self.vertex_indices,
            &self.uv_coords,
        )?)
    }
}

/// Bake output, one entry per loop channel.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Colors {
    Float(Vec<f32>),
    Byte(Vec<u8>),
}

pub fn run(
    input: &Path,
    output: Option<&Path>,
    bytes: bool,
    report: bool,
    params: &BakeParams,
) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a mesh snapshot", input.display()))?;

    let json = bake_snapshot(&snapshot, bytes, report, params)?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => writeln!(std::io::stdout().lock(), "{json}")?,
    }
    Ok(())
}

fn bake_snapshot(
    snapshot: &Snapshot,
    bytes: bool,
    report: bool,
    params: &BakeParams,
) -> Result<String> {
    let bake = bake_mesh_detailed(&snapshot.view()?, params)?;
    info!(
        faces = bake.report.face_count,
        islands = bake.report.island_count,
        time_ms = bake.compute_time_ms,
        "Snapshot baked"
    );
    if report {
        eprintln!("{}", bake.report);
    }

    let colors = if bytes {
        Colors::Byte(quantize_rgba(&bake.colors))
    } else {
        Colors::Float(bake.colors)
    };
    Ok(serde_json::to_string(&colors)?)
}
