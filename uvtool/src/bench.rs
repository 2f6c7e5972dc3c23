//! `uvtool bench`: time the bake on a synthetic grid.

use std::time::Instant;

use anyhow::Result;
use mesh_color_id::{BakeParams, bake_mesh_detailed};
use mesh_loops::{uv_grid, uv_grid_strips};
use tracing::info;

pub fn run(nx: u32, ny: u32, strips: bool, iterations: u32, params: &BakeParams) -> Result<()> {
    let start = Instant::now();
    let (mesh, uvs) = if strips {
        uv_grid_strips(nx, ny)
    } else {
        uv_grid(nx, ny)
    };
    let view = mesh.view(&uvs)?;
    info!(
        faces = u64::from(nx) * u64::from(ny),
        time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Grid built"
    );

    let mut times = Vec::with_capacity(iterations as usize);
    let mut last = None;
    for _ in 0..iterations.max(1) {
        let bake = bake_mesh_detailed(&view, params)?;
        times.push(bake.compute_time_ms);
        last = Some(bake.report);
    }

    times.sort_by(f64::total_cmp);
    let median = times[times.len() / 2];
    let best = times[0];
    if let Some(report) = last {
        println!("{report}");
    }
    println!("Runs: {}  best: {best:.2} ms  median: {median:.2} ms", times.len());
    Ok(())
}
