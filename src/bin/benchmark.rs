//! Performance benchmark comparing serial and parallel generation and meshing

use std::time::Instant;
use voxel_life::domain::{Algorithm, AnimFace, CellGrid, GridDimensions, GridState, MeshBuffers, default_rule};

fn seeded_state(half: u32) -> GridState {
    let rule = default_rule();
    let grid = CellGrid::make_random(GridDimensions::new(half, half, half), 0.5, rule.states());
    // A few generations so the grid has settled into the rule's structures
    GridState::skip_updates(&GridState::make_from_grid(grid), &rule, 3)
}

fn benchmark_update(state: &GridState, algorithm: Algorithm, iterations: u32) -> f64 {
    let rule = default_rule();
    let mut state = state.clone();

    let start = Instant::now();
    for _ in 0..iterations {
        state = algorithm.update(&state, &rule);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_faces(state: &GridState, algorithm: Algorithm, iterations: u32) -> (f64, usize) {
    let start = Instant::now();
    let mut faces = Vec::new();
    for _ in 0..iterations {
        faces = algorithm.build_faces(state);
    }
    (start.elapsed().as_secs_f64() * 1000.0 / iterations as f64, faces.len())
}

fn benchmark_mesh(faces: &[AnimFace], iterations: u32) -> f64 {
    let start = Instant::now();
    for i in 0..iterations {
        let buffers = MeshBuffers::build(faces, i as f32 / iterations as f32);
        std::hint::black_box(buffers);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Voxel Life Benchmark ===\n");
    println!(
        "{:>10} {:>10} {:>12} {:>12} {:>12} {:>12} {:>10} {:>10}",
        "Grid", "Faces", "Update(ms)", "UpdPar(ms)", "Faces(ms)", "FacesPar", "Mesh(ms)", "Speedup"
    );
    println!("{}", "-".repeat(96));

    for half in [4, 8, 16, 24, 32] {
        let iterations = if half <= 16 { 10 } else { 3 };
        let state = GridState::make_updated(&seeded_state(half), &default_rule());

        let serial_ms = benchmark_update(&state, Algorithm::Serial, iterations);
        let parallel_ms = benchmark_update(&state, Algorithm::Parallel, iterations);
        let (faces_ms, face_count) = benchmark_faces(&state, Algorithm::Serial, iterations);
        let (faces_par_ms, _) = benchmark_faces(&state, Algorithm::Parallel, iterations);

        let faces = Algorithm::Parallel.build_faces(&state);
        let mesh_ms = benchmark_mesh(&faces, iterations);

        let fastest = parallel_ms + faces_par_ms;
        let speedup = (serial_ms + faces_ms) / fastest;
        let side = half * 2;

        println!(
            "{:>10} {:>10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>9.1}x",
            format!("{}^3", side),
            face_count,
            serial_ms,
            parallel_ms,
            faces_ms,
            faces_par_ms,
            mesh_ms,
            speedup
        );
    }

    println!("\n=== Throughput at 64^3 ===\n");

    let state = seeded_state(32);
    let cells = state.grid().cells().len();
    let serial_ms = benchmark_update(&state, Algorithm::Serial, 3);
    let parallel_ms = benchmark_update(&state, Algorithm::Parallel, 3);

    println!("Serial:    {:.2} ms/gen, {:.1}M cells/sec", serial_ms, cells as f64 / (serial_ms / 1000.0) / 1_000_000.0);
    println!("Parallel:  {:.2} ms/gen, {:.1}M cells/sec", parallel_ms, cells as f64 / (parallel_ms / 1000.0) / 1_000_000.0);
}
