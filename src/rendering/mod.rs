use macroquad::prelude::*;
use crate::application::{Camera, Simulation};
use crate::domain::MeshBuffers;

/// Faces per macroquad mesh, so 4 vertices each stay within u16 indices
const FACES_PER_MESH: usize = u16::MAX as usize / 4;

/// Direction towards the key light, roughly over the viewer's shoulder
const LIGHT_DIR: [f32; 3] = [-0.45, 0.75, -0.5];

/// Format large numbers with K/M/B suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Vertex colour from a lambert term on the normal darkened by AO
fn shade(normal: &[f32], ao: f32) -> Color {
    let len = (LIGHT_DIR[0].powi(2) + LIGHT_DIR[1].powi(2) + LIGHT_DIR[2].powi(2)).sqrt();
    let lambert = (normal[0] * LIGHT_DIR[0] + normal[1] * LIGHT_DIR[1] + normal[2] * LIGHT_DIR[2]) / len;
    let light = (0.45 + 0.55 * lambert.max(0.0)) * ao;
    Color::new(0.1 + 0.2 * light, 0.25 + 0.75 * light, 0.2 + 0.5 * light, 1.0)
}

/// Split frame buffers into macroquad meshes
pub fn build_meshes(buffers: &MeshBuffers) -> Vec<Mesh> {
    let face_count = buffers.face_count();

    (0..face_count)
        .step_by(FACES_PER_MESH)
        .map(|first| {
            let last = (first + FACES_PER_MESH).min(face_count);
            let base = first * 4;

            let vertices = (base..last * 4)
                .map(|v| {
                    let p = &buffers.positions[v * 3..v * 3 + 3];
                    let n = &buffers.normals[v * 3..v * 3 + 3];
                    Vertex::new(p[0], p[1], p[2], 0.0, 0.0, shade(n, buffers.aos[v]))
                })
                .collect();

            let indices = buffers.indices[first * 6..last * 6]
                .iter()
                .map(|&i| (i as usize - base) as u16)
                .collect();

            Mesh {
                vertices,
                indices,
                texture: None,
            }
        })
        .collect()
}

/// Draw the animated voxel mesh from the orbit camera. Returns the number
/// of faces drawn.
pub fn draw_grid(sim: &Simulation, camera: &Camera) -> usize {
    let eye = camera.eye_position();
    set_camera(&Camera3D {
        position: vec3(eye.x, eye.y, eye.z),
        up: vec3(0.0, 1.0, 0.0),
        target: vec3(0.0, 0.0, 0.0),
        ..Default::default()
    });

    let half = sim.dimensions().half_extents();
    draw_cube_wires(
        vec3(0.0, 0.0, 0.0),
        vec3(2.0 * half.x as f32, 2.0 * half.y as f32, 2.0 * half.z as f32),
        Color::from_rgba(40, 40, 40, 255),
    );

    let buffers = sim.mesh();
    build_meshes(&buffers).iter().for_each(draw_mesh);

    set_default_camera();
    buffers.face_count()
}

/// Helper to draw text labels
fn draw_text_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Colour code a timing in milliseconds
fn timing_color(ms: f32) -> Color {
    if ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if ms < 16.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else if ms < 50.0 {
        Color::from_rgba(255, 165, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    }
}

/// Draw the info overlay
pub fn draw_hud(sim: &Simulation, faces: usize, render_ms: f32) {
    let x = 12.0;
    let cells = sim.dimensions().len();

    let labels = [
        (format!("Rule: {}", sim.rule.name()), 20.0, 18.0, WHITE),
        (format!("Generation: {}", sim.generation), 40.0, 18.0, Color::from_rgba(0, 255, 150, 255)),
        (
            format!(
                "Cells: {} | Visible: {} | Faces: {}",
                format_number(cells),
                format_number(sim.state.grid().population()),
                format_number(faces)
            ),
            60.0,
            14.0,
            GRAY,
        ),
        (format!("Update: {:.1}ms", sim.last_update_time_ms), 80.0, 14.0, timing_color(sim.last_update_time_ms)),
        (format!("Mesh: {:.1}ms", sim.last_mesh_time_ms), 96.0, 14.0, timing_color(sim.last_mesh_time_ms)),
        (format!("Render: {:.1}ms", render_ms), 112.0, 14.0, timing_color(render_ms)),
        (format!("{} | FPS: {}", sim.algorithm.name(), get_fps()), 128.0, 14.0, GRAY),
        (format!("{:.1} gen/s", sim.updates_per_second), 148.0, 14.0, Color::from_rgba(180, 180, 180, 255)),
        (
            (if sim.is_running { "Running" } else { "Paused" }).to_owned(),
            168.0,
            16.0,
            if sim.is_running {
                Color::from_rgba(0, 255, 0, 255)
            } else {
                Color::from_rgba(255, 165, 0, 255)
            },
        ),
    ];

    labels.iter().for_each(|(text, y, size, color)| {
        draw_text_label(text, x, *y, *size, *color);
    });

    let help = "Space: Play  N: Step  R: Random  C: Clear  Tab: Rule  P: Par  Up/Down: Speed  Drag: Orbit  Wheel: Zoom  H: Home";
    draw_text_label(help, x, screen_height() - 12.0, 13.0, GRAY);
}
