//! Line and triangle rasterization

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::mesh::Mesh;
use super::surface::Surface;
use crate::math::{Vector2, Vector3};

/// How mesh faces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Three Bresenham edges per face
    #[default]
    Wireframe,
    /// Solid faces via edge functions
    Filled,
}

/// Draw a line from (x0, y0) to (x1, y1) inclusive using Bresenham's algorithm
///
/// Integer-only. Steep lines iterate along y so every unit step on the long
/// axis plots exactly one pixel. Endpoints are put in canonical order first,
/// so swapping them produces the same pixel set. Only the stretch of the long
/// axis that crosses the surface is walked; the error term is advanced to
/// that point in closed form, so clipped lines plot exactly the pixels the
/// full walk would have.
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);

    let steep = (i64::from(y1) - i64::from(y0)).abs() > (i64::from(x1) - i64::from(x0)).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = i64::from(x1) - i64::from(x0);
    let dy = (i64::from(y1) - i64::from(y0)).abs();
    let y_step = if y1 > y0 { 1 } else { -1 };

    let extent = if steep { surface.height() } else { surface.width() } as i64;
    let first = i64::from(x0).max(0);
    let last = i64::from(x1).min(extent - 1);
    if first > last {
        return;
    }

    let skipped = first - i64::from(x0);
    let steps = minor_steps(skipped, dx, dy);
    let mut y = i64::from(y0) + y_step * steps;
    // Always within (-dx, dx]
    let mut error = (2 * i128::from(dy) * i128::from(skipped) - 2 * i128::from(dx) * i128::from(steps)) as i64;

    for x in first..=last {
        if steep {
            surface.set(y as i32, x as i32, color);
        } else {
            surface.set(x as i32, y as i32, color);
        }
        error += 2 * dy;
        if error > dx {
            y += y_step;
            error -= 2 * dx;
        }
    }
}

/// Minor-axis steps taken after `k` iterations of the Bresenham walk
///
/// The smallest `n` with `2*dy*k - 2*dx*n <= dx`.
fn minor_steps(k: i64, dx: i64, dy: i64) -> i64 {
    if dx == 0 {
        return 0;
    }
    let num = 2 * i128::from(dy) * i128::from(k) - i128::from(dx);
    let den = 2 * i128::from(dx);
    (-(-num).div_euclid(den)) as i64
}

/// Map a vertex in normalized device space ([-1, 1]) to integer screen coordinates
///
/// Orthographic: z is ignored and there is no perspective divide.
/// `x = (v.x + 1) * width / 2`, truncated toward zero; same for y.
pub fn project_vertex(v: Vector3<f32>, screen_width: usize, screen_height: usize) -> (i32, i32) {
    let x = (v.x + 1.0) * screen_width as f32 / 2.0;
    let y = (v.y + 1.0) * screen_height as f32 / 2.0;
    (x as i32, y as i32)
}

/// Signed doubled area of (a, b, p); positive when p is left of a->b
///
/// Widened to i128 so saturated screen coordinates cannot overflow.
#[inline]
fn edge_function(a: Vector2<i64>, b: Vector2<i64>, p: Vector2<i64>) -> i128 {
    i128::from(p.x - a.x) * i128::from(b.y - a.y) - i128::from(p.y - a.y) * i128::from(b.x - a.x)
}

/// Fill a screen-space triangle
///
/// Walks the bounding box (clamped to the surface) and plots every pixel
/// whose integer edge functions agree in sign with the triangle's area.
/// Pixels on an edge are included. Degenerate triangles fall back to their
/// outline so a collapsed face still shows up.
pub fn fill_triangle<S: Surface + ?Sized>(
    surface: &mut S,
    p0: (i32, i32),
    p1: (i32, i32),
    p2: (i32, i32),
    color: Color,
) {
    let to_vec = |p: (i32, i32)| Vector2::new(i64::from(p.0), i64::from(p.1));
    let (v0, v1, v2) = (to_vec(p0), to_vec(p1), to_vec(p2));

    let area = edge_function(v0, v1, v2);
    if area == 0 {
        draw_line(surface, p0.0, p0.1, p1.0, p1.1, color);
        draw_line(surface, p1.0, p1.1, p2.0, p2.1, color);
        draw_line(surface, p2.0, p2.1, p0.0, p0.1, color);
        return;
    }

    if surface.width() == 0 || surface.height() == 0 {
        return;
    }
    let max_x = surface.width() as i64 - 1;
    let max_y = surface.height() as i64 - 1;
    let min_x = v0.x.min(v1.x).min(v2.x).max(0);
    let max_x = v0.x.max(v1.x).max(v2.x).min(max_x);
    let min_y = v0.y.min(v1.y).min(v2.y).max(0);
    let max_y = v0.y.max(v1.y).max(v2.y).min(max_y);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vector2::new(x, y);
            let w0 = edge_function(v1, v2, p);
            let w1 = edge_function(v2, v0, p);
            let w2 = edge_function(v0, v1, p);

            let inside = if area > 0 {
                w0 >= 0 && w1 >= 0 && w2 >= 0
            } else {
                w0 <= 0 && w1 <= 0 && w2 <= 0
            };
            if inside {
                surface.set(x as i32, y as i32, color);
            }
        }
    }
}

/// Draw every face edge of a mesh as a wireframe
///
/// Edges shared between faces are drawn once per face.
pub fn render_mesh<S: Surface + ?Sized>(mesh: &Mesh, surface: &mut S, color: Color) {
    render_mesh_with(mesh, surface, color, RenderMode::Wireframe);
}

/// Draw a mesh in the given mode, faces in mesh order
pub fn render_mesh_with<S: Surface + ?Sized>(
    mesh: &Mesh,
    surface: &mut S,
    color: Color,
    mode: RenderMode,
) {
    let (width, height) = (surface.width(), surface.height());
    let vertices = mesh.vertices();

    for face in mesh.faces() {
        let projected = face
            .indices
            .map(|i| project_vertex(vertices[i], width, height));

        match mode {
            RenderMode::Wireframe => {
                for j in 0..3 {
                    let (x0, y0) = projected[j];
                    let (x1, y1) = projected[(j + 1) % 3];
                    draw_line(surface, x0, y0, x1, y1, color);
                }
            }
            RenderMode::Filled => {
                fill_triangle(surface, projected[0], projected[1], projected[2], color);
            }
        }
    }
}
