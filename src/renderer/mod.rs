//! Software rasterizer
//!
//! Draws meshes onto any [`Surface`] with integer-only line stepping:
//! - Bresenham lines with steep-axis swapping
//! - Orthographic projection from normalized device space
//! - Optional filled triangles via integer edge functions
//!
//! Faces are drawn in mesh order with no depth buffer; later faces overdraw
//! earlier ones.

pub mod color;
pub mod mesh;
pub mod raster;
pub mod surface;

pub use color::Color;
pub use mesh::{Face, Mesh, MeshError};
pub use raster::{RenderMode, draw_line, fill_triangle, project_vertex, render_mesh, render_mesh_with};
pub use surface::{GlyphCanvas, PixelBuffer, Surface};
