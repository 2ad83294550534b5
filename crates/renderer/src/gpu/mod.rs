//! GPU object lifecycle for the triangle demo.
//!
//! - `backend` is the narrow [`GlApi`] seam, implemented for `glow::Context`.
//! - `pipeline` compiles and links the triangle program and writes its
//!   uniforms each frame.
//! - `geometry` owns the vertex array and buffer for the fixed triangle.
//!
//! Every object created here has exactly one matching delete, issued in
//! reverse creation order by [`crate::app::App::teardown`].

mod backend;
mod geometry;
mod pipeline;
#[cfg(test)]
pub(crate) mod recording;

pub use backend::{ContextInfo, GlApi};
pub use geometry::{TriangleGeometry, TRIANGLE_VERTICES};
pub use pipeline::{ShaderProgram, ANGLE_UNIFORM, COLOR_UNIFORM};
