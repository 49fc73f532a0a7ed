//! WebGPU rendering module
//!
//! A single triangle-list pipeline with per-vertex color. Shapes are
//! tessellated on the CPU in canvas pixel space each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
