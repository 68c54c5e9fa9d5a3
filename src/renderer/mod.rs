//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat-colored triangle list every frame.

pub mod error;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use error::RenderError;
pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::{Palette, Vertex};
