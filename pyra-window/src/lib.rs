//! Windowed renderer for the pyra demo scene
//!
//! One window, one shader program, one static vertex buffer, driven by the
//! `pyra_core` fly camera.

pub mod app;
pub mod error;
pub mod gpu;
pub mod input;
pub mod renderer;
pub mod uniforms;

pub use app::{run, App, AppControl};
pub use error::{InitError, ShaderError};
