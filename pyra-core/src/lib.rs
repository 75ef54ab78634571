//! Pyra core library - camera and transform math shared by the frontends
//!
//! Vector/matrix primitives, view and projection construction, the
//! first-person camera, the demo meshes, frame timing, configuration and
//! logging setup. Nothing here touches a window or a GPU.

pub mod camera;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod projection;
pub mod time;
pub mod transform;

// Re-export commonly used types
pub use camera::{FlyCamera, MoveKeys};
pub use config::{Config, ConfigError};
pub use geometry::{Mesh, Shape, Triangle, Vertex};
pub use math::{Mat4, Vec3, Vec4};
pub use projection::Projection;
pub use time::{FrameClock, FrameTime};
pub use transform::{RotationState, Transform};
