//! Window, graphics context and presentation
//!
//! - **`surface`**: the [`Surface`] trait the frame loop drives, plus the
//!   forced-resolution rule
//! - **`context`**: the GLFW/OpenGL implementation and its bootstrap

pub mod context;
pub mod surface;

pub use context::{ContextError, GlfwSurface};
pub use surface::{effective_resolution, scale_factor, Resolution, Surface};
