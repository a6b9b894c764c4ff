//! # Galaxy - procedural spiral galaxy viewer
//!
//! Generates a spiral galaxy point cloud from a handful of parameters,
//! renders it in real time with additive blending, and regenerates it
//! whenever the operator commits a change in the control panel.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     GalaxyViewer::new()
//!         .with_parameters(
//!             GalaxyParameters::default()
//!                 .with(ParamField::Branches, 5.0)
//!                 .with(ParamField::Spin, -1.2),
//!         )
//!         .run()
//! }
//! ```
//!
//! ## Generating without a window
//!
//! The generator is a plain function of the parameters and an RNG:
//!
//! ```ignore
//! use galaxy::{generate, GalaxyParameters};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let points = generate(&GalaxyParameters::default(), &mut rng)?;
//! assert_eq!(points.len(), 100_000);
//! ```
//!
//! ## Parameters
//!
//! | field | range | step |
//! |-------|-------|------|
//! | count | 100 - 1 000 000 | 100 |
//! | size | 0.001 - 0.1 | 0.001 |
//! | radius | 0.01 - 20 | 0.01 |
//! | branches | 2 - 20 | 1 |
//! | spin | -5 - 5 | 0.001 |
//! | randomness | 0 - 2 | 0.001 |
//! | randomness power | 1 - 10 | 0.001 |
//!
//! ## Regeneration
//!
//! A commit builds the new point cloud completely before the old one is
//! released and detached. If generation or the GPU upload fails, the old
//! galaxy stays on screen and the error is reported in the panel.

pub mod camera;
pub mod controls;
pub mod error;
pub mod generator;
mod gpu;
#[cfg(feature = "egui")]
pub mod panel;
pub mod params;
pub mod regenerate;
pub mod render_loop;
pub mod resource;
pub mod shader;
pub mod time;
mod viewer;
mod window;

pub use camera::OrbitCamera;
pub use controls::ControlBinding;
pub use error::{
    FrameError, GenerationError, GpuError, RegenerationError, ResourceError, ViewerError,
};
pub use generator::{generate, BlendMode, GalaxyGenerator, GalaxyPoints, PointMaterial};
pub use glam::Vec3;
pub use params::{GalaxyParameters, ParamField, ParamSpec};
pub use regenerate::{RegenerationManager, RegenerationReport};
pub use render_loop::{
    CameraControls, FrameRenderer, FrameScheduler, LoopState, RenderLoop, TickOutcome,
};
pub use resource::{PointCloud, PointCloudBuilder, Scene};
pub use viewer::{GalaxyViewer, ViewerConfig};

/// Common imports.
pub mod prelude {
    pub use crate::{
        GalaxyParameters, GalaxyViewer, ParamField, RegenerationError, Vec3, ViewerError,
    };
}
