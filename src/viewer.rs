//! Viewer builder and runner

use winit::event_loop::{ControlFlow, EventLoop};

use crate::error::ViewerError;
use crate::params::GalaxyParameters;
use crate::window::App;

/// Window and generator settings for a viewer run.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Parameters of the first galaxy.
    pub params: GalaxyParameters,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Galaxy Generator".to_string(),
            width: 1280,
            height: 720,
            params: GalaxyParameters::default(),
            seed: None,
        }
    }
}

/// Interactive galaxy viewer.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// use galaxy::{GalaxyParameters, GalaxyViewer, ParamField};
///
/// GalaxyViewer::new()
///     .with_parameters(GalaxyParameters::default().with(ParamField::Branches, 5.0))
///     .with_seed(7)
///     .run()?;
/// ```
pub struct GalaxyViewer {
    config: ViewerConfig,
}

impl GalaxyViewer {
    pub fn new() -> Self {
        Self {
            config: ViewerConfig::default(),
        }
    }

    /// Set the parameters of the first galaxy.
    pub fn with_parameters(mut self, params: GalaxyParameters) -> Self {
        self.config.params = params;
        self
    }

    /// Make generation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Run the viewer. Blocks until the window is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        // The render loop requests every frame itself.
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;
        app.into_result()
    }
}

impl Default for GalaxyViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamField;

    #[test]
    fn test_builder_sets_config() {
        let viewer = GalaxyViewer::new()
            .with_parameters(GalaxyParameters::default().with(ParamField::Spin, -2.0))
            .with_seed(5)
            .with_title("Test")
            .with_window_size(800, 600);

        let config = &viewer.config;
        assert_eq!(config.params.spin(), -2.0);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.title, "Test");
        assert_eq!((config.width, config.height), (800, 600));
    }
}
