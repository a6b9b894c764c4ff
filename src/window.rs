use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::camera::OrbitCamera;
use crate::controls::ControlBinding;
use crate::error::{FrameError, ViewerError};
use crate::gpu::{FrameOverlay, GpuPointCloud, GpuState};
use crate::regenerate::RegenerationManager;
use crate::render_loop::{FrameRenderer, FrameScheduler, RenderLoop, TickOutcome};
use crate::resource::Scene;
use crate::viewer::ViewerConfig;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::{EguiFrameOutput, EguiIntegration};
#[cfg(feature = "egui")]
use crate::panel::{self, PanelOutput, PanelStats};
#[cfg(feature = "egui")]
use crate::params::GalaxyParameters;
#[cfg(feature = "egui")]
use crate::resource::PointCloud;

/// Frame requests go through winit's redraw mechanism.
struct RedrawRequest<'a>(&'a Window);

impl FrameScheduler for RedrawRequest<'_> {
    fn schedule_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Everything needed to draw one frame of the scene.
struct SceneFrame<'a> {
    gpu: &'a mut GpuState,
    points: Option<&'a GpuPointCloud>,
    overlay: Option<&'a mut dyn FrameOverlay>,
}

impl FrameRenderer<OrbitCamera> for SceneFrame<'_> {
    fn render_frame(&mut self, camera: &OrbitCamera) -> Result<(), FrameError> {
        self.gpu.render(camera, self.points, self.overlay.as_deref_mut())
    }
}

pub struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    scene: Scene<GpuPointCloud>,
    manager: RegenerationManager,
    controls: ControlBinding,
    render_loop: RenderLoop,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        let manager = match config.seed {
            Some(seed) => RegenerationManager::with_seed(seed),
            None => RegenerationManager::new(),
        };
        let controls = ControlBinding::new(config.params.clone());

        Self {
            config,
            window: None,
            gpu: None,
            #[cfg(feature = "egui")]
            egui: None,
            scene: Scene::new(OrbitCamera::new()),
            manager,
            controls,
            render_loop: RenderLoop::new(),
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<(), ViewerError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        let size = window.inner_size();
        self.scene.camera_mut().set_viewport(size.width, size.height);

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(gpu.device(), gpu.format(), &window));
        }

        let manager = &mut self.manager;
        let scene = &mut self.scene;
        let mut builder = gpu.point_cloud_builder();
        self.controls
            .force_commit(|params| manager.regenerate(params, &mut builder, scene))?;

        self.render_loop.start(&mut RedrawRequest(&window));
        self.window = Some(window);
        self.gpu = Some(gpu);
        log::info!("viewer ready");
        Ok(())
    }

    /// Run a commit through the binding into the regeneration manager.
    #[cfg(feature = "egui")]
    fn regenerate(&mut self, force: bool) {
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        let manager = &mut self.manager;
        let scene = &mut self.scene;
        let mut builder = gpu.point_cloud_builder();
        let regenerate =
            |params: &GalaxyParameters| manager.regenerate(params, &mut builder, scene);

        // Failures are logged by the manager and kept as panel status.
        if force {
            let _ = self.controls.force_commit(regenerate);
        } else {
            let _ = self.controls.commit(regenerate);
        }
    }

    #[cfg(feature = "egui")]
    fn run_panel(&mut self) -> Option<EguiFrameOutput> {
        let window = self.window.as_ref()?;
        let egui = self.egui.as_mut()?;

        let stats = PanelStats {
            fps: self.render_loop.clock().fps(),
            points: self.scene.points().map_or(0, |p| p.point_count()),
            generation: self.manager.generation(),
        };
        let controls = &mut self.controls;
        let mut panel_output = PanelOutput::default();
        let frame = egui.run(window, |ctx| {
            panel_output = panel::show(ctx, controls, &stats);
        });

        if panel_output.reseed {
            self.manager.reseed();
            self.regenerate(true);
        } else if panel_output.commit {
            self.regenerate(false);
        }
        Some(frame)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        #[cfg(feature = "egui")]
        let panel_frame = self.run_panel();

        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut()) else {
            return;
        };
        let (camera, points) = self.scene.frame_parts();

        #[cfg(feature = "egui")]
        let mut overlay = match (self.egui.as_mut(), panel_frame) {
            (Some(egui), Some(frame)) => Some(egui.overlay(frame)),
            _ => None,
        };
        #[cfg(feature = "egui")]
        let overlay_ref = overlay.as_mut().map(|o| o as &mut dyn FrameOverlay);
        #[cfg(not(feature = "egui"))]
        let overlay_ref: Option<&mut dyn FrameOverlay> = None;

        let mut frame = SceneFrame {
            gpu,
            points,
            overlay: overlay_ref,
        };
        let outcome = self
            .render_loop
            .tick(camera, &mut frame, &mut RedrawRequest(window));
        if outcome == TickOutcome::Exit {
            event_loop.exit();
        }
    }

    #[cfg(feature = "egui")]
    fn egui_consumed(&mut self, event: &WindowEvent) -> bool {
        match (self.egui.as_mut(), self.window.as_ref()) {
            (Some(egui), Some(window)) => {
                let consumed = egui.on_window_event(window, event);
                consumed || egui.wants_pointer()
            }
            _ => false,
        }
    }

    #[cfg(not(feature = "egui"))]
    fn egui_consumed(&mut self, _event: &WindowEvent) -> bool {
        false
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = self.egui_consumed(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.render_loop.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let (Some(gpu), Some(window)) = (&mut self.gpu, &self.window) {
                    gpu.resize(physical_size, window.scale_factor());
                }
                self.scene
                    .camera_mut()
                    .set_viewport(physical_size.width, physical_size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let (Some(gpu), Some(window)) = (&mut self.gpu, &self.window) {
                    gpu.resize(window.inner_size(), scale_factor);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed && !consumed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        self.scene.camera_mut().rotate(dx, dy);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.scene.camera_mut().zoom(scroll);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.render_loop.shutdown();
        self.scene.clear();
        log::info!("viewer closed");
    }
}
