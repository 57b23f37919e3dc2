//! Winit application runner
//!
//! - [`App`]: builder for window, renderer and mascot settings
//! - `AppRunner`: winit `ApplicationHandler` owning the scene, viewport and
//!   renderer
//! - [`viewport`]: frame callbacks and key listeners
//! - [`input_adapter`]: winit to platform-agnostic input translation
//!
//! ```rust,ignore
//! fn main() -> anyhow::Result<()> {
//!     env_logger::init();
//!     mascot::App::new().run()?;
//!     Ok(())
//! }
//! ```

pub mod input_adapter;
pub mod viewport;

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::AssetServer;
use crate::errors::{Error, Result};
use crate::mascot::{LightingSettings, MascotSettings, MascotWithEyes, MountHandle, ReadySignal};
use crate::render::{RenderSettings, Renderer};
use crate::scene::Scene;
use crate::utils::Timer;

use self::input_adapter::translate_key_event;
use self::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub render: RenderSettings,
    pub lighting: LightingSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            title: "Mascot".into(),
            width: 1280,
            height: 720,
            render: RenderSettings::default(),
            lighting: LightingSettings::default(),
        }
    }
}

impl AppSettings {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.render.vsync = vsync;
        self
    }

    /// Window title while the model is still loading.
    #[must_use]
    pub fn loading_title(&self) -> String {
        format!("{} - Loading...", self.title)
    }
}

/// Application builder.
#[derive(Default)]
pub struct App {
    settings: AppSettings,
    mascot: MascotSettings,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AppSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_mascot(mut self, mascot: MascotSettings) -> Self {
        self.mascot = mascot;
        self
    }

    /// Opens the window and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the event loop, window or GPU cannot be created.
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let assets = AssetServer::new();
        // Start reading the model before the window even exists
        assets.preload(&self.mascot.model_path);

        let mut runner = AppRunner::new(self.settings, self.mascot, assets);
        event_loop.run_app(&mut runner)?;

        match runner.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppRunner {
    settings: AppSettings,

    window: Option<Arc<Window>>,
    renderer: Renderer,
    scene: Scene,
    viewport: Viewport,

    mascot: MascotWithEyes,
    mount: Option<MountHandle>,
    ready: ReadySignal,
    loading_title_shown: bool,

    timer: Timer,
    fatal: Option<Error>,
}

impl AppRunner {
    fn new(settings: AppSettings, mascot: MascotSettings, assets: AssetServer) -> Self {
        let renderer = Renderer::new(settings.render.clone());
        let mascot = MascotWithEyes::new(mascot, assets);
        let ready = mascot.ready_signal();

        let mut scene = Scene::new();
        scene.camera.set_aspect(settings.width as f32 / settings.height.max(1) as f32);
        settings.lighting.add_to(&mut scene);

        Self {
            settings,
            window: None,
            renderer,
            scene,
            viewport: Viewport::new(),
            mascot,
            mount: None,
            ready,
            loading_title_shown: false,
            timer: Timer::new(),
            fatal: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.settings.loading_title())
            .with_inner_size(winit::dpi::LogicalSize::new(self.settings.width, self.settings.height));
        let window = Arc::new(event_loop.create_window(attributes)?);
        self.loading_title_shown = true;

        log::info!("Initializing Renderer Backend...");
        pollster::block_on(self.renderer.init(window.clone()))?;

        let size = window.inner_size();
        if size.height > 0 {
            self.scene.camera.set_aspect(size.width as f32 / size.height as f32);
        }

        self.mount = Some(self.mascot.mount(&mut self.viewport));
        self.timer.reset_delta();
        self.window = Some(window);
        Ok(())
    }

    fn update(&mut self) {
        self.timer.tick();
        self.viewport.frame(&mut self.scene, self.timer.dt_seconds());

        if self.loading_title_shown && self.ready.is_ready() {
            if let Some(window) = &self.window {
                window.set_title(&self.settings.title);
            }
            self.loading_title_shown = false;
        }
    }

    fn unmount(&mut self) {
        if let Some(handle) = self.mount.take()
            && let Some(group) = handle.unmount(&mut self.viewport)
        {
            self.scene.remove_node(group);
        }
    }
}

impl ApplicationHandler for AppRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            log::error!("Fatal startup error: {e}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size.width, size.height);
                if size.height > 0 {
                    self.scene.camera.set_aspect(size.width as f32 / size.height as f32);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.viewport.dispatch_key(&translate_key_event(&event));
            }
            WindowEvent::RedrawRequested => {
                self.update();
                self.renderer.render(&self.scene, !self.ready.is_ready());
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }
}
