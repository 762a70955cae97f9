//! platform_winit: window + input + present loop (winit 0.30).
//!
//! Provides `run()` that creates a window and drives the `render_wgpu::Viewer`
//! via winit's ApplicationHandler API. Key codes, drags and wheel deltas are
//! translated here; the viewer only sees named actions and plain deltas.

pub mod drag;
pub mod keymap;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use render_wgpu::{Viewer, ViewerObserver};
use viewer_core::{PipelineVariant, ViewerConfig, ViewerError};
use wgpu::SurfaceError;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{ModifiersState, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use drag::{DragMode, DragTracker};

pub const APP_NAME: &str = "matcap-viewer";

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: ViewerConfig,
    /// Mesh to open once the window is up.
    pub mesh: Option<PathBuf>,
}

/// Window title: app name, file, triangle count and draw mode.
pub fn window_title(file: Option<&str>, triangles: usize, variant: PipelineVariant) -> String {
    match file {
        Some(f) => format!("{APP_NAME} - {f} ({triangles} triangles, {})", variant.label()),
        None => format!("{APP_NAME} - drop a .obj, .gltf or .glb file"),
    }
}

/// Line deltas are scaled to points; pixel deltas pass through.
pub fn scroll_amount(delta: MouseScrollDelta, line_points: f32) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y * line_points,
        MouseScrollDelta::PixelDelta(p) => p.y as f32,
    }
}

/// Keeps the window title in sync with what is on screen.
struct TitleObserver {
    window: Arc<Window>,
    file: Option<String>,
    triangles: usize,
    variant: PipelineVariant,
}

impl TitleObserver {
    fn refresh(&self) {
        self.window
            .set_title(&window_title(self.file.as_deref(), self.triangles, self.variant));
    }
}

impl ViewerObserver for TitleObserver {
    fn mesh_loaded(&mut self, path: &Path, _vertex_count: usize, triangle_count: usize) {
        self.file = path.file_name().map(|n| n.to_string_lossy().into_owned());
        self.triangles = triangle_count;
        self.refresh();
    }

    fn mesh_load_failed(&mut self, path: &Path, error: &ViewerError) {
        log::warn!("keeping current mesh; {} rejected: {error}", path.display());
    }

    fn pipeline_changed(&mut self, variant: PipelineVariant) {
        self.variant = variant;
        self.refresh();
    }
}

struct App {
    opts: RunOptions,
    window: Option<Arc<Window>>,
    state: Option<Viewer>,
    drag: DragTracker,
    modifiers: ModifiersState,
}

impl App {
    fn new(opts: RunOptions) -> Self {
        Self {
            opts,
            window: None,
            state: None,
            drag: DragTracker::new(),
            modifiers: ModifiersState::empty(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title(window_title(None, 0, PipelineVariant::default()))
                .with_inner_size(PhysicalSize::new(1280, 720)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let cfg = &self.opts.config;
        let observer = TitleObserver {
            window: window.clone(),
            file: None,
            triangles: 0,
            variant: PipelineVariant::from_flags(cfg.start_wireframe, cfg.start_flat),
        };
        let mut state = match pollster::block_on(Viewer::new(window.clone(), cfg, Box::new(observer))) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Viewer init failed: {e:#}");
                event_loop.exit();
                return;
            }
        };
        if let Some(path) = self.opts.mesh.take() {
            state.on_load_mesh(&path);
        }
        window.request_redraw();
        self.window = Some(window);
        self.state = Some(state);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let (Some(window), Some(state)) = (&self.window, &mut self.state) else {
            return;
        };
        if window.id() != window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.on_resize(size),
            WindowEvent::RedrawRequested => match state.on_frame_tick() {
                Ok(_) => {}
                Err(SurfaceError::Lost | SurfaceError::Outdated) => state.reconfigure_surface(),
                Err(SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("frame skipped: {e}"),
            },
            WindowEvent::ModifiersChanged(m) => self.modifiers = m.state(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let physical = match event.physical_key {
                    PhysicalKey::Code(code) => Some(code),
                    PhysicalKey::Unidentified(_) => None,
                };
                if let Some(action) = keymap::action_for_event(&event.logical_key, physical) {
                    state.apply(action);
                }
            }
            WindowEvent::MouseInput { state: s, button, .. } => match s {
                ElementState::Pressed => self.drag.press(button, self.modifiers.control_key()),
                ElementState::Released => self.drag.release(button),
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(g) = self.drag.cursor_moved(position.x, position.y) {
                    match g.mode {
                        DragMode::Rotate => state.on_drag_rotate(g.dx, g.dy),
                        DragMode::Pan => state.on_drag_pan(g.dx, g.dy),
                    }
                }
            }
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => self.drag.release_all(),
            WindowEvent::MouseWheel { delta, .. } => {
                state.on_scroll_zoom(scroll_amount(delta, self.opts.config.scroll_line_points));
            }
            WindowEvent::DroppedFile(path) => {
                state.on_load_mesh(&path);
            }
            _ => {}
        }
    }
}

fn is_headless() -> bool {
    if std::env::var("MV_HEADLESS").map(|v| v == "1").unwrap_or(false) {
        return true;
    }
    #[cfg(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd",
    ))]
    {
        if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none() {
            return true;
        }
    }
    false
}

pub fn run(opts: RunOptions) -> anyhow::Result<()> {
    if is_headless() {
        log::warn!("no display available, not opening a window");
        return Ok(());
    }
    let event_loop = EventLoop::new()?;
    let mut app = App::new(opts);
    event_loop.run_app(&mut app)?;
    Ok(())
}
