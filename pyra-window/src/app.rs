use std::sync::Arc;

use anyhow::{Context, Result};
use pyra_core::config::SceneConfig;
use pyra_core::{
    Config, FlyCamera, FrameClock, Mesh, MoveKeys, Projection, RotationState, Transform, Vec3,
};
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowBuilder};

use crate::error::InitError;
use crate::gpu::{Gpu, SurfaceErrorAction};
use crate::input::{set_move_key, VirtualPointer};
use crate::renderer::SceneRenderer;
use crate::uniforms::Uniforms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// The render loop's state: one window, one mesh, one camera.
pub struct App {
    window: Arc<Window>,
    gpu: Gpu,
    scene: SceneRenderer,
    camera: FlyCamera,
    projection: Projection,
    clock: FrameClock,
    keys: MoveKeys,
    /// Set while the cursor is grabbed; look input then comes from raw
    /// mouse motion instead of cursor positions.
    pointer: Option<VirtualPointer>,
    scene_config: SceneConfig,
    rotation: RotationState,
}

impl App {
    pub fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(window.clone()))?;

        let mesh = Mesh::from_shape(config.scene.shape);
        let scene = SceneRenderer::new(&gpu, &mesh, config.scene.clear_color)?;

        let size = gpu.size();
        let p = &config.projection;
        let projection = Projection::new(p.fov_x, size.width, size.height, p.z_near, p.z_far);

        let pointer = (config.window.capture_cursor && capture_cursor(&window))
            .then(VirtualPointer::default);

        log::info!("rendering {} ({} vertices)", config.scene.shape, mesh.vertex_count());

        Ok(Self {
            window,
            gpu,
            scene,
            camera: FlyCamera::from_config(&config.camera),
            projection,
            clock: FrameClock::new(),
            keys: MoveKeys::default(),
            pointer,
            rotation: config.scene.initial_rotation(),
            scene_config: config.scene.clone(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Result<AppControl> {
        match event {
            WindowEvent::CloseRequested => return Ok(AppControl::Exit),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = *state == ElementState::Pressed;
                if *code == KeyCode::Escape && pressed {
                    log::info!("escape pressed, exiting");
                    return Ok(AppControl::Exit);
                }
                set_move_key(&mut self.keys, *code, pressed);
            }

            WindowEvent::Resized(size) => {
                log::debug!("resized to {}x{}", size.width, size.height);
                self.gpu.resize(*size);
                self.projection.set_aspect(size.width, size.height);
            }

            WindowEvent::CursorMoved { position, .. } if self.pointer.is_none() => {
                self.camera.on_pointer_motion(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } if self.pointer.is_none() => {
                self.camera.reset_pointer()
            }

            WindowEvent::Focused(false) => {
                self.keys = MoveKeys::default();
                self.camera.reset_pointer();
            }

            WindowEvent::RedrawRequested => return self.redraw(),

            _ => {}
        }

        Ok(AppControl::Continue)
    }

    /// Raw mouse motion; only used while the cursor is captured.
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if let Some(pointer) = &mut self.pointer {
            let (x, y) = pointer.accumulate(delta);
            self.camera.on_pointer_motion(x, y);
        }
    }

    fn redraw(&mut self) -> Result<AppControl> {
        let ft = self.clock.tick();
        self.camera.update(self.keys, ft.dt);
        self.scene_config.advance(&mut self.rotation, ft.dt);

        if !self.gpu.is_drawable() {
            return Ok(AppControl::Continue);
        }

        let model = Transform::model_matrix(Vec3::ZERO, &self.rotation, Vec3::splat(1.0));
        let uniforms = Uniforms::new(
            model,
            self.camera.view_matrix(),
            self.projection.matrix(),
            ft.elapsed,
            self.scene_config.orbit_radius,
        );
        self.scene.update_uniforms(self.gpu.queue(), &uniforms);

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(err.clone()) {
                    SurfaceErrorAction::Fatal => Err(anyhow::anyhow!("surface error: {err}")),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(AppControl::Continue)
                    }
                };
            }
        };

        self.scene
            .draw(&mut frame.encoder, &frame.view, self.gpu.depth_view());
        self.gpu.submit(frame);

        log::trace!("frame {} dt={:.4}", ft.frame_index, ft.dt);
        Ok(AppControl::Continue)
    }
}

/// Returns false when the platform refuses both grab modes.
fn capture_cursor(window: &Window) -> bool {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        log::warn!("cursor capture unavailable: {e}");
        return false;
    }
    window.set_cursor_visible(false);
    true
}

/// Opens the window and runs the render loop until it is closed.
pub fn run(config: &Config) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| InitError::event_loop(e))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = WindowBuilder::new()
        .with_title(config.window.title.as_str())
        .with_inner_size(LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
        .build(&event_loop)
        .map_err(|e| InitError::window(e))?;
    let mut app = App::new(Arc::new(window), config)?;

    let mut fatal = None;
    event_loop
        .run(|event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == app.window().id() => {
                match app.handle_window_event(&event) {
                    Ok(AppControl::Continue) => {}
                    Ok(AppControl::Exit) => elwt.exit(),
                    Err(e) => {
                        fatal = Some(e);
                        elwt.exit();
                    }
                }
            }
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => app.handle_mouse_motion(delta),
            Event::AboutToWait => app.window().request_redraw(),
            _ => {}
        })
        .context("event loop terminated with error")?;

    match fatal {
        Some(e) => Err(e),
        None => {
            log::info!("window closed");
            Ok(())
        }
    }
}
