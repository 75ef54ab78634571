//! Terminal frontend for the pyra scene
//!
//! Rasterizes the selected mesh to colored ASCII and drives a `FlyCamera`
//! from keyboard and mouse events.
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyEvent, KeyEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use pyra_core::config::SceneConfig;
use pyra_core::{
    Config, FlyCamera, FrameClock, Mat4, Mesh, MoveKeys, Projection, RotationState, Transform,
    Vec3,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod input;
pub mod renderer;

pub use input::{press_key, KeyAction};
pub use renderer::AsciiRenderer;

/// Radians per second of the scene's circular drift.
const ORBIT_RATE: f32 = 4.1887902;
const TARGET_FRAME_TIME: Duration = Duration::from_millis(1000 / 30);

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    camera: FlyCamera,
    projection: Projection,
    renderer: AsciiRenderer,
    clock: FrameClock,
    scene: SceneConfig,
    rotation: RotationState,
    running: bool,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &Config) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let (width_px, height_px) = input::viewport_pixels(columns, rows);
        let p = &config.projection;

        let mesh = Mesh::from_shape(config.scene.shape);
        log::info!(
            "rendering {} ({} vertices) at {columns}x{rows} cells",
            config.scene.shape,
            mesh.vertex_count()
        );

        Ok(Self {
            mesh,
            camera: FlyCamera::from_config(&config.camera),
            projection: Projection::new(p.fov_x, width_px, height_px, p.z_near, p.z_far),
            renderer: AsciiRenderer::new(columns as usize, rows as usize),
            clock: FrameClock::new(),
            rotation: config.scene.initial_rotation(),
            scene: config.scene.clone(),
            running: true,
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        self.main_loop()
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.clock.reset();

        while self.running {
            let frame_start = Instant::now();

            let mut keys = MoveKeys::default();
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?, &mut keys);
            }
            if !self.running {
                break;
            }

            let ft = self.clock.tick();
            self.camera.update(keys, ft.dt);
            self.scene.advance(&mut self.rotation, ft.dt);
            self.render(ft.elapsed)?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < TARGET_FRAME_TIME {
                std::thread::sleep(TARGET_FRAME_TIME - elapsed);
            }

            let now = Instant::now();
            let window = now - self.last_fps_sample;
            if window.as_secs() >= 1 {
                self.fps = self.frame_count as f32 / window.as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        log::info!("terminal renderer stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: Event, keys: &mut MoveKeys) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if press_key(keys, code) == KeyAction::Quit {
                    self.running = false;
                }
            }
            Event::Mouse(mouse) => {
                if let Some((x, y)) = input::pointer_position(&mouse) {
                    self.camera.on_pointer_motion(x, y);
                }
            }
            Event::Resize(columns, rows) => {
                log::debug!("terminal resized to {columns}x{rows}");
                self.renderer.resize(columns as usize, rows as usize);
                let (width_px, height_px) = input::viewport_pixels(columns, rows);
                self.projection.set_aspect(width_px, height_px);
            }
            Event::FocusLost => self.camera.reset_pointer(),
            _ => {}
        }
    }

    fn render(&mut self, elapsed: f32) -> io::Result<()> {
        let model = orbit_model(self.scene.orbit_radius, elapsed, &self.rotation);
        let view = self.camera.view_matrix();
        let mvp = Transform::mvp_matrix(&model, &view, &self.projection.matrix());

        self.renderer.clear();
        self.renderer.render_mesh(&self.mesh, &mvp, self.camera.front());

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        let pos = self.camera.position();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "pyra | FPS: {:.1} | pos ({:.1}, {:.1}, {:.1}) | WASD/Arrows=Move Mouse=Look Q=Quit",
                self.fps, pos.x, pos.y, pos.z
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}

/// Raw mode plus alternate screen, mouse and focus reporting for as long as
/// it lives. Dropping it restores the terminal, including on error paths.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        enter_screen(&mut stdout())?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Both steps run even if the first fails
        let raw = terminal::disable_raw_mode();
        let screen = leave_screen(&mut stdout());
        if let Err(e) = raw.and(screen) {
            log::warn!("could not restore the terminal: {e}");
        }
    }
}

fn enter_screen<W: Write>(w: &mut W) -> io::Result<()> {
    execute!(
        w,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        cursor::Hide
    )
}

fn leave_screen<W: Write>(w: &mut W) -> io::Result<()> {
    execute!(
        w,
        DisableFocusChange,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show
    )
}

/// Model matrix: `rotation` plus the circular drift in the XY plane.
fn orbit_model(radius: f32, elapsed: f32, rotation: &RotationState) -> Mat4 {
    let angle = ORBIT_RATE * elapsed;
    let offset = Vec3::new(angle.cos(), angle.sin(), 0.0) * radius;
    Transform::model_matrix(offset, rotation, Vec3::splat(1.0))
}
