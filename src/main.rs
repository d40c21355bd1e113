use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::Orientation;
use crate::canvas::FrameBuffer;
use crate::clock::{FpsCounter, FrameClock};
use crate::config::{DEFAULT_CONFIG_PATH, Settings};
use crate::error::AppError;
use crate::palette::Palette;
use crate::scaler::StretchTable;
use crate::world::{DEFAULT_MAP, Grid};

mod camera;
mod canvas;
mod clock;
mod config;
mod error;
mod input;
mod logging;
mod minimap;
mod movement;
mod palette;
mod renderer;
mod scaler;
mod vector;
mod world;

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    settings: Settings,
    grid: Grid,
    view: Orientation,
    palette: Palette,
    show_minimap: bool,

    // Fixed-size internal frame, stretched to the window on present
    frame: Vec<u32>,
    stretch: StretchTable,

    keys_down: HashSet<KeyCode>,
    clock: FrameClock,
    fps: FpsCounter,

    // First fatal error raised inside a callback, returned from main
    error: Option<AppError>,
}

impl App {
    fn new(settings: Settings, grid: Grid) -> Result<Self, AppError> {
        let view = settings.start_orientation(&grid)?;
        log::info!("field of view {:.1} degrees", view.fov_degrees());
        let frame = vec![0; settings.screen_width as usize * settings.screen_height as usize];
        Ok(Self {
            window: None,
            surface: None,
            show_minimap: settings.show_minimap,
            settings,
            grid,
            view,
            palette: Palette::default(),
            frame,
            stretch: StretchTable::default(),
            keys_down: HashSet::new(),
            clock: FrameClock::new(Duration::from_millis(100)),
            fps: FpsCounter::new(Instant::now()),
            error: None,
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_resizable(true)
            .with_inner_size(LogicalSize::new(
                self.settings.screen_width,
                self.settings.screen_height,
            ));

        let window = Rc::new(event_loop.create_window(attributes)?);
        window.set_cursor_visible(false);

        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    /// One simulation step from the currently held keys.
    fn tick(&mut self) {
        let dt = self.clock.tick(Instant::now());
        let controls = input::controls_from_keys(&self.keys_down);
        movement::step(&self.grid, &mut self.view, controls, dt, self.settings.rates());
    }

    fn draw_frame(&mut self) {
        let (w, h) = (
            self.settings.screen_width as usize,
            self.settings.screen_height as usize,
        );
        let mut fb = FrameBuffer::new(&mut self.frame, w, h);
        renderer::render_frame(&mut fb, &self.grid, &self.view, &self.palette);
        if self.show_minimap {
            minimap::render_minimap(
                &mut fb,
                &self.grid,
                &self.view,
                &self.palette,
                self.settings.minimap_width,
                self.settings.minimap_height,
            );
        }
    }

    fn present(&mut self, id: WindowId) -> Result<(), AppError> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // minimized
        };
        surface.resize(dw, dh)?;

        let (dw, dh) = (dw.get() as usize, dh.get() as usize);
        if !self.stretch.matches(dw, dh) {
            self.stretch = StretchTable::new(
                dw,
                dh,
                self.settings.screen_width as usize,
                self.settings.screen_height as usize,
            );
        }

        let mut buf = surface.buffer_mut()?;
        self.stretch.blit(&mut buf, &self.frame);
        buf.present()?;

        if let Some(fps) = self.fps.frame(Instant::now()) {
            log::debug!("FPS: {fps:.1}");
        }
        window.request_redraw();
        Ok(())
    }

    fn key(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed => {
                if code == input::TOGGLE_MINIMAP && !repeat {
                    self.show_minimap = !self.show_minimap;
                    log::debug!("minimap {}", if self.show_minimap { "on" } else { "off" });
                }
                self.keys_down.insert(code);
            }
            ElementState::Released => {
                self.keys_down.remove(&code);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.create_window(event_loop) {
                self.fail(event_loop, err);
                return;
            }
        }
        // No movement on the first frame after (re)starting
        self.clock.reset();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::Focused(false) => self.keys_down.clear(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.key(code, state, repeat),

            WindowEvent::RedrawRequested => {
                self.tick();
                self.draw_frame();
                if let Err(err) = self.present(id) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(size) => {
                log::debug!("window resized to {}x{}", size.width, size.height);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), AppError> {
    // An explicit path must exist; the default one is optional
    let (path, required) = match std::env::args_os().nth(1) {
        Some(arg) => (PathBuf::from(arg), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let settings = Settings::load(&path, required)?;
    logging::init(settings.log_level)?;

    let grid = Grid::from_rows(&DEFAULT_MAP)?;
    log::info!(
        "map {}x{}, view {}x{}, start ({}, {})",
        grid.width(),
        grid.height(),
        settings.screen_width,
        settings.screen_height,
        settings.start_x,
        settings.start_y
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, grid)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
