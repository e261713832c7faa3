use crate::config::WindowConfig;
use crate::error::InitError;
use crate::glutils;
use crate::input::{PlatformState, PointerState};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Mod;
use sdl2::mouse::MouseButton;
use sdl2::video::{GLProfile, SwapInterval};

/// Delta time reported when there is no previous counter sample.
pub const FALLBACK_DELTA_TIME: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonId {
    // x, y
    Left(i32, i32),
    Right(i32, i32),
    Middle(i32, i32),
    Other(i32, i32),
}

impl MouseButtonId {
    fn from_sdl(button: MouseButton, x: i32, y: i32) -> Self {
        match button {
            MouseButton::Left => MouseButtonId::Left(x, y),
            MouseButton::Right => MouseButtonId::Right(x, y),
            MouseButton::Middle => MouseButtonId::Middle(x, y),
            _ => MouseButtonId::Other(x, y),
        }
    }
}

/// Owned copy of the SDL events the rest of the backend cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum IoEvents {
    Quit,
    // scancode
    KeyDown(i32),
    // scancode
    KeyUp(i32),
    // utf-8 text as delivered by the IME / keyboard layout
    TextInput(String),
    // x, y, xrel, yrel
    MouseMotion(i32, i32, i32, i32),
    MouseButtonUp(MouseButtonId),
    MouseButtonDown(MouseButtonId),
    // dx, dy (raw, may be larger than 1 on some devices)
    MouseWheel(i32, i32),
    // w, h in screen coordinates
    WindowResized(i32, i32),
    Other,
}

impl From<Event> for IoEvents {
    fn from(event: Event) -> Self {
        match event {
            Event::Quit { .. } => IoEvents::Quit,
            Event::KeyDown {
                scancode: Some(scancode),
                ..
            } => IoEvents::KeyDown(scancode as i32),
            Event::KeyUp {
                scancode: Some(scancode),
                ..
            } => IoEvents::KeyUp(scancode as i32),
            Event::TextInput { text, .. } => IoEvents::TextInput(text),
            Event::MouseMotion {
                x, y, xrel, yrel, ..
            } => IoEvents::MouseMotion(x, y, xrel, yrel),
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => IoEvents::MouseButtonDown(MouseButtonId::from_sdl(mouse_btn, x, y)),
            Event::MouseButtonUp {
                mouse_btn, x, y, ..
            } => IoEvents::MouseButtonUp(MouseButtonId::from_sdl(mouse_btn, x, y)),
            Event::MouseWheel { x, y, .. } => IoEvents::MouseWheel(x, y),
            Event::Window {
                win_event: WindowEvent::Resized(w, h) | WindowEvent::SizeChanged(w, h),
                ..
            } => IoEvents::WindowResized(w, h),
            _ => IoEvents::Other,
        }
    }
}

/// Turns consecutive performance counter samples into frame delta times.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameClock {
    last: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns seconds since the previous sample, or [`FALLBACK_DELTA_TIME`]
    /// on the first sample. The GUI rejects a zero delta, so identical
    /// samples also yield the fallback.
    pub fn tick(&mut self, counter: u64, frequency: u64) -> f32 {
        let dt = match self.last {
            Some(prev) if frequency > 0 && counter > prev => {
                ((counter - prev) as f64 / frequency as f64) as f32
            }
            _ => FALLBACK_DELTA_TIME,
        };
        self.last = Some(counter);
        dt
    }
}

// Field order matters: the GL context is dropped before the window, and the
// window before the SDL handles.
pub struct System {
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    timer: sdl2::TimerSubsystem,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
    clock: FrameClock,
    clear_color: [f32; 4],
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System, InitError> {
        let sdl_context = sdl2::init().map_err(InitError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(InitError::Video)?;
        let timer = sdl_context.timer().map_err(InitError::Timer)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 2);
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_double_buffer(true);
        gl_attr.set_depth_size(24);
        gl_attr.set_stencil_size(8);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .allow_highdpi()
            .resizable()
            .build()
            .map_err(|e| InitError::Window(e.to_string()))?;

        let gl_ctx = window.gl_create_context().map_err(InitError::GlContext)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(InitError::MakeCurrent)?;

        if let Err(e) = video_subsystem.gl_set_swap_interval(SwapInterval::VSync) {
            log::warn!("unable to enable vsync: {e}");
        }

        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 2));

        log::info!(
            "created window '{}' {}x{}",
            config.title,
            config.width,
            config.height
        );
        glutils::log_opengl_info();

        let event_pump = sdl_context.event_pump().map_err(InitError::EventPump)?;

        Ok(System {
            gl_ctx,
            window,
            event_pump,
            timer,
            video_subsystem,
            sdl_context,
            clock: FrameClock::new(),
            clear_color: config.clear_color,
        })
    }

    /// Drains the SDL event queue without blocking.
    pub fn process_io_events(&mut self) -> Vec<IoEvents> {
        let events: Vec<IoEvents> = self.event_pump.poll_iter().map(IoEvents::from).collect();
        for event in &events {
            if let IoEvents::WindowResized(w, h) = event {
                log::debug!("window resized to {w}x{h}");
            }
        }
        events
    }

    /// Seconds elapsed since the previous call, measured with the
    /// high-resolution performance counter rather than millisecond ticks.
    pub fn delta_time(&mut self) -> f32 {
        self.clock.tick(
            self.timer.performance_counter(),
            self.timer.performance_frequency(),
        )
    }

    /// Window size in screen coordinates.
    pub fn display_size(&self) -> [f32; 2] {
        let (w, h) = self.window.size();
        [w as f32, h as f32]
    }

    /// Drawable size in pixels; larger than the display size on high-DPI screens.
    pub fn framebuffer_size(&self) -> [f32; 2] {
        let (w, h) = self.window.drawable_size();
        [w as f32, h as f32]
    }

    pub fn pre_render(&mut self) {
        let [r, g, b, a] = self.clear_color;
        self.clear_screen(r, g, b, a);
    }

    pub fn post_render(&mut self) {
        self.window.gl_swap_window();
    }

    pub fn clear_screen(&mut self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Explicit teardown. Dropping `System` does the same: GL context, then
    /// window, then SDL. Anything owning GL objects must be released first.
    pub fn dispose(self) {
        log::debug!("disposing window and OpenGL context");
        drop(self);
    }
}

impl PlatformState for System {
    fn mod_state(&self) -> Mod {
        self.sdl_context.keyboard().mod_state()
    }

    fn pointer_state(&self) -> PointerState {
        let state = self.event_pump.mouse_state();
        PointerState {
            x: state.x() as f32,
            y: state.y() as f32,
            left: state.left(),
            right: state.right(),
            middle: state.middle(),
        }
    }
}
