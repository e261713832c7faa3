//! SDL2 window + OpenGL context, imgui input bridge and imgui OpenGL renderer.

pub mod config;
pub mod error;
pub mod glstate;
pub mod glutils;
pub mod gui;
pub mod input;
pub mod math;
pub mod renderer;
pub mod shaders;
pub mod system;

pub use config::WindowConfig;
pub use error::{GuiError, InitError, ShaderError};
pub use gui::Gui;
pub use input::{Capture, InputBridge, PlatformState, PointerState};
pub use renderer::Renderer;
pub use system::{IoEvents, System};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard};

    // imgui allows a single live context per process.
    static GUI_LOCK: Mutex<()> = Mutex::new(());

    /// A headless imgui context ready for `frame()`. Keep the guard alive
    /// for as long as the context; it is declared first so it drops last.
    pub fn gui_context() -> (MutexGuard<'static, ()>, imgui::Context) {
        let guard = GUI_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut ctx = imgui::Context::create();
        ctx.set_ini_filename(None);
        let io = ctx.io_mut();
        io.display_size = [800.0, 600.0];
        io.delta_time = 1.0 / 60.0;
        ctx.fonts().build_alpha8_texture();
        (guard, ctx)
    }
}
