use crate::error::GuiError;
use crate::input::{Capture, InputBridge, PlatformState};
use crate::renderer::Renderer;
use crate::system::{IoEvents, System};
use imgui::{Context, Ui};

/// The imgui context together with its input bridge and GL renderer.
///
/// Must be dropped before the [`System`] whose GL context it renders with;
/// declaring it after the `System` binding is enough.
pub struct Gui {
    context: Context,
    input: InputBridge,
    renderer: Renderer,
}

impl Gui {
    /// Takes the `System` so the GL context is known to be current and its
    /// functions loaded before any renderer object is created.
    pub fn new(_system: &System) -> Result<Gui, GuiError> {
        let mut context = Context::create();
        let input = InputBridge::new(context.io_mut());
        let renderer = Renderer::new(&mut context)?;
        Ok(Gui {
            context,
            input,
            renderer,
        })
    }

    /// Feeds one event to imgui and reports whether imgui wants the mouse
    /// and/or keyboard, so the caller can decide whether to handle it too.
    pub fn process_event<P: PlatformState>(&mut self, event: &IoEvents, platform: &P) -> Capture {
        self.input
            .process_event(self.context.io_mut(), event, platform)
    }

    /// Runs one GUI frame: starts it, lets `build_ui` emit widgets, clears
    /// the screen and draws the result. Presenting is left to the caller.
    pub fn frame<F>(&mut self, system: &mut System, delta_time: f32, build_ui: F)
    where
        F: FnOnce(&Ui),
    {
        let display_size = system.display_size();
        let ui = self
            .input
            .begin_frame(&mut self.context, delta_time, display_size, &*system);
        build_ui(&ui);
        let draw_data = ui.render();

        system.pre_render();
        self.renderer
            .render(display_size, system.framebuffer_size(), draw_data);
    }

    /// Releases the renderer's GL objects. Safe to call more than once.
    pub fn dispose(&mut self) {
        log::debug!("disposing UI renderer");
        self.renderer.dispose(&mut self.context);
    }
}

impl Drop for Gui {
    fn drop(&mut self) {
        self.dispose();
    }
}
