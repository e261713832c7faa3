//! Feeds SDL input into the imgui IO state.
//!
//! imgui is driven through its legacy key-map model: `io.keys_down` is
//! indexed by SDL scancode and `io.key_map` tells imgui which scancode backs
//! each navigation/editing key.

use crate::system::{IoEvents, MouseButtonId};
use imgui::{Context, Io, Key, Ui};
use sdl2::keyboard::{Mod, Scancode};

const BUTTON_LEFT: usize = 0;
const BUTTON_RIGHT: usize = 1;
const BUTTON_MIDDLE: usize = 2;
const BUTTON_COUNT: usize = 3;

/// imgui key -> SDL physical key. Covers navigation keys and the letters used
/// by the text-editing shortcuts (select all, copy, paste, cut, redo, undo).
pub const KEY_MAP: [(Key, Scancode); 21] = [
    (Key::Tab, Scancode::Tab),
    (Key::LeftArrow, Scancode::Left),
    (Key::RightArrow, Scancode::Right),
    (Key::UpArrow, Scancode::Up),
    (Key::DownArrow, Scancode::Down),
    (Key::PageUp, Scancode::PageUp),
    (Key::PageDown, Scancode::PageDown),
    (Key::Home, Scancode::Home),
    (Key::End, Scancode::End),
    (Key::Insert, Scancode::Insert),
    (Key::Delete, Scancode::Delete),
    (Key::Backspace, Scancode::Backspace),
    (Key::Space, Scancode::Space),
    (Key::Enter, Scancode::Return),
    (Key::Escape, Scancode::Escape),
    (Key::A, Scancode::A),
    (Key::C, Scancode::C),
    (Key::V, Scancode::V),
    (Key::X, Scancode::X),
    (Key::Y, Scancode::Y),
    (Key::Z, Scancode::Z),
];

/// Live pointer state as reported by the platform, not by events.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

/// Live platform input state read while processing events and starting frames.
pub trait PlatformState {
    fn mod_state(&self) -> Mod;
    fn pointer_state(&self) -> PointerState;
}

/// Whether imgui wants to consume the input it was just given.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub mouse: bool,
    pub keyboard: bool,
}

#[derive(Debug, Default)]
pub struct InputBridge {
    // set on button-down, cleared after each begin_frame
    mouse_pressed: [bool; BUTTON_COUNT],
}

impl InputBridge {
    /// Installs the key map into `io`.
    pub fn new(io: &mut Io) -> Self {
        for (key, scancode) in KEY_MAP {
            io[key] = scancode as u32;
        }
        InputBridge::default()
    }

    pub fn process_event<P: PlatformState>(
        &mut self,
        io: &mut Io,
        event: &IoEvents,
        platform: &P,
    ) -> Capture {
        match event {
            IoEvents::MouseButtonDown(button) => match button {
                MouseButtonId::Left(..) => self.mouse_pressed[BUTTON_LEFT] = true,
                MouseButtonId::Right(..) => self.mouse_pressed[BUTTON_RIGHT] = true,
                MouseButtonId::Middle(..) => self.mouse_pressed[BUTTON_MIDDLE] = true,
                MouseButtonId::Other(..) => {}
            },
            IoEvents::MouseWheel(x, y) => {
                io.mouse_wheel_h += wheel_step(*x);
                io.mouse_wheel += wheel_step(*y);
            }
            IoEvents::TextInput(text) => {
                for c in text.chars() {
                    io.add_input_character(c);
                }
            }
            IoEvents::KeyDown(scancode) => {
                set_key(io, *scancode, true);
                update_modifiers(io, platform.mod_state());
            }
            IoEvents::KeyUp(scancode) => {
                set_key(io, *scancode, false);
                update_modifiers(io, platform.mod_state());
            }
            _ => {}
        }

        Capture {
            mouse: io.want_capture_mouse,
            keyboard: io.want_capture_keyboard,
        }
    }

    /// Pushes timing, display size and mouse state into `io`. A button that
    /// went down since the last frame is reported held even if it has
    /// already been released, so clicks shorter than a frame are not lost.
    pub fn prepare_frame<P: PlatformState>(
        &mut self,
        io: &mut Io,
        delta_time: f32,
        display_size: [f32; 2],
        platform: &P,
    ) {
        io.display_size = display_size;
        io.delta_time = delta_time;

        let pointer = platform.pointer_state();
        io.mouse_pos = [pointer.x, pointer.y];
        io.mouse_down[BUTTON_LEFT] = self.mouse_pressed[BUTTON_LEFT] || pointer.left;
        io.mouse_down[BUTTON_RIGHT] = self.mouse_pressed[BUTTON_RIGHT] || pointer.right;
        io.mouse_down[BUTTON_MIDDLE] = self.mouse_pressed[BUTTON_MIDDLE] || pointer.middle;
        self.mouse_pressed = [false; BUTTON_COUNT];
    }

    pub fn begin_frame<'a, P: PlatformState>(
        &mut self,
        ctx: &'a mut Context,
        delta_time: f32,
        display_size: [f32; 2],
        platform: &P,
    ) -> Ui<'a> {
        self.prepare_frame(ctx.io_mut(), delta_time, display_size, platform);
        ctx.frame()
    }
}

/// Wheel deltas are reduced to their sign; device magnitude is ignored.
pub fn wheel_step(raw: i32) -> f32 {
    raw.signum() as f32
}

fn set_key(io: &mut Io, scancode: i32, down: bool) {
    if let Some(slot) = usize::try_from(scancode)
        .ok()
        .and_then(|i| io.keys_down.get_mut(i))
    {
        *slot = down;
    }
}

fn update_modifiers(io: &mut Io, mods: Mod) {
    io.key_shift = mods.contains(Mod::LSHIFTMOD) || mods.contains(Mod::RSHIFTMOD);
    io.key_ctrl = mods.contains(Mod::LCTRLMOD) || mods.contains(Mod::RCTRLMOD);
    io.key_alt = mods.contains(Mod::LALTMOD) || mods.contains(Mod::RALTMOD);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gui_context;
    use proptest::prelude::*;

    struct FakePlatform {
        mods: Mod,
        pointer: PointerState,
    }

    impl Default for FakePlatform {
        fn default() -> Self {
            FakePlatform {
                mods: Mod::NOMOD,
                pointer: PointerState::default(),
            }
        }
    }

    impl PlatformState for FakePlatform {
        fn mod_state(&self) -> Mod {
            self.mods
        }

        fn pointer_state(&self) -> PointerState {
            self.pointer
        }
    }

    #[test]
    fn key_map_is_installed() {
        let (_guard, mut ctx) = gui_context();
        let _ = InputBridge::new(ctx.io_mut());
        let io = ctx.io();
        for (key, scancode) in KEY_MAP {
            assert_eq!(io[key], scancode as u32, "{key:?}");
        }
    }

    #[test]
    fn space_and_backspace_have_distinct_scancodes() {
        let lookup = |key: Key| {
            KEY_MAP
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, sc)| *sc as i32)
        };
        assert_eq!(lookup(Key::Space), Some(Scancode::Space as i32));
        assert_ne!(lookup(Key::Space), lookup(Key::Backspace));
    }

    #[test]
    fn click_shorter_than_a_frame_is_reported_down() {
        let (_guard, mut ctx) = gui_context();
        let platform = FakePlatform::default();
        let mut bridge = InputBridge::new(ctx.io_mut());
        let io = ctx.io_mut();

        let buttons = [
            (MouseButtonId::Left(3, 4), BUTTON_LEFT),
            (MouseButtonId::Right(3, 4), BUTTON_RIGHT),
            (MouseButtonId::Middle(3, 4), BUTTON_MIDDLE),
        ];
        for (button, slot) in buttons {
            bridge.process_event(io, &IoEvents::MouseButtonDown(button), &platform);
            bridge.process_event(io, &IoEvents::MouseButtonUp(button), &platform);
            bridge.prepare_frame(io, 1.0 / 60.0, [800.0, 600.0], &platform);
            for other in [BUTTON_LEFT, BUTTON_RIGHT, BUTTON_MIDDLE] {
                assert_eq!(io.mouse_down[other], other == slot, "{button:?}");
            }

            // the sticky flag only lasts one frame
            bridge.prepare_frame(io, 1.0 / 60.0, [800.0, 600.0], &platform);
            assert!(!io.mouse_down[slot], "{button:?}");
        }
    }

    #[test]
    fn live_button_state_is_reported_without_events() {
        let (_guard, mut ctx) = gui_context();
        let platform = FakePlatform {
            pointer: PointerState {
                x: 10.0,
                y: 20.0,
                middle: true,
                ..PointerState::default()
            },
            ..FakePlatform::default()
        };
        let mut bridge = InputBridge::new(ctx.io_mut());
        let io = ctx.io_mut();
        bridge.prepare_frame(io, 0.5, [640.0, 480.0], &platform);
        assert_eq!(io.mouse_pos, [10.0, 20.0]);
        assert!(io.mouse_down[BUTTON_MIDDLE]);
        assert_eq!(io.display_size, [640.0, 480.0]);
        assert_eq!(io.delta_time, 0.5);
    }

    #[test]
    fn wheel_uses_sign_only() {
        let (_guard, mut ctx) = gui_context();
        let platform = FakePlatform::default();
        let mut bridge = InputBridge::new(ctx.io_mut());
        let io = ctx.io_mut();

        bridge.process_event(io, &IoEvents::MouseWheel(5, 5), &platform);
        assert_eq!((io.mouse_wheel_h, io.mouse_wheel), (1.0, 1.0));

        bridge.process_event(io, &IoEvents::MouseWheel(-3, -3), &platform);
        assert_eq!((io.mouse_wheel_h, io.mouse_wheel), (0.0, 0.0));

        bridge.process_event(io, &IoEvents::MouseWheel(0, -3), &platform);
        assert_eq!((io.mouse_wheel_h, io.mouse_wheel), (0.0, -1.0));
    }

    #[test]
    fn keys_and_modifiers_follow_platform() {
        let (_guard, mut ctx) = gui_context();
        let mut platform = FakePlatform {
            mods: Mod::RCTRLMOD,
            ..FakePlatform::default()
        };
        let mut bridge = InputBridge::new(ctx.io_mut());
        let io = ctx.io_mut();
        let c = Scancode::C as i32;

        bridge.process_event(io, &IoEvents::KeyDown(c), &platform);
        assert!(io.keys_down[c as usize]);
        assert!(io.key_ctrl);
        assert!(!io.key_shift && !io.key_alt);

        platform.mods = Mod::LSHIFTMOD | Mod::LALTMOD;
        bridge.process_event(io, &IoEvents::KeyUp(c), &platform);
        assert!(!io.keys_down[c as usize]);
        assert!(!io.key_ctrl);
        assert!(io.key_shift && io.key_alt);
    }

    #[test]
    fn out_of_range_scancode_is_ignored() {
        let (_guard, mut ctx) = gui_context();
        let platform = FakePlatform::default();
        let mut bridge = InputBridge::new(ctx.io_mut());
        let io = ctx.io_mut();
        bridge.process_event(io, &IoEvents::KeyDown(-1), &platform);
        bridge.process_event(io, &IoEvents::KeyDown(100_000), &platform);
        assert!(io.keys_down.iter().all(|down| !down));
    }

    #[test]
    fn text_input_is_queued_as_characters() {
        let (_guard, mut ctx) = gui_context();
        let platform = FakePlatform::default();
        let mut bridge = InputBridge::new(ctx.io_mut());
        let capture = bridge.process_event(
            ctx.io_mut(),
            &IoEvents::TextInput("hé".to_string()),
            &platform,
        );
        assert_eq!(capture, Capture::default());

        let queued: Vec<char> = ctx.io().input_queue_characters().collect();
        assert_eq!(queued, vec!['h', 'é']);
    }

    proptest! {
        #[test]
        fn wheel_step_is_unit_sign(raw in any::<i32>()) {
            let step = wheel_step(raw);
            prop_assert!(step == -1.0 || step == 0.0 || step == 1.0);
            prop_assert_eq!(step > 0.0, raw > 0);
            prop_assert_eq!(step < 0.0, raw < 0);
        }
    }
}
