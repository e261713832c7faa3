use std::time::Duration;

pub const DEFAULT_TITLE: &str = "Rust SDL ImGui Template";
pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 800;

/// Window and main loop settings. Sizes are in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    // rgba, used by System::pre_render
    pub clear_color: [f32; 4],
    // coarse rate limiter after each presented frame
    pub frame_sleep: Duration,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            frame_sleep: Duration::from_millis(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque_black_1200x800() {
        let cfg = WindowConfig::default();
        assert_eq!((cfg.width, cfg.height), (1200, 800));
        assert_eq!(cfg.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(cfg.frame_sleep, Duration::from_millis(5));
    }
}
