//! Needs a display and an OpenGL 3.2 driver: `cargo test -- --ignored`.

use backend::{Gui, System, WindowConfig};

#[test]
#[ignore = "requires a display and an OpenGL 3.2 core driver"]
fn window_sizes_track_resizes() {
    let config = WindowConfig::default();
    let mut system = System::new(&config).expect("window");
    assert_eq!(system.display_size(), [1200.0, 800.0]);

    let fb = system.framebuffer_size();
    assert!(fb[0] >= 1200.0 && fb[1] >= 800.0);

    system.window.set_size(640, 480).expect("resize");
    system.process_io_events();
    assert_eq!(system.display_size(), [640.0, 480.0]);
}

#[test]
#[ignore = "requires a display and an OpenGL 3.2 core driver"]
fn gui_renders_and_disposes_twice() {
    let config = WindowConfig::default();
    let mut system = System::new(&config).expect("window");
    let mut gui = Gui::new(&system).expect("gui");

    let dt = system.delta_time();
    assert_eq!(dt, backend::system::FALLBACK_DELTA_TIME);

    gui.frame(&mut system, dt, |ui| ui.text("frame"));
    system.post_render();

    gui.dispose();
    gui.dispose();
    drop(gui);
    system.dispose();
}
