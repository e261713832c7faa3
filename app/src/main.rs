use anyhow::Context as _;
use backend::{Gui, IoEvents, System, WindowConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = WindowConfig::default();
    let mut system = System::new(&config).context("window initialization failure")?;
    let mut gui = Gui::new(&system).context("UI initialization failure")?;

    let mut show_demo_window = true;

    'running: loop {
        let dt = system.delta_time();

        for event in system.process_io_events() {
            if event == IoEvents::Quit {
                break 'running;
            }
            // events imgui captures should not reach game input handling
            let _capture = gui.process_event(&event, &system);
        }

        gui.frame(&mut system, dt, |ui| {
            ui.show_demo_window(&mut show_demo_window);
        });
        system.post_render();

        std::thread::sleep(config.frame_sleep);
    }

    log::info!("shutting down");
    // GUI first: its GL objects need the context the System still owns.
    drop(gui);
    system.dispose();
    Ok(())
}
