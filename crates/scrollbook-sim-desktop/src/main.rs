//! Desktop SDL simulator for the Scrollbook reader.
//!
//! Runs the shared App against a simulator window with a 60Hz tick so
//! animated scrolls play out. The URL fragment has no real home on
//! desktop; writes are logged instead, and an initial fragment can be
//! passed as the first command line argument (with or without '#').

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use scrollbook_ui::{App, Button, InputEvent, DISPLAY_HEIGHT, DISPLAY_WIDTH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let mut window = Window::new("The Craftsman's Way", &output_settings);

    let mut app = App::new();
    if let Some(fragment) = std::env::args().nth(1) {
        app.resolve_initial_fragment(&fragment);
    }

    let started = Instant::now();
    let now_ms = move || started.elapsed().as_millis() as u64;

    // Let the tracker pick up the boot position, then show it.
    app.tick(now_ms());
    app.render(&mut display)?;
    window.update(&display);

    println!("Scrollbook Simulator");
    println!("Controls:");
    println!("  Up/Down           - Scroll by a step");
    println!("  PageUp/PageDown   - Scroll by a viewport");
    println!("  Left/Right        - Previous / next chapter");
    println!("  Enter / Space     - Table of contents");
    println!("  Backspace         - Rail quick links / back");
    println!("  Escape            - Quit");

    loop {
        let events = window.events().collect::<Vec<_>>();

        let mut needs_render = false;
        for event in events {
            match event {
                SimulatorEvent::Quit => {
                    return Ok(());
                }
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Escape {
                        return Ok(());
                    }
                    if let Some(btn) = keycode_to_button(keycode) {
                        if app.handle_input(InputEvent::Press(btn), now_ms()) {
                            needs_render = true;
                        }
                    }
                }
                _ => {}
            }
        }

        if app.tick(now_ms()) {
            needs_render = true;
        }
        if let Some(slug) = app.take_fragment_write() {
            log::info!("[URL] fragment -> #{}", slug);
        }
        if needs_render {
            app.render(&mut display)?;
            window.update(&display);
        }

        std::thread::sleep(Duration::from_millis(16));
    }
}

fn keycode_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::Left | Keycode::A => Some(Button::Left),
        Keycode::Right | Keycode::D => Some(Button::Right),
        Keycode::Up | Keycode::W => Some(Button::Up),
        Keycode::Down | Keycode::S => Some(Button::Down),
        Keycode::PageUp => Some(Button::VolumeUp),
        Keycode::PageDown => Some(Button::VolumeDown),
        Keycode::Return | Keycode::Space => Some(Button::Confirm),
        Keycode::Backspace => Some(Button::Back),
        _ => None,
    }
}
