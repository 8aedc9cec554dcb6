//! Host-side scenario test harness for scripted UI flows.
//!
//! Drives the shared App with a deterministic millisecond clock, so
//! scripted flows can press buttons, let animations play out, and
//! assert on both state and rendered pixels.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use png::{BitDepth, ColorType, Encoder};
use scrollbook_ui::test_display::TestDisplay;
use scrollbook_ui::{App, Button, InputEvent};

/// Couples app, display, and a scripted clock for scenario tests.
pub struct ScenarioHarness {
    app: App,
    display: TestDisplay,
    now_ms: u64,
}

impl ScenarioHarness {
    /// Harness at the top of the book, clock at zero, tracker primed
    /// by one tick.
    pub fn new() -> Self {
        let mut harness = Self {
            app: App::new(),
            display: TestDisplay::new(),
            now_ms: 0,
        };
        harness.app.tick(harness.now_ms);
        harness
    }

    /// Harness as if the page was loaded with `fragment` in the URL.
    pub fn with_fragment(fragment: &str) -> Self {
        let mut harness = Self {
            app: App::new(),
            display: TestDisplay::new(),
            now_ms: 0,
        };
        harness.app.resolve_initial_fragment(fragment);
        harness.app.tick(harness.now_ms);
        harness
    }

    /// Simulate a button press through the app input pipeline.
    pub fn press(&mut self, button: Button) -> bool {
        self.app.handle_input(InputEvent::Press(button), self.now_ms)
    }

    /// Advance the clock by `ms` in frame-sized ticks. Returns true
    /// if any tick reported a change.
    pub fn advance(&mut self, ms: u64) -> bool {
        let target = self.now_ms + ms;
        let mut changed = false;
        while self.now_ms < target {
            self.now_ms = (self.now_ms + 16).min(target);
            if self.app.tick(self.now_ms) {
                changed = true;
            }
        }
        changed
    }

    /// Run the clock until no animation is in flight and the
    /// suppression window has closed. Returns elapsed milliseconds.
    pub fn settle(&mut self) -> u64 {
        const MAX_SETTLE_MS: u64 = 5000;
        let start = self.now_ms;
        while (self.app.is_animating() || self.app.is_suppressed(self.now_ms))
            && self.now_ms - start < MAX_SETTLE_MS
        {
            self.advance(16);
        }
        self.now_ms - start
    }

    /// Press, then let the resulting animation land.
    pub fn press_and_settle(&mut self, button: Button) -> bool {
        let handled = self.press(button);
        self.settle();
        handled
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Render the current UI screen.
    pub fn render(&mut self) {
        self.app
            .render(&mut self.display)
            .expect("scenario render should succeed");
    }

    /// Render and return elapsed wall time.
    pub fn render_timed(&mut self) -> Duration {
        let start = Instant::now();
        self.render();
        start.elapsed()
    }

    /// Render and assert wall-time budget in milliseconds.
    pub fn assert_render_budget_ms(&mut self, max_ms: u128, label: &str) {
        let elapsed = self.render_timed();
        assert!(
            elapsed.as_millis() <= max_ms,
            "{} render exceeded budget: {}ms > {}ms",
            label,
            elapsed.as_millis(),
            max_ms
        );
    }

    /// Access the app for assertions.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mutable app access for scenario setup.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Access the display for render assertions.
    pub fn display(&self) -> &TestDisplay {
        &self.display
    }

    /// Save the current framebuffer to a PNG (white = Off, black = On).
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let (width, height) = self.display.dimensions();
        let mut data = Vec::with_capacity((width * height) as usize);
        for pixel in self.display.pixels() {
            let value = match pixel {
                BinaryColor::On => 0u8,
                BinaryColor::Off => 255u8,
            };
            data.push(value);
        }

        let file = File::create(path).map_err(|e| e.to_string())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, width, height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        let mut png_writer = encoder.write_header().map_err(|e| e.to_string())?;
        png_writer
            .write_image_data(&data)
            .map_err(|e| e.to_string())
    }
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}
