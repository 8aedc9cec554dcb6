//! WASM browser host for the Scrollbook reader.
//!
//! The browser owns the URL fragment: in-app navigation is pushed to
//! the history via `pushState` (which fires no `hashchange`, so there
//! is no echo), while external fragment changes flow back in through
//! the `hashchange` listener. Every listener lives in a guard that
//! detaches it on drop; call `detach()` from the page to tear the
//! input wiring down without hunting individual handlers.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics_web_simulator::{
    display::WebSimulatorDisplay, output_settings::OutputSettingsBuilder,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use scrollbook_ui::{App, Button, InputEvent, DISPLAY_HEIGHT, DISPLAY_WIDTH};

struct State {
    app: App,
    display: WebSimulatorDisplay<BinaryColor>,
}

impl State {
    fn render(&mut self) {
        self.app.render(&mut self.display).unwrap();
        self.display.flush().unwrap();
    }

    fn on_key(&mut self, btn: Button) {
        if self.app.handle_input(InputEvent::Press(btn), now_ms()) {
            self.render();
        }
    }

    fn on_hash_change(&mut self, fragment: &str) {
        if self.app.handle_fragment_change(fragment, now_ms()) {
            self.render();
        }
    }

    /// One animation frame: advance the clock, publish any fragment
    /// write, redraw if something moved.
    fn frame(&mut self) {
        let changed = self.app.tick(now_ms());
        if let Some(slug) = self.app.take_fragment_write() {
            push_fragment(slug);
        }
        if changed {
            self.render();
        }
    }
}

/// An event listener that detaches itself when dropped.
struct ListenerGuard {
    target: web_sys::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ListenerGuard {
    fn attach(
        target: &web_sys::EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, closure })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

thread_local! {
    static LISTENERS: RefCell<Vec<ListenerGuard>> = RefCell::new(Vec::new());
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let container = document.get_element_by_id("display-container").unwrap();

    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let display = WebSimulatorDisplay::new(
        (DISPLAY_WIDTH, DISPLAY_HEIGHT),
        &output_settings,
        Some(&container),
    );

    let state = Rc::new(RefCell::new(State { app: App::new(), display }));

    // The fragment present at load decides where the book opens.
    if let Ok(hash) = window.location().hash() {
        state.borrow_mut().app.resolve_initial_fragment(&hash);
    }
    state.borrow_mut().app.tick(now_ms());
    state.borrow_mut().render();

    // Keyboard
    let state_clone = state.clone();
    let keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let event: web_sys::KeyboardEvent = event.unchecked_into();
        if let Some(btn) = key_to_button(&event.key()) {
            event.prevent_default();
            state_clone.borrow_mut().on_key(btn);
        }
    }) as Box<dyn FnMut(_)>);

    // Back/forward and hand-edited fragments
    let state_clone = state.clone();
    let hashchange = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let fragment = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        state_clone.borrow_mut().on_hash_change(&fragment);
    }) as Box<dyn FnMut(_)>);

    LISTENERS.with(|listeners| -> Result<(), JsValue> {
        let mut listeners = listeners.borrow_mut();
        listeners.push(ListenerGuard::attach(&window, "keydown", keydown)?);
        listeners.push(ListenerGuard::attach(&window, "hashchange", hashchange)?);
        Ok(())
    })?;

    start_frame_loop(state);
    Ok(())
}

/// Remove every listener this module attached.
#[wasm_bindgen]
pub fn detach() {
    LISTENERS.with(|listeners| listeners.borrow_mut().clear());
}

fn start_frame_loop(state: Rc<RefCell<State>>) {
    let handle = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
    let handle_clone = handle.clone();
    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        state.borrow_mut().frame();
        if let Some(closure) = handle_clone.borrow().as_ref() {
            request_frame(closure);
        }
    }) as Box<dyn FnMut()>));
    if let Some(closure) = handle.borrow().as_ref() {
        request_frame(closure);
    };
}

fn request_frame(closure: &Closure<dyn FnMut()>) {
    web_sys::window()
        .unwrap()
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .unwrap();
}

fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() as u64)
        .unwrap_or(0)
}

/// Record an in-app navigation in the URL. `pushState` does not fire
/// `hashchange`, so this cannot loop back into the app.
fn push_fragment(slug: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&format!("#{}", slug)));
        }
    }
}

fn key_to_button(key: &str) -> Option<Button> {
    match key {
        "ArrowLeft" | "a" => Some(Button::Left),
        "ArrowRight" | "d" => Some(Button::Right),
        "ArrowUp" | "w" => Some(Button::Up),
        "ArrowDown" | "s" => Some(Button::Down),
        "PageUp" => Some(Button::VolumeUp),
        "PageDown" => Some(Button::VolumeDown),
        "Enter" | " " => Some(Button::Confirm),
        "Backspace" | "Escape" => Some(Button::Back),
        _ => None,
    }
}
