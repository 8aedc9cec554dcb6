//! Button input abstraction.

/// Logical keys, mapped from keyboard events by each host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Back,
    // Page-sized scrolling
    VolumeUp,
    VolumeDown,
}

/// Input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
}
