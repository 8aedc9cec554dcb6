//! UI building blocks shared by every screen.

pub mod helpers;
pub mod theme;
