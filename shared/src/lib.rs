//! Platform-independent core of the timetable session drag controller
//!
//! The browser binding lives in the `timetable-frontend` crate; everything
//! here runs on any target so the gesture logic is tested natively.

pub mod config;
pub mod controller;
pub mod geometry;
pub mod gesture;
pub mod styles;
pub mod surface;

#[cfg(test)]
mod mock_surface;

pub use config::{ConfigError, DragConfig};
pub use controller::{DragController, DropEvent, PointerDown, DROP_EXTRA, PRIMARY_BUTTON};
pub use geometry::{Point, Rect};
pub use gesture::{Gesture, GesturePhase};
pub use styles::override_stylesheet;
pub use surface::DragSurface;
