//! Styling for the HoloCard desktop app.

mod styles;

pub use styles::GLOBAL_STYLES;
