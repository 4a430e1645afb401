//! View models for presentational components
//!
//! Pure functions of their input. Rendering is left to the UI layer.

pub mod gauge;
pub mod links;

pub use gauge::{DEFAULT_PALETTE, GaugePalette, ProgressGauge};
pub use links::{LinkGroup, LinkItem, LinkTarget};
