//! Event types and observers.
//!
//! Submodules:
//! - [`lifecycle`] – storage spawn notification
//! - [`overlay`] – overlay shown/hidden notifications
pub mod lifecycle;
pub mod overlay;
