//! Tableau engine crate.
//!
//! This crate owns the scene model used by higher layers: geometry, paint,
//! the primitive registry and the graph arena. It performs no I/O and
//! renders nothing.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod scene;
