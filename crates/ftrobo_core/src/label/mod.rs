//! Custom parameter input widgets.
//!
//! # Responsibility
//! - Resolve extension tokens to widgets or Host aliases.
//! - Serve placeholder widgets while icon images are still decoding.
//!
//! # Invariants
//! - Unknown tokens are never an error; they fall back to the Host.

pub mod catalog;
pub mod factory;
pub mod icon;
pub mod widget;
