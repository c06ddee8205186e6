//! Translation overlays composed with the Host locale loader.
//!
//! # Responsibility
//! - Keep extension translations per locale.
//! - Apply them strictly after the Host base dictionary loads and strictly
//!   before the Host's own completion callback runs.
//!
//! # Invariants
//! - A missing overlay or missing key is never an error.

pub mod catalog;
pub mod load;
pub mod overlay;
