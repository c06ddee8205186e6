//! Block definition registry and the built-in block set.
//!
//! # Responsibility
//! - Turn declarative descriptors into Host-renderable, namespaced entries.
//! - Keep palette display order equal to registration order.
//!
//! # Invariants
//! - The registry is filled once at startup and read-only afterwards.

pub mod catalog;
pub mod registry;
pub mod template;
