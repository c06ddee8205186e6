//! Block domain model shared by the registry and the Host compositions.
//!
//! # Responsibility
//! - Define the declarative block descriptor and its render projection.
//! - Define the callable shape bound into Host dispatch tables.

pub mod block;
