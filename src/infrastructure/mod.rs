//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns like
//! seed-fixture loading, file I/O, and other system-level operations.

pub mod export;
pub mod seed;

pub use export::*;
pub use seed::*;
