//! tbrew - Terminal Membership Companion
//!
//! A terminal companion for a coffee loyalty membership, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
