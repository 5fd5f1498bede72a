//! E-Waste Tracker Core - Shared types library.
//!
//! This crate provides common types used across all tracker components:
//! - `tracker` - Session, classification and marketplace stores
//! - `cli` - Command-line front end over the stores
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles and conditions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
