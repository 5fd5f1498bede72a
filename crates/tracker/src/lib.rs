//! E-Waste Tracker library.
//!
//! Stores for sessions, classification records and marketplace listings,
//! persisted through a pluggable key-value [`storage`] backend, plus the
//! read-only [`insights`] the front end derives from them.
//!
//! # Architecture
//!
//! - [`state::AppState`] is built once from [`config::TrackerConfig`] and
//!   owns every store; nothing is global.
//! - Each store keeps an ordered in-memory list and rewrites its storage key
//!   on every mutation. Write failures are logged, never surfaced.
//! - Records are validated when they enter a store, not when loaded.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use config::TrackerConfig;
pub use error::{TrackerError, ValidationError};
pub use state::AppState;
