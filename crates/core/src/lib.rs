//! Gated Core - Shared domain types.
//!
//! This crate provides the canonical in-memory entity shapes used across all
//! Gated components:
//! - `sync` - Optimistic synchronization layer against the remote store
//! - future UI shells (desktop/mobile) render these types directly
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. Remote-store row shapes and webhook payloads live at the edges in
//! the `sync` crate; everything inside the application speaks the types
//! defined here.
//!
//! # Modules
//!
//! - [`types`] - Entity ids, category/carrier/status enums, and the three
//!   entity families (garments, orders, releases)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
