//! Core types for Gated.
//!
//! This module provides the canonical entity shapes and their supporting
//! enumerations.

pub mod category;
pub mod garment;
pub mod id;
pub mod order;
pub mod release;
pub mod shipping;

pub use category::Category;
pub use garment::Garment;
pub use id::{EntityId, Identified};
pub use order::{Order, SIMULATION_MARKER, TrackingEvent};
pub use release::Release;
pub use shipping::{Carrier, TrackingStatus};
