//! Task list management for Cuido.
//!
//! Caregivers keep a to-do list per patient. This module projects a patient's
//! tasks into display order under filter and sort preferences, and applies
//! create, edit, toggle, delete, and manual reorder operations through an
//! external task store. The module follows hexagonal architecture:
//!
//! - Domain types and the pure projection in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
