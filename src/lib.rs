//! Cuido: caregiving task lists.
//!
//! This crate keeps a per-patient to-do list for caregivers. It filters and
//! sorts tasks for display, falls back to a caregiver-controlled manual order,
//! and forwards create, edit, toggle, delete, and reorder operations to an
//! external task store.
//!
//! # Architecture
//!
//! Cuido follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task list projection, reordering, and store-backed mutations

pub mod task;
