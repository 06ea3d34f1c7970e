//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a cache is in use.
//!
//! # Tasks
//! - Expired-entry purge: sweeps expired entries out of a shared store at
//!   configured intervals

mod purge;

pub use purge::spawn_purge_task;
