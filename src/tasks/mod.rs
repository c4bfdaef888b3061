//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweep: purges stale entries from a `TtlCache` at a fixed interval

mod sweep;

pub(crate) use sweep::spawn_sweep_task;
