//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweep: drops an expired product listing at configured intervals

mod sweeper;

pub use sweeper::spawn_cache_sweeper;
