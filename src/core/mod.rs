//! # Core Module
//!
//! Concurrency primitives shared by the rest of the crate.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking.
//!   Chunks live behind one so the chunk cache can hand the same live instance
//!   to every caller.

pub mod mt_resource;

pub use mt_resource::MtResource;
