//! sweepbox - swept AABB movement and collision
//!
//! The library exposes the application configuration so integration tests and
//! tools can load it the same way the binary does.

pub mod config;
