//! # Providers
//!
//! Clients for the external completion service and the factory that builds them.

pub mod ai;
pub mod factory;
