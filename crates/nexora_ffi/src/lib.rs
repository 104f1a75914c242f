//! Flutter-facing bindings for the Nexora core.

pub mod api;
