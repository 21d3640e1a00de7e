//! Flutter-facing bindings for KinTree core.

pub mod api;
