//! Flutter-facing bindings for Habitus core.

pub mod api;
