//! Flutter-facing bridge crate for Gohana.
//!
//! Thin FRB surface over `gohana_core`; all invariants live in core.

pub mod api;
