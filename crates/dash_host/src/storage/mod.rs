//! Settings storage contracts.

pub mod strv;
