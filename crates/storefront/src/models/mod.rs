//! Session-stored models and helpers.

pub mod session;
