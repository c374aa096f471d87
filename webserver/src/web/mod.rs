//! HTTP routing

pub mod handlers;
