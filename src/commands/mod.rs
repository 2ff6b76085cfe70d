//! Command entry points

pub mod sanitize;
