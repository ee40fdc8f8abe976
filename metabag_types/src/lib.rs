//! # `metabag_types`
//!
//! Data-only companion to `metabag`.
//!
//! This crate holds what the engine needs to know *about* tags, without any
//! of the logic to convert them: the four metadata blocks, one descriptor per
//! supported tag, and the legacy code tables.

#![forbid(unsafe_code)]

pub mod block;
pub mod codes;
pub mod tags;

pub use block::Block;
