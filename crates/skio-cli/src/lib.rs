//! Ski-O CLI library.
//!
//! This crate provides the output renderers used by the `skio` binary.

pub mod output;
