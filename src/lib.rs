//! Workspace-level tooling package for the Ski-O course router.
//!
//! This crate carries no code; it exists so the workspace root can host
//! development tooling such as the rusty-hook pre-commit configuration.
//! The library lives in `crates/skio-lib` and the binary in `crates/skio-cli`.
