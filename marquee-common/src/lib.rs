//! Shared plumbing for the marquee workspace.
//!
//! Currently this is just the [`observability`] module: a one-shot `tracing`
//! initialiser that every binary and integration test can call without
//! worrying about double registration.

pub mod observability;
