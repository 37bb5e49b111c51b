//! taskly - Task and Project Manager Library
//!
//! This library provides the core functionality for the taskly CLI: a
//! per-user task/project manager persisted as one JSON document per user.
//!
//! # Core Concepts
//!
//! - **Domain Store**: the in-memory authoritative collections for the
//!   active user, loaded once per session; the only writer of state
//! - **Commands**: validated, atomic mutations that persist the full
//!   document before returning
//! - **Derived Stats**: counts and the completion trend, recomputed on
//!   demand and never stored
//! - **Views**: pure functions from a store snapshot and a locale to a
//!   serializable render model
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: settings loading from `config.toml`
//! - `error`: error types and result aliases
//! - `locale`: translation resources keyed by locale code
//! - `model`: task, project and document types
//! - `output`: shared CLI output formatting
//! - `session`: logged-in user identity
//! - `stats`: derived statistics and chart data
//! - `storage`: per-user document persistence with atomic writes
//! - `store`: domain store and command layer
//! - `transfer`: import/export documents
//! - `view`: view selection and rendering

pub mod cli;
pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod output;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod view;

pub use error::{Error, Result};
