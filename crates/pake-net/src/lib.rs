//! pake-net - client for the JSON resources published by pake nodes
//!
//! A pake node publishes three static files under its root URL:
//!
//! ```text
//! {root}/meta.json      # object describing the node
//! {root}/mirrors.json   # list of mirror URLs
//! {root}/packages.json  # list of package names
//! ```
//!
//! This crate fetches and parses them with a fallback-on-failure contract: a
//! failed fetch or an unparsable body yields the resource's empty shape
//! (`{}` for metadata, `[]` for the lists) instead of an error, so the UI
//! layer on top never has to handle a network failure distinctly from an
//! empty resource. Failures are still visible through `tracing` diagnostics
//! and through the lower-level `Result`-returning API in [`fetch`].
//!
//! On top of the per-node accessors, [`index`] builds the network-wide
//! package index by walking each known node's mirrors.

pub mod fetch;
pub mod index;
pub mod node;

// Re-exports for convenience
pub use fetch::{FetchError, Fetcher};
pub use index::{Alien, IndexEntry, NetworkIndex, build_index};
pub use node::{Meta, Mirrors, Node, Packages};
