//! `yttools-api` crate (library surface).
//!
//! The primary entrypoint for end users is the `yttools-api` binary. This
//! library module exposes the router and server wiring so contract tests (and
//! embedders) can run the HTTP surface against any `VideoDataProvider`.

pub mod server;
