//! Public facade crate for the YouTube tools service.
//!
//! This crate intentionally contains no IO or downloader-specific logic.
//! It re-exports the backend-agnostic types/traits from `yttools-core` so
//! embedders can depend on a stable name without tracking internal layout.

pub use yttools_core::*;
