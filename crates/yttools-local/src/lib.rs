//! Local (subprocess + filesystem) implementation of the YouTube tools
//! provider.
//!
//! The [`ytdlp::YtDlp`] adapter implements `yttools_core::VideoDataProvider`
//! by shelling out to the external downloader; `youtube` holds the pure URL
//! and caption-text helpers, `shellout` the bounded invocation plumbing.

pub mod shellout;
pub mod youtube;
pub mod ytdlp;

pub use ytdlp::YtDlp;
