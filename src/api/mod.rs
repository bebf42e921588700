//! Typed wrappers over the WebUI API, one module per namespace.
//!
//! Every method is an `impl` block on [`crate::client::Qbit`] and maps to
//! exactly one HTTP request.

mod app;
mod logs;
mod rss;
mod search;
mod sync;
mod torrents;
mod transfer;
