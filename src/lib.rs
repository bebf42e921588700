//!# qBittorrent WebUI API Client
//!
//! A Rust client library for the qBittorrent WebUI API (v2). Every remote
//! action is a typed async method that sends exactly one HTTP request.
//!
//! ## Features
//!
//! - Cookie based authentication (`login` / `logout`)
//! - List torrents and inspect properties, trackers, files, pieces and peers
//! - Add torrents from links, local `.torrent` files, bytes or async readers
//! - Pause, resume, delete, recheck, reprioritize and relocate torrents
//! - Categories, tags, per-torrent and global speed limits
//! - RSS feeds and auto-downloading rules
//! - Search jobs and search plugins
//! - Application preferences, logs and incremental sync
//! - Human-readable sizes, speeds and ETA
//!
//! Any non-2xx answer becomes [`client::QbitError::Request`] carrying the
//! status code and the raw response text; a request that never completed is
//! [`client::QbitError::Transport`].
//!
//! ## Usage example
//!
//! ```rust,no_run
//! use qbittorrent_webui::client::{Qbit, Result};
//! use qbittorrent_webui::requests::{AddTorrentOptions, TorrentFilter, TorrentListQuery};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let qbit = Qbit::new("http://localhost:8080/")?;
//!     qbit.login("admin", "adminadmin").await?;
//!
//!     println!("qBittorrent {}", qbit.app_version().await?);
//!
//!     let query = TorrentListQuery::new().filter(TorrentFilter::Downloading);
//!     for torrent in qbit.torrents(&query).await? {
//!         println!(
//!             "{} {} {}% {}",
//!             torrent.hash,
//!             torrent.name,
//!             torrent.calculate_progress(),
//!             torrent.calculate_speed()
//!         );
//!     }
//!
//!     let options = AddTorrentOptions {
//!         category: Some("linux".into()),
//!         tags: Some(vec!["iso".into()]),
//!         ..Default::default()
//!     };
//!     qbit.add_torrents(["magnet:?xt=urn:btih:...", "/tmp/debian.torrent"], &options)
//!         .await?;
//!
//!     qbit.pause("all").await?;
//!     qbit.logout().await?;
//!     Ok(())
//! }
//! ```

mod api;
pub mod client;
pub mod entities;
pub mod params;
pub mod requests;
pub mod utils;
