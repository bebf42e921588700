use chrono::serde::ts_seconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::collections::HashMap;

/// Versions of the libraries qBittorrent was built with
#[derive(Deserialize, Debug, Clone)]
pub struct BuildInfo {
    pub qt: String,
    pub libtorrent: String,
    pub boost: String,
    pub openssl: String,
    #[serde(default)]
    pub zlib: Option<String>,
    /// Application bitness (e.g. 64-bit)
    pub bitness: u8,
}

/// Application preferences.
///
/// Only the commonly used settings are typed; everything else the server
/// reports lands in `other` and is sent back untouched.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Default save path for torrents, separated by slashes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_path_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir_fin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_paused_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tmm_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preallocate_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_files_ext: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queueing_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_active_downloads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_active_torrents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_active_uploads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dont_count_slow_torrents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ratio_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ratio: Option<f64>,
    /// Action on reaching the ratio limit (0 = pause/stop, 1 = remove)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ratio_act: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_seeding_time_enabled: Option<bool>,
    /// Minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_seeding_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upnp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_port: Option<bool>,
    /// Global download limit in bytes/second, 0 for unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dl_limit: Option<i64>,
    /// Global upload limit in bytes/second, 0 for unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_dl_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_up_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connec: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connec_per_torrent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uploads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uploads_per_torrent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dht: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pex: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsd: Option<bool>,
    /// 0 = prefer encryption, 1 = force on, 2 = force off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_ui_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_ui_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_local_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rss_refresh_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rss_auto_downloading_enabled: Option<bool>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Severity of a main log entry
#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LogLevel {
    Normal = 1,
    Info = 2,
    Warning = 4,
    Critical = 8,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub message: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub level: LogLevel,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PeerLogEntry {
    pub id: i64,
    pub ip: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
    /// Whether the peer was blocked
    pub blocked: bool,
    /// Reason of the block
    #[serde(default)]
    pub reason: String,
}

/// Incremental state from `sync/maindata`.
///
/// When `full_update` is false only changed fields are present, so torrents
/// are kept as raw JSON objects keyed by hash.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MainData {
    /// Response id, pass it back on the next call to get a delta
    pub rid: i64,
    pub full_update: bool,
    pub torrents: HashMap<String, Map<String, Value>>,
    pub torrents_removed: Vec<String>,
    pub categories: HashMap<String, Category>,
    pub categories_removed: Vec<String>,
    pub tags: Vec<String>,
    pub tags_removed: Vec<String>,
    pub trackers: HashMap<String, Vec<String>>,
    pub server_state: Option<ServerState>,
}

/// Global transfer state, every field may be missing in a delta update
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ServerState {
    pub alltime_dl: Option<u64>,
    pub alltime_ul: Option<u64>,
    pub connection_status: Option<ConnectionStatus>,
    pub dht_nodes: Option<u64>,
    pub dl_info_data: Option<u64>,
    pub dl_info_speed: Option<u64>,
    pub dl_rate_limit: Option<u64>,
    pub free_space_on_disk: Option<u64>,
    pub global_ratio: Option<String>,
    pub queueing: Option<bool>,
    pub refresh_interval: Option<u64>,
    pub total_peer_connections: Option<u64>,
    pub up_info_data: Option<u64>,
    pub up_info_speed: Option<u64>,
    pub up_rate_limit: Option<u64>,
    pub use_alt_speed_limits: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Firewalled,
    Disconnected,
}

/// Peers of a single torrent from `sync/torrentPeers`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TorrentPeers {
    pub rid: i64,
    pub full_update: bool,
    /// Keyed by `ip:port`
    pub peers: HashMap<String, PeerInfo>,
    pub peers_removed: Vec<String>,
    pub show_flags: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PeerInfo {
    pub client: Option<String>,
    pub connection: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub dl_speed: Option<u64>,
    pub downloaded: Option<u64>,
    pub files: Option<String>,
    pub flags: Option<String>,
    pub flags_desc: Option<String>,
    pub ip: Option<String>,
    pub port: Option<u16>,
    /// Fraction of 1
    pub progress: Option<f64>,
    pub relevance: Option<f64>,
    pub up_speed: Option<u64>,
    pub uploaded: Option<u64>,
}

/// Global transfer statistics
#[derive(Deserialize, Debug, Clone)]
pub struct TransferInfo {
    /// Bytes/second
    pub dl_info_speed: u64,
    /// Bytes downloaded this session
    pub dl_info_data: u64,
    pub up_info_speed: u64,
    pub up_info_data: u64,
    /// Bytes/second, 0 if unlimited
    pub dl_rate_limit: u64,
    pub up_rate_limit: u64,
    pub dht_nodes: u64,
    pub connection_status: ConnectionStatus,
}

/// A torrent as listed by `torrents/info`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Torrent {
    pub hash: String,
    pub name: String,
    #[serde(with = "ts_seconds")]
    pub added_on: DateTime<Utc>,
    /// Bytes left to download, -1 while metadata is unknown
    pub amount_left: i64,
    pub auto_tmm: bool,
    /// Fraction of pieces available among peers
    pub availability: f64,
    pub category: String,
    /// Bytes completed
    pub completed: i64,
    /// Seconds since epoch, -1 if not completed
    pub completion_on: i64,
    pub content_path: String,
    /// Bytes/second, -1 if unlimited
    pub dl_limit: i64,
    pub dlspeed: i64,
    pub downloaded: i64,
    pub downloaded_session: i64,
    /// Seconds, 8640000 means infinite
    pub eta: i64,
    pub f_l_piece_prio: bool,
    pub force_start: bool,
    pub infohash_v1: String,
    pub infohash_v2: String,
    pub last_activity: i64,
    pub magnet_uri: String,
    pub max_ratio: f64,
    pub max_seeding_time: i64,
    pub num_complete: i64,
    pub num_incomplete: i64,
    pub num_leechs: i64,
    pub num_seeds: i64,
    /// Queue position, -1 if queueing is disabled or the torrent is seeding
    pub priority: i64,
    /// Fraction of 1
    pub progress: f64,
    pub ratio: f64,
    pub ratio_limit: f64,
    pub save_path: String,
    pub seeding_time: i64,
    pub seeding_time_limit: i64,
    pub seen_complete: i64,
    pub seq_dl: bool,
    /// Bytes of the selected files, -1 while metadata is unknown
    pub size: i64,
    pub state: TorrentState,
    pub super_seeding: bool,
    /// Comma-separated
    pub tags: String,
    pub time_active: i64,
    /// -1 while metadata is unknown
    pub total_size: i64,
    /// First working tracker, empty if none
    pub tracker: String,
    pub up_limit: i64,
    pub uploaded: i64,
    pub uploaded_session: i64,
    pub upspeed: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TorrentState {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "missingFiles")]
    MissingFiles,
    #[serde(rename = "uploading")]
    Uploading,
    #[serde(rename = "pausedUP")]
    PausedUp,
    #[serde(rename = "stoppedUP")]
    StoppedUp,
    #[serde(rename = "queuedUP")]
    QueuedUp,
    #[serde(rename = "stalledUP")]
    StalledUp,
    #[serde(rename = "checkingUP")]
    CheckingUp,
    #[serde(rename = "forcedUP")]
    ForcedUp,
    #[serde(rename = "allocating")]
    Allocating,
    #[serde(rename = "downloading")]
    Downloading,
    #[serde(rename = "metaDL")]
    MetaDl,
    #[serde(rename = "forcedMetaDL")]
    ForcedMetaDl,
    #[serde(rename = "pausedDL")]
    PausedDl,
    #[serde(rename = "stoppedDL")]
    StoppedDl,
    #[serde(rename = "queuedDL")]
    QueuedDl,
    #[serde(rename = "stalledDL")]
    StalledDl,
    #[serde(rename = "checkingDL")]
    CheckingDl,
    #[serde(rename = "forcedDL")]
    ForcedDl,
    #[serde(rename = "checkingResumeData")]
    CheckingResumeData,
    #[serde(rename = "moving")]
    Moving,
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
}

/// Generic properties of one torrent.
///
/// Sizes, counters and speeds are -1 when the server does not know them yet,
/// e.g. while a magnet link is still fetching metadata.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TorrentProperties {
    pub save_path: String,
    #[serde(with = "ts_seconds")]
    pub creation_date: DateTime<Utc>,
    pub piece_size: i64,
    pub comment: String,
    pub total_wasted: i64,
    pub total_uploaded: i64,
    pub total_uploaded_session: i64,
    pub total_downloaded: i64,
    pub total_downloaded_session: i64,
    pub up_limit: i64,
    pub dl_limit: i64,
    /// Seconds
    pub time_elapsed: i64,
    pub seeding_time: i64,
    pub nb_connections: i64,
    pub nb_connections_limit: i64,
    pub share_ratio: f64,
    #[serde(with = "ts_seconds")]
    pub addition_date: DateTime<Utc>,
    /// Seconds since epoch, -1 if not completed
    pub completion_date: i64,
    pub created_by: String,
    pub dl_speed_avg: i64,
    pub dl_speed: i64,
    pub eta: i64,
    pub last_seen: i64,
    pub peers: i64,
    pub peers_total: i64,
    pub pieces_have: i64,
    pub pieces_num: i64,
    /// Seconds until the next announce
    pub reannounce: i64,
    pub seeds: i64,
    pub seeds_total: i64,
    pub total_size: i64,
    pub up_speed_avg: i64,
    pub up_speed: i64,
    #[serde(rename = "isPrivate")]
    pub is_private: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Tracker {
    pub url: String,
    pub status: TrackerStatus,
    /// `None` for the DHT, PeX and LSD pseudo-trackers
    #[serde(default, deserialize_with = "int_or_empty")]
    pub tier: Option<i64>,
    pub num_peers: i64,
    pub num_seeds: i64,
    pub num_leeches: i64,
    pub num_downloaded: i64,
    #[serde(default)]
    pub msg: String,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TrackerStatus {
    Disabled = 0,
    NotContacted = 1,
    Working = 2,
    Updating = 3,
    NotWorking = 4,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WebSeed {
    pub url: String,
}

/// A file inside a torrent
#[derive(Deserialize, Debug, Clone)]
pub struct TorrentFile {
    /// Present since WebAPI 2.8.2
    #[serde(default)]
    pub index: Option<u32>,
    pub name: String,
    /// Bytes
    pub size: u64,
    /// Fraction of 1
    pub progress: f64,
    pub priority: FilePriority,
    #[serde(default)]
    pub is_seed: Option<bool>,
    /// First and last piece index of the file
    #[serde(default)]
    pub piece_range: Vec<u32>,
    /// Fraction of the file available among peers, -1 if no metadata yet
    #[serde(default)]
    pub availability: f64,
}

/// Download priority of a file
#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FilePriority {
    DoNotDownload = 0,
    Normal = 1,
    High = 6,
    Maximal = 7,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceState {
    NotDownloaded = 0,
    Downloading = 1,
    Downloaded = 2,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Category {
    pub name: String,
    #[serde(rename = "savePath")]
    pub save_path: String,
}

/// Node of the RSS tree: a feed, or a folder of further nodes
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RssItem {
    Feed(RssFeed),
    Folder(HashMap<String, RssItem>),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RssFeed {
    pub uid: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub last_build_date: Option<String>,
    #[serde(default)]
    pub is_loading: Option<bool>,
    #[serde(default)]
    pub has_error: Option<bool>,
    /// Only filled when items are requested with data
    #[serde(default)]
    pub articles: Vec<RssArticle>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RssArticle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "torrentURL")]
    pub torrent_url: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

/// RSS auto-downloading rule
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RssRule {
    pub enabled: bool,
    pub must_contain: String,
    pub must_not_contain: String,
    pub use_regex: bool,
    pub episode_filter: String,
    pub smart_filter: bool,
    pub previously_matched_episodes: Vec<String>,
    /// Feed URLs the rule applies to
    pub affected_feeds: Vec<String>,
    /// Days to ignore subsequent matches after one
    pub ignore_days: i64,
    pub last_match: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_paused: Option<bool>,
    pub assigned_category: String,
    pub save_path: String,
    /// Newer fields such as `torrentParams`
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchJob {
    pub id: i64,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Stopped,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchStatus {
    pub id: i64,
    pub status: SearchState,
    pub total: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchResults {
    pub results: Vec<SearchResult>,
    pub status: SearchState,
    pub total: i64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub descr_link: String,
    pub file_name: String,
    /// Bytes, -1 if unknown
    pub file_size: i64,
    pub file_url: String,
    pub nb_leechers: i64,
    pub nb_seeders: i64,
    pub site_url: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlugin {
    pub enabled: bool,
    pub full_name: String,
    pub name: String,
    #[serde(default)]
    pub supported_categories: Vec<SearchCategory>,
    pub url: String,
    pub version: String,
}

/// Older servers list plain category names, newer ones `{id, name}` pairs
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SearchCategory {
    Named { id: String, name: String },
    Plain(String),
}

/// Accepts a number, or an empty string for "not applicable"
fn int_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_i64()),
        Value::String(s) => Ok(s.trim().parse().ok()),
        _ => Ok(None),
    }
}
