use crate::client::Result;
use crate::params::{Hashes, NEWLINE, Params, comma_joined, join};
use log::debug;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};

const TORRENTS_FIELD: &str = "torrents";
const URLS_FIELD: &str = "urls";
const TORRENT_MIME: &str = "application/x-bittorrent";
const DEFAULT_FILE_NAME: &str = "file.torrent";
const URL_SCHEMES: [&str; 4] = ["http://", "https://", "magnet:", "bc://bt/"];

/// One torrent to add: a link the server downloads itself, or `.torrent` file content
pub enum TorrentSource {
    /// HTTP(S) URL, magnet link or `bc://bt/` link
    Url(String),
    /// Local `.torrent` file, read when the request is built
    Path(PathBuf),
    /// `.torrent` content already in memory
    Bytes { name: String, data: Vec<u8> },
    /// `.torrent` content from a reader, drained into memory before upload
    Stream {
        name: String,
        reader: Box<dyn AsyncRead + Send + Unpin>,
    },
}

impl TorrentSource {
    #[must_use]
    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        TorrentSource::Bytes {
            name: name.into(),
            data: data.into(),
        }
    }

    #[must_use]
    pub fn stream(
        name: impl Into<String>,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        TorrentSource::Stream {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// Whether `s` is a link the server can fetch, as opposed to a local path
    #[must_use]
    pub fn is_url(s: &str) -> bool {
        URL_SCHEMES.iter().any(|scheme| {
            s.get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
    }
}

impl fmt::Debug for TorrentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TorrentSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            TorrentSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            TorrentSource::Bytes { name, data } => f
                .debug_struct("Bytes")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
            TorrentSource::Stream { name, .. } => {
                f.debug_struct("Stream").field("name", name).finish_non_exhaustive()
            }
        }
    }
}

impl From<&str> for TorrentSource {
    fn from(s: &str) -> Self {
        if TorrentSource::is_url(s) {
            TorrentSource::Url(s.to_string())
        } else {
            TorrentSource::Path(PathBuf::from(s))
        }
    }
}

impl From<String> for TorrentSource {
    fn from(s: String) -> Self {
        if TorrentSource::is_url(&s) {
            TorrentSource::Url(s)
        } else {
            TorrentSource::Path(PathBuf::from(s))
        }
    }
}

impl From<PathBuf> for TorrentSource {
    fn from(path: PathBuf) -> Self {
        TorrentSource::Path(path)
    }
}

impl From<&Path> for TorrentSource {
    fn from(path: &Path) -> Self {
        TorrentSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for TorrentSource {
    fn from(data: Vec<u8>) -> Self {
        TorrentSource::bytes(DEFAULT_FILE_NAME, data)
    }
}

/// How the content of a new torrent is laid out on disk
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLayout {
    Original,
    Subfolder,
    NoSubfolder,
}

/// Optional settings sent alongside new torrents
#[derive(Serialize, Debug, Clone, Default)]
pub struct AddTorrentOptions {
    #[serde(rename = "savepath")]
    pub save_path: Option<String>,
    /// Cookie sent to download the `.torrent` file
    pub cookie: Option<String>,
    pub category: Option<String>,
    #[serde(serialize_with = "comma_joined")]
    pub tags: Option<Vec<String>>,
    pub skip_checking: Option<bool>,
    /// qBittorrent 4.x
    pub paused: Option<bool>,
    /// qBittorrent 5.x
    pub stopped: Option<bool>,
    pub root_folder: Option<bool>,
    #[serde(rename = "contentLayout")]
    pub content_layout: Option<ContentLayout>,
    pub rename: Option<String>,
    /// Bytes/second
    #[serde(rename = "upLimit")]
    pub upload_limit: Option<i64>,
    /// Bytes/second
    #[serde(rename = "dlLimit")]
    pub download_limit: Option<i64>,
    #[serde(rename = "ratioLimit")]
    pub ratio_limit: Option<f64>,
    /// Minutes
    #[serde(rename = "seedingTimeLimit")]
    pub seeding_time_limit: Option<i64>,
    #[serde(rename = "autoTMM")]
    pub auto_tmm: Option<bool>,
    #[serde(rename = "sequentialDownload")]
    pub sequential_download: Option<bool>,
    #[serde(rename = "firstLastPiecePrio")]
    pub first_last_piece_prio: Option<bool>,
}

/// Builds the multipart body for `torrents/add`.
///
/// Links end up newline-joined in one `urls` field; every file becomes its
/// own `torrents` part.
pub(crate) async fn add_torrent_form(
    sources: Vec<TorrentSource>,
    options: &AddTorrentOptions,
) -> Result<Form> {
    let mut urls = Vec::new();
    let mut form = Form::new();

    for source in sources {
        let (name, data) = match source {
            TorrentSource::Url(url) => {
                urls.push(url);
                continue;
            }
            TorrentSource::Path(path) => {
                let data = fs::read(&path).await?;
                let name = path.file_name().map_or_else(
                    || DEFAULT_FILE_NAME.to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                (name, data)
            }
            TorrentSource::Bytes { name, data } => (name, data),
            TorrentSource::Stream { name, mut reader } => {
                let mut data = Vec::new();
                reader.read_to_end(&mut data).await?;
                (name, data)
            }
        };

        debug!("Attaching torrent file {name} ({} bytes)", data.len());
        let part = Part::bytes(data).file_name(name).mime_str(TORRENT_MIME)?;
        form = form.part(TORRENTS_FIELD, part);
    }

    if !urls.is_empty() {
        debug!("Attaching {} torrent links", urls.len());
        form = form.text(URLS_FIELD, join(&urls, NEWLINE));
    }

    for (key, value) in Params::from_serialize(options)? {
        form = form.text(key, value);
    }

    Ok(form)
}

/// State filter for `torrents/info`
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TorrentFilter {
    All,
    Downloading,
    Seeding,
    Completed,
    Paused,
    Resumed,
    Stopped,
    Running,
    Active,
    Inactive,
    Stalled,
    StalledUploading,
    StalledDownloading,
    Errored,
}

/// Filters for listing torrents
#[derive(Serialize, Debug, Clone, Default)]
pub struct TorrentListQuery {
    pub filter: Option<TorrentFilter>,
    /// Empty string means "without category"
    pub category: Option<String>,
    /// Empty string means "without tag"
    pub tag: Option<String>,
    /// Any field name of [`crate::entities::Torrent`]
    pub sort: Option<String>,
    pub reverse: Option<bool>,
    pub limit: Option<u32>,
    /// Negative values count from the end
    pub offset: Option<i64>,
    pub hashes: Option<Hashes>,
}

impl TorrentListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, filter: TorrentFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, reverse: bool) -> Self {
        self.sort = Some(field.into());
        self.reverse = Some(reverse);
        self
    }

    #[must_use]
    pub fn page(mut self, limit: u32, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn hashes(mut self, hashes: impl Into<Hashes>) -> Self {
        self.hashes = Some(hashes.into());
        self
    }
}

/// Share limits for `torrents/setShareLimits`.
///
/// `-2` means "use the global limit", `-1` means "no limit".
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ShareLimits {
    #[serde(rename = "ratioLimit")]
    pub ratio_limit: f64,
    /// Minutes
    #[serde(rename = "seedingTimeLimit")]
    pub seeding_time_limit: i64,
    /// Minutes, ignored by servers older than 4.6
    #[serde(rename = "inactiveSeedingTimeLimit")]
    pub inactive_seeding_time_limit: i64,
}

impl Default for ShareLimits {
    fn default() -> Self {
        Self {
            ratio_limit: -2.0,
            seeding_time_limit: -2,
            inactive_seeding_time_limit: -2,
        }
    }
}

/// Severities to include from the main log. Unset flags use the server default (true).
#[derive(Serialize, Debug, Clone, Default)]
pub struct LogQuery {
    pub normal: Option<bool>,
    pub info: Option<bool>,
    pub warning: Option<bool>,
    pub critical: Option<bool>,
    /// Only entries with a greater id are returned
    pub last_known_id: Option<i64>,
}
