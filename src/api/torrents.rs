use crate::client::{ApiRequest, ApiResponse, Namespace, Qbit, QbitError, Result};
use crate::entities::{
    Category, FilePriority, PieceState, Torrent, TorrentFile, TorrentProperties, Tracker, WebSeed,
};
use crate::params::{COMMA, Hashes, NEWLINE, PIPE, Params, join};
use crate::requests::{
    AddTorrentOptions, ShareLimits, TorrentListQuery, TorrentSource, add_torrent_form,
};
use log::debug;
use std::collections::HashMap;

impl Qbit {
    /// Lists torrents matching `query`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Network request fails
    /// - Server rejects the request (e.g. session expired)
    /// - Response cannot be parsed
    pub async fn torrents(&self, query: &TorrentListQuery) -> Result<Vec<Torrent>> {
        let query = Params::from_serialize(query)?;
        self.get(Namespace::Torrents, "info", query).await?.json()
    }

    /// Number of torrents, qBittorrent 4.6.1 and later
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response is not a number
    pub async fn torrent_count(&self) -> Result<u64> {
        self.get(Namespace::Torrents, "count", Params::new())
            .await?
            .parse_text()
    }

    /// Generic properties of one torrent
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Network request fails
    /// - Hash is unknown (404)
    /// - Response cannot be parsed
    pub async fn properties(&self, hash: &str) -> Result<TorrentProperties> {
        self.get_for_hash("properties", hash).await?.json()
    }

    /// Trackers of one torrent, including the DHT/PeX/LSD pseudo-trackers
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the hash is unknown
    /// or the response cannot be parsed
    pub async fn trackers(&self, hash: &str) -> Result<Vec<Tracker>> {
        self.get_for_hash("trackers", hash).await?.json()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails, the hash is unknown
    /// or the response cannot be parsed
    pub async fn web_seeds(&self, hash: &str) -> Result<Vec<WebSeed>> {
        self.get_for_hash("webseeds", hash).await?.json()
    }

    /// Files of one torrent, optionally only those at `indexes`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the hash is unknown
    /// or the response cannot be parsed
    pub async fn files(&self, hash: &str, indexes: Option<&[u32]>) -> Result<Vec<TorrentFile>> {
        let query = Params::new()
            .with("hash", hash)
            .with_opt("indexes", indexes.map(join_indexes));
        self.get(Namespace::Torrents, "files", query).await?.json()
    }

    /// Download state of every piece
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the hash is unknown
    /// or the response cannot be parsed
    pub async fn piece_states(&self, hash: &str) -> Result<Vec<PieceState>> {
        self.get_for_hash("pieceStates", hash).await?.json()
    }

    /// SHA-1 hash of every piece
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the hash is unknown
    /// or the response cannot be parsed
    pub async fn piece_hashes(&self, hash: &str) -> Result<Vec<String>> {
        self.get_for_hash("pieceHashes", hash).await?.json()
    }

    /// Pauses torrents (qBittorrent 4.x; see [`Self::stop`] for 5.x)
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn pause(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("pause", hashes.into()).await
    }

    /// Resumes torrents (qBittorrent 4.x; see [`Self::start`] for 5.x)
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn resume(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("resume", hashes.into()).await
    }

    /// Stops torrents (qBittorrent 5.x)
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn stop(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("stop", hashes.into()).await
    }

    /// Starts torrents (qBittorrent 5.x)
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn start(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("start", hashes.into()).await
    }

    /// Removes torrents, and their downloaded data when `delete_files` is set
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn delete(&self, hashes: impl Into<Hashes>, delete_files: bool) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("deleteFiles", delete_files);
        self.post(Namespace::Torrents, "delete", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn recheck(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("recheck", hashes.into()).await
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn reannounce(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("reannounce", hashes.into()).await
    }

    /// Adds new torrents from links and `.torrent` files in a single request
    ///
    /// Strings are turned into sources with [`TorrentSource::from`]: links
    /// (`http://`, `https://`, `magnet:`, `bc://bt/`) are sent for the server
    /// to fetch, anything else is read as a local file.
    ///
    /// Returns the server's answer, `Ok.` or `Fails.`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source is given
    /// - A local file cannot be read or a stream fails
    /// - Network request fails
    /// - Server rejects the request (415 when a torrent file is invalid)
    pub async fn add_torrents<I>(&self, sources: I, options: &AddTorrentOptions) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Into<TorrentSource>,
    {
        let sources: Vec<TorrentSource> = sources.into_iter().map(Into::into).collect();
        if sources.is_empty() {
            return Err(QbitError::InvalidInput(
                "At least one torrent source is required".into(),
            ));
        }

        debug!("Adding {} torrents", sources.len());
        let form = add_torrent_form(sources, options).await?;
        let response = self
            .request(
                Namespace::Torrents,
                "add",
                ApiRequest::post().multipart(form),
            )
            .await?;
        Ok(response.into_text())
    }

    /// Adds tracker URLs to a torrent
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the hash is unknown
    /// or the server rejects it
    pub async fn add_trackers<I>(&self, hash: &str, urls: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new()
            .with("hash", hash)
            .with("urls", join(urls, NEWLINE));
        self.post(Namespace::Torrents, "addTrackers", fields).await?;
        Ok(())
    }

    /// Replaces a tracker URL
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    /// (400 for an invalid new URL, 409 when the original is not found or the
    /// new one already exists)
    pub async fn edit_tracker(&self, hash: &str, orig_url: &str, new_url: &str) -> Result<()> {
        let fields = Params::new()
            .with("hash", hash)
            .with("origUrl", orig_url)
            .with("newUrl", new_url);
        self.post(Namespace::Torrents, "editTracker", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn remove_trackers<I>(&self, hash: &str, urls: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new()
            .with("hash", hash)
            .with("urls", join(urls, NEWLINE));
        self.post(Namespace::Torrents, "removeTrackers", fields)
            .await?;
        Ok(())
    }

    /// Connects torrents to peers given as `host:port`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn add_peers<I>(&self, hashes: impl Into<Hashes>, peers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = hashes_param(hashes.into()).with("peers", join(peers, PIPE));
        self.post(Namespace::Torrents, "addPeers", fields).await?;
        Ok(())
    }

    /// Moves torrents one step up the queue
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or queueing is disabled (409)
    pub async fn increase_priority(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("increasePrio", hashes.into()).await
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or queueing is disabled (409)
    pub async fn decrease_priority(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("decreasePrio", hashes.into()).await
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or queueing is disabled (409)
    pub async fn top_priority(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("topPrio", hashes.into()).await
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or queueing is disabled (409)
    pub async fn bottom_priority(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("bottomPrio", hashes.into()).await
    }

    /// Sets the priority of the files at `indexes`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    /// (404 unknown hash, 409 metadata not yet downloaded or bad index)
    pub async fn set_file_priority(
        &self,
        hash: &str,
        indexes: &[u32],
        priority: FilePriority,
    ) -> Result<()> {
        let fields = Params::new()
            .with("hash", hash)
            .with("id", join_indexes(indexes))
            .with("priority", priority as u8);
        self.post(Namespace::Torrents, "filePrio", fields).await?;
        Ok(())
    }

    /// Per-torrent download limits in bytes/second, keyed by hash
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn download_limits(&self, hashes: impl Into<Hashes>) -> Result<HashMap<String, i64>> {
        self.post(Namespace::Torrents, "downloadLimit", hashes_param(hashes.into()))
            .await?
            .json()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_download_limit(&self, hashes: impl Into<Hashes>, limit: i64) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("limit", limit);
        self.post(Namespace::Torrents, "setDownloadLimit", fields)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_share_limits(
        &self,
        hashes: impl Into<Hashes>,
        limits: ShareLimits,
    ) -> Result<()> {
        let fields = hashes_param(hashes.into()).extend(Params::from_serialize(&limits)?);
        self.post(Namespace::Torrents, "setShareLimits", fields)
            .await?;
        Ok(())
    }

    /// Per-torrent upload limits in bytes/second, keyed by hash
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn upload_limits(&self, hashes: impl Into<Hashes>) -> Result<HashMap<String, i64>> {
        self.post(Namespace::Torrents, "uploadLimit", hashes_param(hashes.into()))
            .await?
            .json()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_upload_limit(&self, hashes: impl Into<Hashes>, limit: i64) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("limit", limit);
        self.post(Namespace::Torrents, "setUploadLimit", fields)
            .await?;
        Ok(())
    }

    /// Moves torrent data to `location`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    /// (400 empty path, 403 no write access, 409 cannot create the directory)
    pub async fn set_location(&self, hashes: impl Into<Hashes>, location: &str) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("location", location);
        self.post(Namespace::Torrents, "setLocation", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn rename(&self, hash: &str, name: &str) -> Result<()> {
        let fields = Params::new().with("hash", hash).with("name", name);
        self.post(Namespace::Torrents, "rename", fields).await?;
        Ok(())
    }

    /// Assigns a category; an empty `category` clears it
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the category does not exist (409)
    pub async fn set_category(&self, hashes: impl Into<Hashes>, category: &str) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("category", category);
        self.post(Namespace::Torrents, "setCategory", fields).await?;
        Ok(())
    }

    /// All categories keyed by name
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn categories(&self) -> Result<HashMap<String, Category>> {
        self.get(Namespace::Torrents, "categories", Params::new())
            .await?
            .json()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the name is empty
    /// or invalid (400, 409)
    pub async fn create_category(&self, category: &str, save_path: &str) -> Result<()> {
        let fields = Params::new()
            .with("category", category)
            .with("savePath", save_path);
        self.post(Namespace::Torrents, "createCategory", fields)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn edit_category(&self, category: &str, save_path: &str) -> Result<()> {
        let fields = Params::new()
            .with("category", category)
            .with("savePath", save_path);
        self.post(Namespace::Torrents, "editCategory", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn remove_categories<I>(&self, categories: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new().with("categories", join(categories, PIPE));
        self.post(Namespace::Torrents, "removeCategories", fields)
            .await?;
        Ok(())
    }

    /// Adds tags to torrents, creating tags that do not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn add_tags<I>(&self, hashes: impl Into<Hashes>, tags: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = hashes_param(hashes.into()).with("tags", join(tags, COMMA));
        self.post(Namespace::Torrents, "addTags", fields).await?;
        Ok(())
    }

    /// Removes tags from torrents
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn remove_tags<I>(&self, hashes: impl Into<Hashes>, tags: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = hashes_param(hashes.into()).with("tags", join(tags, PIPE));
        self.post(Namespace::Torrents, "removeTags", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn tags(&self) -> Result<Vec<String>> {
        self.get(Namespace::Torrents, "tags", Params::new())
            .await?
            .json()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn create_tags<I>(&self, tags: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new().with("tags", join(tags, COMMA));
        self.post(Namespace::Torrents, "createTags", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn delete_tags<I>(&self, tags: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new().with("tags", join(tags, COMMA));
        self.post(Namespace::Torrents, "deleteTags", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_auto_management(&self, hashes: impl Into<Hashes>, enable: bool) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("enable", enable);
        self.post(Namespace::Torrents, "setAutoManagement", fields)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn toggle_sequential_download(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("toggleSequentialDownload", hashes.into())
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn toggle_first_last_piece_priority(&self, hashes: impl Into<Hashes>) -> Result<()> {
        self.post_for_hashes("toggleFirstLastPiecePrio", hashes.into())
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_force_start(&self, hashes: impl Into<Hashes>, value: bool) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("value", value);
        self.post(Namespace::Torrents, "setForceStart", fields)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_super_seeding(&self, hashes: impl Into<Hashes>, value: bool) -> Result<()> {
        let fields = hashes_param(hashes.into()).with("value", value);
        self.post(Namespace::Torrents, "setSuperSeeding", fields)
            .await?;
        Ok(())
    }

    /// Renames a file inside a torrent
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    /// (400 missing path, 409 invalid or conflicting path)
    pub async fn rename_file(&self, hash: &str, old_path: &str, new_path: &str) -> Result<()> {
        let fields = Params::new()
            .with("hash", hash)
            .with("oldPath", old_path)
            .with("newPath", new_path);
        self.post(Namespace::Torrents, "renameFile", fields).await?;
        Ok(())
    }

    /// Renames a folder inside a torrent
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    /// (400 missing path, 409 invalid or conflicting path)
    pub async fn rename_folder(&self, hash: &str, old_path: &str, new_path: &str) -> Result<()> {
        let fields = Params::new()
            .with("hash", hash)
            .with("oldPath", old_path)
            .with("newPath", new_path);
        self.post(Namespace::Torrents, "renameFolder", fields).await?;
        Ok(())
    }

    async fn get_for_hash(&self, action: &str, hash: &str) -> Result<ApiResponse> {
        self.get(Namespace::Torrents, action, Params::new().with("hash", hash))
            .await
    }

    async fn post_for_hashes(&self, action: &str, hashes: Hashes) -> Result<()> {
        self.post(Namespace::Torrents, action, hashes_param(hashes))
            .await?;
        Ok(())
    }
}

fn hashes_param(hashes: Hashes) -> Params {
    Params::new().with("hashes", hashes.to_param())
}

fn join_indexes(indexes: &[u32]) -> String {
    join(indexes.iter().map(ToString::to_string), PIPE)
}
