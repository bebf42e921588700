use crate::client::{Namespace, Qbit, Result};
use crate::entities::{MainData, TorrentPeers};
use crate::params::Params;

impl Qbit {
    /// Changes since the response with id `rid`; `0` requests a full update
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn main_data(&self, rid: i64) -> Result<MainData> {
        let query = Params::new().with("rid", rid);
        self.get(Namespace::Sync, "maindata", query).await?.json()
    }

    /// Peer changes of one torrent since the response with id `rid`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// (404 for an unknown hash) or the response cannot be parsed
    pub async fn torrent_peers(&self, hash: &str, rid: i64) -> Result<TorrentPeers> {
        let query = Params::new().with("hash", hash).with("rid", rid);
        self.get(Namespace::Sync, "torrentPeers", query)
            .await?
            .json()
    }
}
