use crate::client::{Namespace, Qbit, Result};
use crate::entities::{LogEntry, PeerLogEntry};
use crate::params::Params;
use crate::requests::LogQuery;

impl Qbit {
    /// Entries of the main application log
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn main_log(&self, query: &LogQuery) -> Result<Vec<LogEntry>> {
        let query = Params::from_serialize(query)?;
        self.get(Namespace::Log, "main", query).await?.json()
    }

    /// Entries of the peer log (banned and blocked peers)
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn peer_log(&self, last_known_id: Option<i64>) -> Result<Vec<PeerLogEntry>> {
        let query = Params::new().with_opt("last_known_id", last_known_id);
        self.get(Namespace::Log, "peers", query).await?.json()
    }
}
