use crate::client::{Namespace, Qbit, Result};
use crate::entities::TransferInfo;
use crate::params::{PIPE, Params, join};

impl Qbit {
    /// Global transfer statistics
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn transfer_info(&self) -> Result<TransferInfo> {
        self.get(Namespace::Transfer, "info", Params::new())
            .await?
            .json()
    }

    /// Whether the alternative speed limits are active
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response is neither `0` nor `1`
    pub async fn speed_limits_mode(&self) -> Result<bool> {
        let response = self
            .get(Namespace::Transfer, "speedLimitsMode", Params::new())
            .await?;
        Ok(response.parse_text::<u8>()? == 1)
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn toggle_speed_limits_mode(&self) -> Result<()> {
        self.post(Namespace::Transfer, "toggleSpeedLimitsMode", Params::new())
            .await?;
        Ok(())
    }

    /// Global download limit in bytes/second, 0 if unlimited
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response is not a number
    pub async fn global_download_limit(&self) -> Result<u64> {
        self.get(Namespace::Transfer, "downloadLimit", Params::new())
            .await?
            .parse_text()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_global_download_limit(&self, limit: u64) -> Result<()> {
        let fields = Params::new().with("limit", limit);
        self.post(Namespace::Transfer, "setDownloadLimit", fields)
            .await?;
        Ok(())
    }

    /// Global upload limit in bytes/second, 0 if unlimited
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response is not a number
    pub async fn global_upload_limit(&self) -> Result<u64> {
        self.get(Namespace::Transfer, "uploadLimit", Params::new())
            .await?
            .parse_text()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_global_upload_limit(&self, limit: u64) -> Result<()> {
        let fields = Params::new().with("limit", limit);
        self.post(Namespace::Transfer, "setUploadLimit", fields)
            .await?;
        Ok(())
    }

    /// Bans peers given as `host:port`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn ban_peers<I>(&self, peers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new().with("peers", join(peers, PIPE));
        self.post(Namespace::Transfer, "banPeers", fields).await?;
        Ok(())
    }
}
