use crate::client::{Namespace, Qbit, Result};
use crate::entities::{BuildInfo, Preferences};
use crate::params::Params;

impl Qbit {
    /// Application version, e.g. `v4.6.5`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn app_version(&self) -> Result<String> {
        let response = self.get(Namespace::App, "version", Params::new()).await?;
        Ok(response.into_text())
    }

    /// WebUI API version, e.g. `2.9.3`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn api_version(&self) -> Result<String> {
        let response = self
            .get(Namespace::App, "webapiVersion", Params::new())
            .await?;
        Ok(response.into_text())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn build_info(&self) -> Result<BuildInfo> {
        self.get(Namespace::App, "buildInfo", Params::new())
            .await?
            .json()
    }

    /// Shuts the application down
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn shutdown(&self) -> Result<()> {
        self.post(Namespace::App, "shutdown", Params::new()).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn preferences(&self) -> Result<Preferences> {
        self.get(Namespace::App, "preferences", Params::new())
            .await?
            .json()
    }

    /// Changes the given preferences; fields left as `None` are not touched.
    /// The whole object is sent as JSON text in the `json` form field.
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn set_preferences(&self, preferences: &Preferences) -> Result<()> {
        let json = serde_json::to_string(preferences)?;
        self.post(
            Namespace::App,
            "setPreferences",
            Params::new().with("json", json),
        )
        .await?;
        Ok(())
    }

    /// Default save path for new torrents
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn default_save_path(&self) -> Result<String> {
        let response = self
            .get(Namespace::App, "defaultSavePath", Params::new())
            .await?;
        Ok(response.into_text())
    }
}
