use crate::client::{Namespace, Qbit, Result};
use crate::entities::{SearchJob, SearchPlugin, SearchResults, SearchStatus};
use crate::params::{PIPE, Params, join};

impl Qbit {
    /// Starts a search job.
    ///
    /// `plugins` are plugin names, or `all` / `enabled`; `category` is a
    /// category id or `all`.
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server refuses to
    /// start another job (409) or the response cannot be parsed
    pub async fn search_start<I>(
        &self,
        pattern: &str,
        plugins: I,
        category: &str,
    ) -> Result<SearchJob>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new()
            .with("pattern", pattern)
            .with("plugins", join(plugins, PIPE))
            .with("category", category);
        self.post(Namespace::Search, "start", fields).await?.json()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the job is unknown (404)
    pub async fn search_stop(&self, id: i64) -> Result<()> {
        let fields = Params::new().with("id", id);
        self.post(Namespace::Search, "stop", fields).await?;
        Ok(())
    }

    /// Status of one job, or of every job when `id` is `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the job is unknown (404)
    /// or the response cannot be parsed
    pub async fn search_status(&self, id: Option<i64>) -> Result<Vec<SearchStatus>> {
        let query = Params::new().with_opt("id", id);
        self.get(Namespace::Search, "status", query).await?.json()
    }

    /// Results of a job, `limit` 0 meaning no limit
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the job is unknown (404),
    /// the offset is out of range (409) or the response cannot be parsed
    pub async fn search_results(&self, id: i64, limit: u32, offset: i64) -> Result<SearchResults> {
        let query = Params::new()
            .with("id", id)
            .with("limit", limit)
            .with("offset", offset);
        self.get(Namespace::Search, "results", query).await?.json()
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the job is unknown (404)
    pub async fn search_delete(&self, id: i64) -> Result<()> {
        let fields = Params::new().with("id", id);
        self.post(Namespace::Search, "delete", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn search_plugins(&self) -> Result<Vec<SearchPlugin>> {
        self.get(Namespace::Search, "plugins", Params::new())
            .await?
            .json()
    }

    /// Installs plugins from URLs or local file paths on the server
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn search_install_plugins<I>(&self, sources: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new().with("sources", join(sources, PIPE));
        self.post(Namespace::Search, "installPlugin", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn search_uninstall_plugins<I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new().with("names", join(names, PIPE));
        self.post(Namespace::Search, "uninstallPlugin", fields)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn search_enable_plugins<I>(&self, names: I, enable: bool) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new()
            .with("names", join(names, PIPE))
            .with("enable", enable);
        self.post(Namespace::Search, "enablePlugin", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn search_update_plugins(&self) -> Result<()> {
        self.post(Namespace::Search, "updatePlugins", Params::new())
            .await?;
        Ok(())
    }
}
