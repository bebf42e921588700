use crate::client::{Namespace, Qbit, Result};
use crate::entities::{RssItem, RssRule};
use crate::params::{PIPE, Params, join};
use std::collections::HashMap;

impl Qbit {
    /// Creates a folder; `path` uses `\` as separator, e.g. `Linux\Distros`
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the path is taken (409)
    pub async fn rss_add_folder(&self, path: &str) -> Result<()> {
        let fields = Params::new().with("path", path);
        self.post(Namespace::Rss, "addFolder", fields).await?;
        Ok(())
    }

    /// Subscribes to a feed, placing it at `path` when given
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the feed cannot be added (409)
    pub async fn rss_add_feed(&self, url: &str, path: Option<&str>) -> Result<()> {
        let fields = Params::new().with("url", url).with_opt("path", path);
        self.post(Namespace::Rss, "addFeed", fields).await?;
        Ok(())
    }

    /// Removes a feed or a folder with everything in it
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the item is unknown (409)
    pub async fn rss_remove_item(&self, path: &str) -> Result<()> {
        let fields = Params::new().with("path", path);
        self.post(Namespace::Rss, "removeItem", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the move is refused (409)
    pub async fn rss_move_item(&self, item_path: &str, dest_path: &str) -> Result<()> {
        let fields = Params::new()
            .with("itemPath", item_path)
            .with("destPath", dest_path);
        self.post(Namespace::Rss, "moveItem", fields).await?;
        Ok(())
    }

    /// The whole feed tree; articles are included when `with_data` is set
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn rss_items(&self, with_data: bool) -> Result<HashMap<String, RssItem>> {
        let query = Params::new().with("withData", with_data);
        self.get(Namespace::Rss, "items", query).await?.json()
    }

    /// Marks one article, or the whole feed when `article_id` is `None`, as read
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn rss_mark_as_read(&self, item_path: &str, article_id: Option<&str>) -> Result<()> {
        let fields = Params::new()
            .with("itemPath", item_path)
            .with_opt("articleId", article_id);
        self.post(Namespace::Rss, "markAsRead", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn rss_refresh_item(&self, item_path: &str) -> Result<()> {
        let fields = Params::new().with("itemPath", item_path);
        self.post(Namespace::Rss, "refreshItem", fields).await?;
        Ok(())
    }

    /// Creates or replaces an auto-downloading rule.
    /// The rule goes out as JSON text in the `ruleDef` field.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be serialized, the network request
    /// fails or the server rejects it
    pub async fn rss_set_rule(&self, name: &str, rule: &RssRule) -> Result<()> {
        let fields = Params::new()
            .with("ruleName", name)
            .with("ruleDef", serde_json::to_string(rule)?);
        self.post(Namespace::Rss, "setRule", fields).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn rss_rename_rule(&self, name: &str, new_name: &str) -> Result<()> {
        let fields = Params::new()
            .with("ruleName", name)
            .with("newRuleName", new_name);
        self.post(Namespace::Rss, "renameRule", fields).await?;
        Ok(())
    }

    /// Removes the named rules
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it
    pub async fn rss_remove_rules<I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fields = Params::new().with("ruleName", join(names, PIPE));
        self.post(Namespace::Rss, "removeRule", fields).await?;
        Ok(())
    }

    /// All auto-downloading rules keyed by name
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn rss_rules(&self) -> Result<HashMap<String, RssRule>> {
        self.get(Namespace::Rss, "rules", Params::new())
            .await?
            .json()
    }

    /// Titles of the articles matched by a rule, keyed by feed name
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, the server rejects it
    /// or the response cannot be parsed
    pub async fn rss_matching_articles(
        &self,
        rule_name: &str,
    ) -> Result<HashMap<String, Vec<String>>> {
        let query = Params::new().with("ruleName", rule_name);
        self.get(Namespace::Rss, "matchingArticles", query)
            .await?
            .json()
    }
}
