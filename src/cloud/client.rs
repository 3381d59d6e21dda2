use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cloud::error::CloudError;
use crate::cloud::rows::{PlayerProfileRow, ProgressRow, RewardsRow};
use crate::config::{CloudConfig, CredentialStatus, SecureString, CLOUD_URL_ENV};
use crate::game::RemoteSnapshot;

pub const PROFILES_TABLE: &str = "player_profiles";
pub const PROGRESS_TABLE: &str = "player_progress";
pub const REWARDS_TABLE: &str = "player_rewards";

const PREFER: &str = "Prefer";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Client for the PostgREST-style REST API of the remote store.
#[derive(Clone)]
pub struct CloudClient {
    http: Client,
    base: Url,
    key: SecureString,
}

#[derive(Serialize)]
struct NewPlayer<'a> {
    player_name: &'a str,
}

impl CloudClient {
    /// Fails fast with [`CloudError::NotConfigured`] when URL or key is missing.
    pub fn from_config(config: &CloudConfig) -> Result<Self, CloudError> {
        let url = config.resolve_url().ok_or_else(|| CloudError::NotConfigured {
            reason: format!("cloud.url is not set and {CLOUD_URL_ENV} is empty"),
        })?;
        let key = match config.resolve_key() {
            CredentialStatus::Configured(key) => key,
            CredentialStatus::Unconfigured { reason } => {
                return Err(CloudError::NotConfigured { reason })
            }
        };
        Self::new(
            &url,
            key,
            Duration::from_secs(u64::from(config.timeout_seconds)),
        )
    }

    pub fn new(url: &str, key: SecureString, timeout: Duration) -> Result<Self, CloudError> {
        let base = Url::parse(url).map_err(|e| CloudError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(CloudError::InvalidUrl {
                url: url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CloudError::Client)?;

        Ok(Self { http, base, key })
    }

    /// Look up a profile by name.
    pub async fn find_player(&self, name: &str) -> Result<Option<PlayerProfileRow>, CloudError> {
        let mut url = self.table_url(PROFILES_TABLE);
        url.query_pairs_mut()
            .append_pair("select", "id,player_name")
            .append_pair("player_name", &format!("eq.{name}"))
            .append_pair("limit", "1");

        let rows: Vec<PlayerProfileRow> = self
            .send_json(PROFILES_TABLE, self.request(Method::GET, url))
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create_player(&self, name: &str) -> Result<PlayerProfileRow, CloudError> {
        let url = self.table_url(PROFILES_TABLE);
        let request = self
            .request(Method::POST, url)
            .header(PREFER, HeaderValue::from_static(RETURN_REPRESENTATION))
            .json(&NewPlayer { player_name: name });

        let rows: Vec<PlayerProfileRow> = self.send_json(PROFILES_TABLE, request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| CloudError::MissingProfile {
                name: name.to_string(),
            })
    }

    /// Insert-or-update keyed by (player_id, digraph_id). One request for all rows.
    pub async fn upsert_progress(&self, rows: &[ProgressRow]) -> Result<(), CloudError> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut url = self.table_url(PROGRESS_TABLE);
        url.query_pairs_mut()
            .append_pair("on_conflict", "player_id,digraph_id");

        let request = self
            .request(Method::POST, url)
            .header(PREFER, HeaderValue::from_static(MERGE_DUPLICATES))
            .json(rows);
        self.send(PROGRESS_TABLE, request).await?;
        Ok(())
    }

    /// Insert-or-update keyed by player_id.
    pub async fn upsert_rewards(&self, row: &RewardsRow) -> Result<(), CloudError> {
        let mut url = self.table_url(REWARDS_TABLE);
        url.query_pairs_mut().append_pair("on_conflict", "player_id");

        let request = self
            .request(Method::POST, url)
            .header(PREFER, HeaderValue::from_static(MERGE_DUPLICATES))
            .json(row);
        self.send(REWARDS_TABLE, request).await?;
        Ok(())
    }

    pub async fn fetch_progress(&self, player_id: &str) -> Result<Vec<ProgressRow>, CloudError> {
        let mut url = self.table_url(PROGRESS_TABLE);
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("player_id", &format!("eq.{player_id}"));

        self.send_json(PROGRESS_TABLE, self.request(Method::GET, url))
            .await
    }

    pub async fn fetch_rewards(&self, player_id: &str) -> Result<Option<RewardsRow>, CloudError> {
        let mut url = self.table_url(REWARDS_TABLE);
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("player_id", &format!("eq.{player_id}"))
            .append_pair("limit", "1");

        let rows: Vec<RewardsRow> = self
            .send_json(REWARDS_TABLE, self.request(Method::GET, url))
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Both tables for one player, decoded for merging.
    pub async fn fetch_snapshot(&self, player_id: &str) -> Result<RemoteSnapshot, CloudError> {
        let progress = self.fetch_progress(player_id).await?;
        let rewards = self.fetch_rewards(player_id).await?;
        Ok(RemoteSnapshot {
            progress: progress.into_iter().map(ProgressRow::into_progress).collect(),
            rewards: rewards.map(RewardsRow::into_remote),
        })
    }

    fn table_url(&self, table: &str) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["rest", "v1", table]);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.key.expose())
            .bearer_auth(self.key.expose())
    }

    async fn send(
        &self,
        table: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, CloudError> {
        let response = request
            .send()
            .await
            .map_err(|e| CloudError::transport(table, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CloudError::Status {
                table,
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        table: &'static str,
        request: RequestBuilder,
    ) -> Result<T, CloudError> {
        let response = self.send(table, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| CloudError::Decode { table, source })
    }
}
