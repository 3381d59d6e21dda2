use crate::cloud::client::CloudClient;
use crate::cloud::error::CloudError;
use crate::game::{GameIntent, GameStore};

/// Player bootstrap and merge-on-load against the remote store.
///
/// The plain methods log and swallow failures so the game carries on
/// offline; the `try_` variants hand the error back.
#[derive(Clone)]
pub struct CloudSync {
    client: CloudClient,
    player_name: String,
}

impl CloudSync {
    pub fn new(client: CloudClient, player_name: impl Into<String>) -> Self {
        Self {
            client,
            player_name: player_name.into(),
        }
    }

    pub fn client(&self) -> &CloudClient {
        &self.client
    }

    pub async fn initialize_player(&self, store: &GameStore) {
        if let Err(e) = self.try_initialize_player(store).await {
            tracing::warn!(player = %self.player_name, error = %e, "Failed to initialize cloud player");
        }
    }

    /// Find or create the remote profile, record it, then pull remote state.
    ///
    /// Does nothing when the store already knows its player id.
    pub async fn try_initialize_player(&self, store: &GameStore) -> Result<String, CloudError> {
        if let Some(player_id) = store.player_id() {
            return Ok(player_id);
        }

        let profile = match self.client.find_player(&self.player_name).await? {
            Some(profile) => profile,
            None => {
                tracing::info!(player = %self.player_name, "Creating cloud player profile");
                self.client.create_player(&self.player_name).await?
            }
        };

        store.dispatch(GameIntent::AssignPlayer {
            player_id: profile.id.clone(),
            player_name: profile.player_name,
        });
        self.try_load_from_cloud(store).await?;
        Ok(profile.id)
    }

    pub async fn load_from_cloud(&self, store: &GameStore) {
        if let Err(e) = self.try_load_from_cloud(store).await {
            tracing::warn!(error = %e, "Failed to load state from cloud");
        }
    }

    /// Merge remote state over local state. Returns `false` when there is no
    /// player id to load for.
    pub async fn try_load_from_cloud(&self, store: &GameStore) -> Result<bool, CloudError> {
        let Some(player_id) = store.player_id() else {
            return Ok(false);
        };

        let snapshot = self.client.fetch_snapshot(&player_id).await?;
        tracing::debug!(
            player_id = %player_id,
            lessons = snapshot.progress.len(),
            has_rewards = snapshot.rewards.is_some(),
            "Loaded state from cloud"
        );
        store.dispatch(GameIntent::ApplyRemote(snapshot));
        Ok(true)
    }
}
