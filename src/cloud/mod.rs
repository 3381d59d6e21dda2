//! Cloud persistence: REST client, background sync and merge-on-load.

mod client;
mod error;
mod player;
mod rows;
mod sync;

pub use client::{CloudClient, PROFILES_TABLE, PROGRESS_TABLE, REWARDS_TABLE};
pub use error::CloudError;
pub use player::CloudSync;
pub use rows::{PlayerProfileRow, ProgressRow, RewardsRow};
pub use sync::{SyncPayload, SyncQueue, SyncStatus};
