pub mod identity;
pub mod query;
pub mod smoke;

use ecobonus_core::{FileStore, RewardsApi, UreqTransport};

/// The API as wired by `RewardsApi::from_config`.
pub type Api = RewardsApi<FileStore, UreqTransport>;
