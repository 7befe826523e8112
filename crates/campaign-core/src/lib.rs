pub mod error;
pub mod ids;
pub mod time;

pub use error::{CampaignError, CampaignResult, ErrorCode};
pub use ids::{GeofenceId, VoterId};
pub use time::{now_epoch_millis, EpochMillis};
