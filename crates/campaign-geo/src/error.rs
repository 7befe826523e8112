use campaign_core::{CampaignError, ErrorCode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorKind {
    /// A shape or coordinate violates its invariants.
    InvalidArgument,
    /// A stored geofence carries a type tag this crate does not know.
    UnsupportedGeofenceType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoError {
    pub kind: GeoErrorKind,
    pub message: String,
}

impl GeoError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: GeoErrorKind::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn unsupported_type(tag: &str) -> Self {
        Self {
            kind: GeoErrorKind::UnsupportedGeofenceType,
            message: format!("unsupported geofence type `{tag}`"),
        }
    }
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GeoError {}

impl From<GeoError> for CampaignError {
    fn from(err: GeoError) -> Self {
        let code = match err.kind {
            GeoErrorKind::InvalidArgument => ErrorCode::InvalidArgument,
            GeoErrorKind::UnsupportedGeofenceType => ErrorCode::UnsupportedGeofenceType,
        };
        CampaignError::new(code, err.message)
    }
}

pub type GeoResult<T> = Result<T, GeoError>;
