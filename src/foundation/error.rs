/// Convenience result type used across reelkit.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by composition and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Zero, negative or non-finite media/canvas dimensions passed to the fit calculator.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A keyframe track with no keys or non-increasing key times.
    #[error("invalid track: {0}")]
    InvalidTrack(String),

    /// The file source or media engine could not provide a decodable asset.
    #[error("asset load failure: {0}")]
    AssetLoadFailure(String),

    /// The media engine failed during play, seek or record.
    #[error("playback failure: {0}")]
    PlaybackFailure(String),

    /// Invalid user-provided layer, placement or option data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The hosting session ended before the operation could complete.
    #[error("session closed")]
    SessionClosed,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`ReelError::InvalidTrack`] value.
    pub fn invalid_track(msg: impl Into<String>) -> Self {
        Self::InvalidTrack(msg.into())
    }

    /// Build a [`ReelError::AssetLoadFailure`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoadFailure(msg.into())
    }

    /// Build a [`ReelError::PlaybackFailure`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::PlaybackFailure(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Re-tag any error coming back from an asset collaborator as [`ReelError::AssetLoadFailure`].
    pub(crate) fn into_asset_load(self) -> Self {
        match self {
            Self::AssetLoadFailure(_) | Self::SessionClosed => self,
            other => Self::AssetLoadFailure(other.to_string()),
        }
    }

    /// Re-tag any error coming back from the engine's transport as [`ReelError::PlaybackFailure`].
    pub(crate) fn into_playback(self) -> Self {
        match self {
            Self::PlaybackFailure(_) => self,
            other => Self::PlaybackFailure(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
