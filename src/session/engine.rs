//! Boundaries to the external collaborators.
//!
//! reelkit never decodes bytes or touches pixels. It hands validated layers to a
//! [`MediaEngine`], learns intrinsic sizes from it, and gets sources from a [`FileSource`].
//! Futures returned by these traits are polled on the session's own task and need not be `Send`.

use crate::{
    composition::model::{Layer, MediaAsset, MediaKind, MediaSource},
    foundation::error::{ReelError, ReelResult},
};

/// Options for [`MediaEngine::record`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordOpts {
    /// Output frames per second.
    pub frame_rate: f64,
}

impl Default for RecordOpts {
    fn default() -> Self {
        Self { frame_rate: 30.0 }
    }
}

impl RecordOpts {
    pub fn validate(self) -> ReelResult<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ReelError::validation(
                "record frame_rate must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Canvas-backed compositing engine that owns decoding, drawing and recording.
#[allow(async_fn_in_trait)]
pub trait MediaEngine {
    /// Start decoding `source` and resolve once its metadata is ready.
    ///
    /// Resolves exactly once: with the asset, or with an error the session reports as
    /// [`ReelError::AssetLoadFailure`].
    async fn load(&self, source: &MediaSource, kind: MediaKind) -> ReelResult<MediaAsset>;

    /// Mirror a validated layer into the engine's composition at `index`.
    fn attach_layer(&self, index: usize, layer: &Layer) -> ReelResult<()>;

    /// Drop every attached layer and mirror `layers` in their place, indexed by position.
    ///
    /// On error the engine must keep its previous layers.
    fn replace_layers(&self, layers: &[Layer]) -> ReelResult<()>;

    /// Play from the current position; resolves when playback finishes.
    async fn play(&self) -> ReelResult<()>;

    fn pause(&self) -> ReelResult<()>;

    /// Stop playback and rewind.
    fn stop(&self) -> ReelResult<()>;

    /// Move the playhead to `time` seconds (already clamped to the composition).
    fn seek(&self, time: f64) -> ReelResult<()>;

    /// Render the whole composition and return the encoded container bytes.
    async fn record(&self, opts: RecordOpts) -> ReelResult<Vec<u8>>;
}

/// Read-only playback clock sampled by [`crate::PlaybackMonitor`].
pub trait PlaybackClock: Send + Sync {
    /// Playhead position in seconds.
    fn current_time(&self) -> f64;
    /// Total length the engine reports, in seconds.
    fn duration(&self) -> f64;
}

/// File picker/reader that turns a user selection into a loadable source.
#[allow(async_fn_in_trait)]
pub trait FileSource {
    /// Ask for one file matching the MIME filter `accept` (e.g. `"image/*"`).
    ///
    /// `Ok(None)` means the user dismissed the picker.
    async fn pick(&self, accept: &str) -> ReelResult<Option<MediaSource>>;
}
