use std::{path::Path, sync::Arc, time::Duration};

use tokio::sync::{Mutex, watch};

use crate::{
    animation::anim::KeyframeTrack,
    composition::cursor::{Placement, TimelineCursor},
    composition::model::{
        AudioContent, ColorContent, Composition, ImageContent, Layer, LayerContent,
        LayerDuration, MediaAsset, MediaKind, MediaSource, TextContent, VideoContent,
    },
    foundation::color::Rgba8,
    foundation::core::{Canvas, Size, Transform},
    foundation::error::{ReelError, ReelResult},
    layout::fit::{Framing, compute_fit},
    session::engine::{FileSource, MediaEngine, PlaybackClock, RecordOpts},
    session::monitor::PlaybackMonitor,
    session::queue::{AppendQueue, Ticket},
};

/// Session configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Fixed drawing surface size.
    pub canvas: Canvas,
    /// Color behind all layers.
    pub background: Rgba8,
    /// Length given to images, color and text blocks, and media without a known length.
    pub default_clip_secs: f64,
    /// Framing applied to image layers.
    pub image_framing: Framing,
    /// Framing applied to video layers.
    pub video_framing: Framing,
    /// Playback monitor poll interval.
    pub poll_interval_ms: u64,
    /// Frame rate used by [`Session::record`].
    pub record_frame_rate: f64,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Rgba8::BLACK,
            default_clip_secs: 5.0,
            image_framing: Framing::Slide { window_secs: 5.0 },
            video_framing: Framing::Static,
            poll_interval_ms: 16,
            record_frame_rate: 30.0,
        }
    }
}

impl SessionOpts {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            ReelError::Other(anyhow::Error::new(e).context(format!("read {}", path.display())))
        })?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> ReelResult<()> {
        self.canvas.validate()?;
        if !self.default_clip_secs.is_finite() || self.default_clip_secs <= 0.0 {
            return Err(ReelError::validation(
                "default_clip_secs must be finite and > 0",
            ));
        }
        self.image_framing.validate()?;
        self.video_framing.validate()?;
        if self.poll_interval_ms == 0 {
            return Err(ReelError::validation("poll_interval_ms must be > 0"));
        }
        RecordOpts {
            frame_rate: self.record_frame_rate,
        }
        .validate()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// One "add image/video/audio" request.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaRequest {
    pub kind: MediaKind,
    pub source: MediaSource,
    pub placement: Placement,
    /// Explicit length in seconds; otherwise the media's own length or the session default.
    pub duration: Option<f64>,
}

impl MediaRequest {
    /// Request with the default placement for `kind`: video starts at `0`, images and audio
    /// are appended after everything already placed.
    pub fn new(kind: MediaKind, source: impl Into<MediaSource>) -> Self {
        let placement = match kind {
            MediaKind::Video => Placement::At(0.0),
            MediaKind::Image | MediaKind::Audio => Placement::Sequential,
        };
        Self {
            kind,
            source: source.into(),
            placement,
            duration: None,
        }
    }

    pub fn image(source: impl Into<MediaSource>) -> Self {
        Self::new(MediaKind::Image, source)
    }

    pub fn video(source: impl Into<MediaSource>) -> Self {
        Self::new(MediaKind::Video, source)
    }

    pub fn audio(source: impl Into<MediaSource>) -> Self {
        Self::new(MediaKind::Audio, source)
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }
}

/// Editing session over one composition and one media engine.
///
/// All methods take `&self`, so several add requests can be in flight on the same task.
/// Requests with [`Placement::Sequential`] are placed in the order the methods were *called*:
/// the start time is read from the cursor only when the request's turn to append comes, after
/// every earlier sequential request has appended, failed or been dropped.
pub struct Session<E> {
    engine: Arc<E>,
    opts: SessionOpts,
    comp: Mutex<Composition>,
    queue: AppendQueue,
    closed: watch::Sender<bool>,
}

impl<E> Session<E>
where
    E: MediaEngine,
{
    pub fn new(engine: E, opts: SessionOpts) -> ReelResult<Self> {
        opts.validate()?;
        let comp = Composition::new(opts.canvas, opts.background)?;
        let (closed, _) = watch::channel(false);
        Ok(Self {
            engine: Arc::new(engine),
            opts,
            comp: Mutex::new(comp),
            queue: AppendQueue::new(),
            closed,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Copy of the composition as it is now.
    pub async fn snapshot(&self) -> Composition {
        self.comp.lock().await.clone()
    }

    pub async fn duration(&self) -> f64 {
        self.comp.lock().await.duration()
    }

    /// Where a sequential layer appended right now would start.
    pub async fn next_start(&self) -> f64 {
        TimelineCursor::next_start(&*self.comp.lock().await)
    }

    /// Replace every layer at once, in the composition and in the engine.
    ///
    /// Both keep the old sequence if any layer is invalid or the engine rejects the new one.
    #[tracing::instrument(skip_all, fields(layers = layers.len()))]
    pub async fn replace_layers(&self, layers: Vec<Layer>) -> ReelResult<()> {
        let mut comp = self.comp.lock().await;
        self.ensure_open()?;
        let mut next = comp.clone();
        next.replace_layers(layers)?;
        self.engine
            .replace_layers(next.layers())
            .map_err(ReelError::into_asset_load)?;
        *comp = next;
        tracing::debug!(duration = comp.duration(), "layers replaced");
        Ok(())
    }

    /// Add a solid-color block.
    pub fn add_color(
        &self,
        placement: Placement,
        duration: impl Into<LayerDuration>,
        content: ColorContent,
    ) -> impl Future<Output = ReelResult<usize>> {
        self.add_static(placement, duration.into(), LayerContent::Color(content))
    }

    /// Add a text block.
    pub fn add_text(
        &self,
        placement: Placement,
        duration: impl Into<LayerDuration>,
        content: TextContent,
    ) -> impl Future<Output = ReelResult<usize>> {
        self.add_static(placement, duration.into(), LayerContent::Text(content))
    }

    /// Load media through the engine and add it once ready.
    ///
    /// The place in the sequential order is taken when this method is called, not when the
    /// returned future is first polled. Dropping the future gives the place up.
    pub fn add_media(&self, req: MediaRequest) -> impl Future<Output = ReelResult<usize>> {
        let ticket = self.ticket_for(req.placement);
        self.load_and_append(ticket, req)
    }

    /// Ask `files` for a source matching `kind`, then add it like [`add_media`](Self::add_media).
    ///
    /// Resolves to `Ok(None)` when the user dismisses the picker.
    pub fn pick_and_add<'a, F>(
        &'a self,
        files: &'a F,
        kind: MediaKind,
        placement: Placement,
    ) -> impl Future<Output = ReelResult<Option<usize>>> + 'a
    where
        F: FileSource,
    {
        let ticket = self.ticket_for(placement);
        async move {
            let picked = self
                .until_closed(async {
                    files
                        .pick(kind.mime_filter())
                        .await
                        .map_err(ReelError::into_asset_load)
                })
                .await?;
            let Some(source) = picked else {
                tracing::debug!(?kind, "file selection dismissed");
                return Ok(None);
            };
            let req = MediaRequest {
                kind,
                source,
                placement,
                duration: None,
            };
            self.load_and_append(ticket, req).await.map(Some)
        }
    }

    /// Play from the current position; resolves when the engine finishes.
    #[tracing::instrument(skip(self))]
    pub async fn play(&self) -> ReelResult<()> {
        self.ensure_open()?;
        self.engine.play().await.map_err(ReelError::into_playback)
    }

    pub fn pause(&self) -> ReelResult<()> {
        self.ensure_open()?;
        self.engine.pause().map_err(ReelError::into_playback)
    }

    pub fn stop(&self) -> ReelResult<()> {
        self.ensure_open()?;
        self.engine.stop().map_err(ReelError::into_playback)
    }

    /// Seek to `time` seconds, clamped to the composition duration.
    pub async fn seek(&self, time: f64) -> ReelResult<()> {
        if !time.is_finite() || time < 0.0 {
            return Err(ReelError::validation(format!(
                "seek time must be finite and >= 0 (got {time})"
            )));
        }
        self.ensure_open()?;
        let target = time.min(self.duration().await);
        self.engine.seek(target).map_err(ReelError::into_playback)
    }

    pub fn seek_to_start(&self) -> ReelResult<()> {
        self.ensure_open()?;
        self.engine.seek(0.0).map_err(ReelError::into_playback)
    }

    /// Record at the configured frame rate.
    pub async fn record(&self) -> ReelResult<Vec<u8>> {
        self.record_with(RecordOpts {
            frame_rate: self.opts.record_frame_rate,
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn record_with(&self, opts: RecordOpts) -> ReelResult<Vec<u8>> {
        opts.validate()?;
        self.ensure_open()?;
        let bytes = self
            .engine
            .record(opts)
            .await
            .map_err(ReelError::into_playback)?;
        tracing::debug!(bytes = bytes.len(), "recording finished");
        Ok(bytes)
    }

    /// Start polling the engine clock at the configured interval.
    pub fn monitor(&self) -> PlaybackMonitor
    where
        E: PlaybackClock + 'static,
    {
        PlaybackMonitor::spawn(Arc::clone(&self.engine), self.opts.poll_interval())
    }

    /// End the session: pending adds resolve to [`ReelError::SessionClosed`] without appending.
    pub fn close(&self) {
        if !self.closed.send_replace(true) {
            tracing::debug!("session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    fn ensure_open(&self) -> ReelResult<()> {
        if self.is_closed() {
            return Err(ReelError::SessionClosed);
        }
        Ok(())
    }

    fn ticket_for(&self, placement: Placement) -> Option<Ticket<'_>> {
        placement.is_sequential().then(|| self.queue.ticket())
    }

    fn add_static(
        &self,
        placement: Placement,
        duration: LayerDuration,
        content: LayerContent,
    ) -> impl Future<Output = ReelResult<usize>> {
        let ticket = self.ticket_for(placement);
        async move {
            let layer = Layer::new(0.0, duration, content)?;
            self.append(ticket, placement, layer).await
        }
    }

    #[tracing::instrument(skip_all, fields(kind = ?req.kind, placement = ?req.placement))]
    async fn load_and_append(&self, ticket: Option<Ticket<'_>>, req: MediaRequest) -> ReelResult<usize> {
        let asset = self
            .until_closed(async {
                self.engine
                    .load(&req.source, req.kind)
                    .await
                    .map_err(ReelError::into_asset_load)
            })
            .await?;
        if asset.kind != req.kind {
            return Err(ReelError::asset_load(format!(
                "expected {:?} media, engine decoded {:?}",
                req.kind, asset.kind
            )));
        }

        let duration = self.media_duration(&req, &asset);
        let content = match req.kind {
            MediaKind::Image => LayerContent::Image(ImageContent {
                source: req.source,
                intrinsic: asset.size,
            }),
            MediaKind::Video => LayerContent::Video(VideoContent {
                source: req.source,
                intrinsic: asset.size,
            }),
            MediaKind::Audio => LayerContent::Audio(AudioContent { source: req.source }),
        };
        let mut layer = Layer::new(0.0, duration, content)?;
        if let Some(track) = self.fitted_track(req.kind, asset.size) {
            layer = layer.with_transform(track);
        }
        self.append(ticket, req.placement, layer).await
    }

    fn media_duration(&self, req: &MediaRequest, asset: &MediaAsset) -> f64 {
        if let Some(secs) = req.duration {
            return secs;
        }
        let natural = match req.kind {
            MediaKind::Image => None,
            MediaKind::Video | MediaKind::Audio => asset
                .duration
                .filter(|d| d.is_finite() && *d > 0.0),
        };
        natural.unwrap_or(self.opts.default_clip_secs)
    }

    /// Fit transform track for visual media, or `None` to leave the layer untransformed.
    fn fitted_track(&self, kind: MediaKind, size: Option<Size>) -> Option<KeyframeTrack<Transform>> {
        let framing = match kind {
            MediaKind::Image => self.opts.image_framing,
            MediaKind::Video => self.opts.video_framing,
            MediaKind::Audio => return None,
        };
        let fitted = size
            .ok_or_else(|| ReelError::invalid_dimensions("engine reported no intrinsic size"))
            .and_then(|media| compute_fit(media, self.opts.canvas.size()))
            .and_then(|fit| {
                tracing::debug!(
                    scale = fit.scale,
                    offset_x = fit.offset_x,
                    offset_y = fit.offset_y,
                    "computed fit"
                );
                framing.track(fit)
            });
        match fitted {
            Ok(track) => Some(track),
            Err(err) => {
                tracing::warn!(%err, ?kind, "fit failed; adding layer untransformed");
                None
            }
        }
    }

    #[tracing::instrument(skip_all, fields(kind = layer.content.kind_name(), placement = ?placement))]
    async fn append(
        &self,
        ticket: Option<Ticket<'_>>,
        placement: Placement,
        mut layer: Layer,
    ) -> ReelResult<usize> {
        if let Some(ticket) = &ticket {
            if !ticket.is_turn() {
                tracing::debug!(ticket = ticket.number(), "waiting for earlier sequential adds");
            }
            self.until_closed(async {
                ticket.turn().await;
                Ok(())
            })
            .await?;
        }

        let mut comp = self.comp.lock().await;
        self.ensure_open()?;
        layer.start_time = placement.resolve(&comp);
        layer.validate()?;
        let idx = comp.layers().len();
        self.engine
            .attach_layer(idx, &layer)
            .map_err(ReelError::into_asset_load)?;
        let start = layer.start_time;
        let idx = TimelineCursor::advance(&mut comp, layer)?;
        tracing::debug!(idx, start, "layer placed");
        Ok(idx)
    }

    async fn until_closed<T>(&self, fut: impl Future<Output = ReelResult<T>>) -> ReelResult<T> {
        let mut closed = self.closed.subscribe();
        tokio::select! {
            biased;
            _ = closed.wait_for(|c| *c) => Err(ReelError::SessionClosed),
            res = fut => res,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit_session.rs"]
mod tests;
