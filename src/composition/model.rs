use crate::{
    animation::anim::KeyframeTrack,
    composition::registry::LayerRegistry,
    foundation::color::Rgba8,
    foundation::core::{Canvas, Size, Transform},
    foundation::error::{ReelError, ReelResult},
};

/// Media category accepted by the file source and the media engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still raster image.
    Image,
    /// Video stream (frames and optional audio).
    Video,
    /// Audio-only stream.
    Audio,
}

impl MediaKind {
    /// MIME filter handed to the file picker.
    pub fn mime_filter(self) -> &'static str {
        match self {
            Self::Image => "image/*",
            Self::Video => "video/*",
            Self::Audio => "audio/*",
        }
    }

    /// `true` for kinds that draw pixels and therefore get a fit transform.
    pub fn is_visual(self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

/// Loadable reference to media bytes (a data URL, blob URL or path).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MediaSource(pub String);

impl MediaSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaSource {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Metadata reported by the media engine once an asset is ready.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaAsset {
    /// Kind the engine decoded the bytes as.
    pub kind: MediaKind,
    /// Intrinsic pixel size; `None` for audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Natural playback length in seconds for time-based media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl MediaAsset {
    pub fn image(width: f64, height: f64) -> Self {
        Self {
            kind: MediaKind::Image,
            size: Some(Size::new(width, height)),
            duration: None,
        }
    }

    pub fn video(width: f64, height: f64, duration: f64) -> Self {
        Self {
            kind: MediaKind::Video,
            size: Some(Size::new(width, height)),
            duration: Some(duration),
        }
    }

    pub fn audio(duration: f64) -> Self {
        Self {
            kind: MediaKind::Audio,
            size: None,
            duration: Some(duration),
        }
    }
}

/// How long a layer stays on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerDuration {
    /// Plays for this many seconds (must be finite and `> 0`).
    Finite(f64),
    /// Looping background content; never extends the composition duration.
    Unbounded,
}

impl LayerDuration {
    pub fn secs(self) -> Option<f64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unbounded => None,
        }
    }
}

impl From<f64> for LayerDuration {
    fn from(secs: f64) -> Self {
        Self::Finite(secs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Solid outline drawn around a color block.
pub struct Border {
    pub color: Rgba8,
    pub thickness: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Solid-color rectangle.
pub struct ColorContent {
    pub color: Rgba8,
    pub x: f64,
    pub y: f64,
    /// `None` fills the canvas width.
    #[serde(default)]
    pub width: Option<f64>,
    /// `None` fills the canvas height.
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub border: Option<Border>,
    pub opacity: f64,
}

impl Default for ColorContent {
    fn default() -> Self {
        Self {
            color: Rgba8::RED,
            x: 0.0,
            y: 0.0,
            width: Some(300.0),
            height: Some(150.0),
            border: Some(Border {
                color: Rgba8::BLACK,
                thickness: 2.0,
            }),
            opacity: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokePosition {
    Inside,
    Center,
    #[default]
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Outline around text glyphs.
pub struct TextStroke {
    pub color: Rgba8,
    #[serde(default)]
    pub position: StrokePosition,
    pub thickness: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text block drawn inside a layer box.
pub struct TextContent {
    pub text: String,
    /// CSS-style font shorthand, e.g. `"30px sans-serif"`.
    pub font: String,
    pub color: Rgba8,
    /// Layer box origin on the canvas.
    pub x: f64,
    pub y: f64,
    /// Layer box size; `None` fills the canvas.
    #[serde(default)]
    pub size: Option<Size>,
    /// Text anchor inside the layer box.
    pub text_x: f64,
    pub text_y: f64,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub baseline: TextBaseline,
    #[serde(default)]
    pub stroke: Option<TextStroke>,
    pub opacity: f64,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: "Hello World".to_string(),
            font: "30px sans-serif".to_string(),
            color: Rgba8::WHITE,
            x: 0.0,
            y: 0.0,
            size: Some(Size::new(400.0, 400.0)),
            text_x: 30.0,
            text_y: 30.0,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            stroke: Some(TextStroke {
                color: Rgba8::BLACK,
                position: StrokePosition::Outside,
                thickness: 2.0,
            }),
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Raster image drawn from a loaded source.
pub struct ImageContent {
    pub source: MediaSource,
    /// Intrinsic size reported by the engine, when it reported one.
    #[serde(default)]
    pub intrinsic: Option<Size>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Video stream drawn from a loaded source.
pub struct VideoContent {
    pub source: MediaSource,
    /// Intrinsic frame size reported by the engine, when it reported one.
    #[serde(default)]
    pub intrinsic: Option<Size>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Audio-only stream.
pub struct AudioContent {
    pub source: MediaSource,
}

/// Kind-specific payload of a layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerContent {
    Color(ColorContent),
    Image(ImageContent),
    Text(TextContent),
    Video(VideoContent),
    Audio(AudioContent),
}

impl LayerContent {
    /// Short kind label used in logs and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Image(_) => "image",
            Self::Text(_) => "text",
            Self::Video(_) => "video",
            Self::Audio(_) => "audio",
        }
    }

    fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Color(c) => {
                validate_finite(c.x, "color layer x")?;
                validate_finite(c.y, "color layer y")?;
                for (name, side) in [("width", c.width), ("height", c.height)] {
                    if let Some(v) = side
                        && (!v.is_finite() || v <= 0.0)
                    {
                        return Err(ReelError::validation(format!(
                            "color layer {name} must be finite and > 0 when set",
                        )));
                    }
                }
                if let Some(b) = &c.border
                    && (!b.thickness.is_finite() || b.thickness < 0.0)
                {
                    return Err(ReelError::validation(
                        "color layer border thickness must be finite and >= 0",
                    ));
                }
                validate_opacity(c.opacity, "color layer")
            }
            Self::Text(t) => {
                if t.text.is_empty() {
                    return Err(ReelError::validation("text layer text must be non-empty"));
                }
                if t.font.trim().is_empty() {
                    return Err(ReelError::validation("text layer font must be non-empty"));
                }
                for (name, v) in [("x", t.x), ("y", t.y), ("text_x", t.text_x), ("text_y", t.text_y)]
                {
                    validate_finite(v, &format!("text layer {name}"))?;
                }
                if let Some(size) = t.size
                    && !size.is_positive_finite()
                {
                    return Err(ReelError::validation(
                        "text layer size must be finite and > 0 when set",
                    ));
                }
                if let Some(s) = &t.stroke
                    && (!s.thickness.is_finite() || s.thickness < 0.0)
                {
                    return Err(ReelError::validation(
                        "text layer stroke thickness must be finite and >= 0",
                    ));
                }
                validate_opacity(t.opacity, "text layer")
            }
            Self::Image(i) => validate_source(&i.source, "image layer"),
            Self::Video(v) => validate_source(&v.source, "video layer"),
            Self::Audio(a) => validate_source(&a.source, "audio layer"),
        }
    }
}

/// One placed clip on the shared timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Timeline start in seconds.
    pub start_time: f64,
    pub duration: LayerDuration,
    pub content: LayerContent,
    /// Optional animated transform in clip-local seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<KeyframeTrack<Transform>>,
}

impl Layer {
    /// Build and validate a layer without a transform track.
    pub fn new(
        start_time: f64,
        duration: impl Into<LayerDuration>,
        content: LayerContent,
    ) -> ReelResult<Self> {
        let layer = Self {
            start_time,
            duration: duration.into(),
            content,
            transform: None,
        };
        layer.validate()?;
        Ok(layer)
    }

    /// Attach an animated transform.
    pub fn with_transform(mut self, track: KeyframeTrack<Transform>) -> Self {
        self.transform = Some(track);
        self
    }

    /// End of the layer on the timeline; `None` for unbounded layers.
    pub fn end_time(&self) -> Option<f64> {
        self.duration.secs().map(|d| self.start_time + d)
    }

    /// Transform at absolute timeline time `t`; identity when no track is attached.
    pub fn transform_at(&self, t: f64) -> Transform {
        self.transform
            .as_ref()
            .map_or(Transform::IDENTITY, |track| track.sample(t - self.start_time))
    }

    /// `true` when the layer covers absolute time `t` (`[start, end)`).
    pub fn is_active_at(&self, t: f64) -> bool {
        t >= self.start_time && self.end_time().is_none_or(|end| t < end)
    }

    /// Validate the shared envelope and kind-specific payload.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.start_time.is_finite() || self.start_time < 0.0 {
            return Err(ReelError::validation(format!(
                "{} layer start_time must be finite and >= 0 (got {})",
                self.content.kind_name(),
                self.start_time
            )));
        }
        if let LayerDuration::Finite(d) = self.duration
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(ReelError::validation(format!(
                "{} layer duration must be finite and > 0 (got {d})",
                self.content.kind_name(),
            )));
        }
        if let Some(end) = self.end_time()
            && !end.is_finite()
        {
            return Err(ReelError::validation(format!(
                "{} layer end time overflows",
                self.content.kind_name()
            )));
        }
        self.content.validate()
    }
}

/// A composition: canvas, background and the placed layers.
///
/// Layers are appended only through [`crate::TimelineCursor::advance`] or swapped wholesale with
/// [`Composition::replace_layers`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct Composition {
    pub(crate) canvas: Canvas,
    pub(crate) background: Rgba8,
    pub(crate) registry: LayerRegistry,
}

impl Composition {
    pub fn new(canvas: Canvas, background: Rgba8) -> ReelResult<Self> {
        canvas.validate()?;
        Ok(Self {
            canvas,
            background,
            registry: LayerRegistry::default(),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Read-only view of the registry.
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn layers(&self) -> &[Layer] {
        self.registry.layers()
    }

    /// `max(start + duration)` over finite layers; `0.0` when empty.
    pub fn duration(&self) -> f64 {
        self.registry.duration()
    }

    /// Replace the whole layer sequence. Nothing changes if any layer is invalid.
    pub fn replace_layers(&mut self, layers: Vec<Layer>) -> ReelResult<()> {
        self.registry = LayerRegistry::from_layers(layers)?;
        Ok(())
    }

    /// Layers covering absolute time `t`, in insertion order.
    pub fn active_layers_at(&self, t: f64) -> impl Iterator<Item = &Layer> {
        self.layers().iter().filter(move |l| l.is_active_at(t))
    }
}

fn validate_finite(v: f64, field: &str) -> ReelResult<()> {
    if !v.is_finite() {
        return Err(ReelError::validation(format!("{field} must be finite")));
    }
    Ok(())
}

fn validate_opacity(opacity: f64, kind: &str) -> ReelResult<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(ReelError::validation(format!(
            "{kind} opacity must be within [0, 1]",
        )));
    }
    Ok(())
}

fn validate_source(source: &MediaSource, kind: &str) -> ReelResult<()> {
    if source.as_str().trim().is_empty() {
        return Err(ReelError::validation(format!(
            "{kind} source must be non-empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
