//! Reelkit is a timeline engine for layered media compositions.
//!
//! A [`Session`] owns one [`Composition`] on a fixed canvas and drives a host
//! [`MediaEngine`] that decodes, draws and plays it:
//!
//! - Add color, text, image, video and audio layers; media is scaled to fit the canvas
//! - Append clips back to back in the order they were requested
//! - Play, pause, seek, record and poll the playhead
#![forbid(unsafe_code)]

pub(crate) mod animation;
pub(crate) mod composition;
pub(crate) mod foundation;
pub(crate) mod layout;
/// Session-oriented editing and playback API.
pub mod session;

pub use crate::animation::anim::{Keyframe, KeyframeTrack, Lerp};
pub use crate::composition::cursor::{Placement, TimelineCursor};
pub use crate::composition::model::{
    AudioContent, Border, ColorContent, Composition, ImageContent, Layer, LayerContent,
    LayerDuration, MediaAsset, MediaKind, MediaSource, StrokePosition, TextAlign, TextBaseline,
    TextContent, TextStroke, VideoContent,
};
pub use crate::composition::registry::LayerRegistry;
pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Affine, Canvas, Point, Size, Transform, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::layout::fit::{FitTransform, Framing, compute_fit};
pub use crate::session::edit_session::{MediaRequest, Session, SessionOpts};
pub use crate::session::engine::{FileSource, MediaEngine, PlaybackClock, RecordOpts};
pub use crate::session::monitor::{PlaybackMonitor, PlaybackStatus};
