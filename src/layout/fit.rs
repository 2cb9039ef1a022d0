use crate::{
    animation::anim::{Keyframe, KeyframeTrack},
    foundation::core::{Size, Transform},
    foundation::error::{ReelError, ReelResult},
};

/// Uniform scale plus centering offset that fits media inside a canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    pub fn to_transform(self) -> Transform {
        Transform {
            scale_x: self.scale,
            scale_y: self.scale,
            translate_x: self.offset_x,
            translate_y: self.offset_y,
        }
    }

    /// Size of the media once scaled.
    pub fn scaled(self, media: Size) -> Size {
        Size::new(media.width * self.scale, media.height * self.scale)
    }
}

/// Fit `media` into `canvas` along its dominant axis, centering the other axis.
///
/// Wide media (`width / height > 1`) spans the canvas width and is centered vertically. Everything
/// else, square media included, spans the canvas height and is centered horizontally. The result
/// does not depend on whether the pixels come from a still image or a video frame.
pub fn compute_fit(media: Size, canvas: Size) -> ReelResult<FitTransform> {
    if !media.is_positive_finite() {
        return Err(ReelError::invalid_dimensions(format!(
            "media dimensions must be finite and > 0 (got {}x{})",
            media.width, media.height
        )));
    }
    if !canvas.is_positive_finite() {
        return Err(ReelError::invalid_dimensions(format!(
            "canvas dimensions must be finite and > 0 (got {}x{})",
            canvas.width, canvas.height
        )));
    }

    let fit = if media.aspect_ratio() > 1.0 {
        let scale = canvas.width / media.width;
        FitTransform {
            scale,
            offset_x: 0.0,
            offset_y: (canvas.height - media.height * scale) / 2.0,
        }
    } else {
        let scale = canvas.height / media.height;
        FitTransform {
            scale,
            offset_x: (canvas.width - media.width * scale) / 2.0,
            offset_y: 0.0,
        }
    };

    // Extreme ratios can underflow the scale to zero or overflow the offsets.
    if !(fit.scale.is_finite() && fit.scale > 0.0)
        || !fit.offset_x.is_finite()
        || !fit.offset_y.is_finite()
    {
        return Err(ReelError::invalid_dimensions(format!(
            "fit of {}x{} into {}x{} is not representable",
            media.width, media.height, canvas.width, canvas.height
        )));
    }
    Ok(fit)
}

/// How a fitted layer reaches its final framing.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Framing {
    /// Hold the fitted transform for the whole clip.
    #[default]
    Static,
    /// Scale up from the untransformed media to the fitted transform.
    Grow {
        /// Clip-local seconds until the fitted transform is reached.
        window_secs: f64,
    },
    /// Start fitted and horizontally centered, then ease in the vertical centering offset.
    Slide {
        /// Clip-local seconds until the fitted transform is reached.
        window_secs: f64,
    },
}

impl Framing {
    pub fn validate(self) -> ReelResult<()> {
        match self {
            Self::Static => Ok(()),
            Self::Grow { window_secs } | Self::Slide { window_secs } => {
                if window_secs.is_finite() && window_secs > 0.0 {
                    Ok(())
                } else {
                    Err(ReelError::validation(format!(
                        "framing window_secs must be finite and > 0 (got {window_secs})"
                    )))
                }
            }
        }
    }

    /// Build the transform track that animates into `fit`.
    pub fn track(self, fit: FitTransform) -> ReelResult<KeyframeTrack<Transform>> {
        let end = fit.to_transform();
        let (start, window) = match self {
            Self::Static => return Ok(KeyframeTrack::constant(end)),
            Self::Grow { window_secs } => (Transform::IDENTITY, window_secs),
            Self::Slide { window_secs } => (
                Transform {
                    translate_y: 0.0,
                    ..end
                },
                window_secs,
            ),
        };
        if start == end {
            return Ok(KeyframeTrack::constant(end));
        }
        KeyframeTrack::new(vec![Keyframe::new(0.0, start), Keyframe::new(window, end)])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
