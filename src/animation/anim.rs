use crate::foundation::{
    core::{Transform, Vec2},
    error::{ReelError, ReelResult},
};

/// Interpolation contract for keyframed value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

impl Lerp for Transform {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            scale_x: <f64 as Lerp>::lerp(&a.scale_x, &b.scale_x, t),
            scale_y: <f64 as Lerp>::lerp(&a.scale_y, &b.scale_y, t),
            translate_x: <f64 as Lerp>::lerp(&a.translate_x, &b.translate_x, t),
            translate_y: <f64 as Lerp>::lerp(&a.translate_y, &b.translate_y, t),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One control point of a [`KeyframeTrack`].
pub struct Keyframe<T> {
    /// Clip-local time in seconds.
    pub time: f64,
    /// Value at `time`.
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Build a keyframe at `time` seconds.
    pub fn new(time: f64, value: T) -> Self {
        Self { time, value }
    }
}

/// Time-indexed animation over clip-local seconds.
///
/// Keys are non-empty with strictly increasing times; this is enforced at construction and on
/// deserialization, so every live track is sampleable.
///
/// Sampling clamps outside the key range and interpolates linearly in between:
///
/// ```
/// use reelkit::{Keyframe, KeyframeTrack};
///
/// let track = KeyframeTrack::new(vec![Keyframe::new(0.0, 0.0), Keyframe::new(5.0, 10.0)]).unwrap();
/// assert_eq!(track.sample(-1.0), 0.0);
/// assert_eq!(track.sample(2.5), 5.0);
/// assert_eq!(track.sample(10.0), 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeTrack<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T> KeyframeTrack<T> {
    /// Validate and wrap `keys`.
    pub fn new(keys: Vec<Keyframe<T>>) -> ReelResult<Self> {
        if keys.is_empty() {
            return Err(ReelError::invalid_track(
                "track must have at least one keyframe",
            ));
        }
        for (idx, k) in keys.iter().enumerate() {
            if !k.time.is_finite() || k.time < 0.0 {
                return Err(ReelError::invalid_track(format!(
                    "keyframe {idx} time must be finite and >= 0 (got {})",
                    k.time
                )));
            }
        }
        if let Some(idx) = keys.windows(2).position(|w| w[0].time >= w[1].time) {
            return Err(ReelError::invalid_track(format!(
                "keyframe times must be strictly increasing ({} then {})",
                keys[idx].time,
                keys[idx + 1].time
            )));
        }
        Ok(Self { keys })
    }

    /// Single-key track: a constant over the whole clip.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` when the track has no keys, which a validated track never does.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.keys.len() == 1
    }

    /// Time of the last key; `0.0` for constant tracks.
    pub fn end_time(&self) -> f64 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    pub fn into_keys(self) -> Vec<Keyframe<T>> {
        self.keys
    }
}

impl<T> KeyframeTrack<T>
where
    T: Lerp + Clone,
{
    /// Sample the track at clip-local time `t`.
    pub fn sample(&self, t: f64) -> T {
        let idx = self.keys.partition_point(|k| k.time <= t);

        if idx == 0 {
            return self.keys[0].value.clone();
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        if t == a.time {
            return a.value.clone();
        }
        let u = (t - a.time) / (b.time - a.time);
        T::lerp(&a.value, &b.value, u)
    }
}

impl<T> TryFrom<Vec<Keyframe<T>>> for KeyframeTrack<T> {
    type Error = ReelError;

    fn try_from(keys: Vec<Keyframe<T>>) -> ReelResult<Self> {
        Self::new(keys)
    }
}

impl<T: serde::Serialize> serde::Serialize for KeyframeTrack<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.keys.serialize(serializer)
    }
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for KeyframeTrack<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let keys = Vec::<Keyframe<T>>::deserialize(deserializer)?;
        Self::new(keys).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
