use crate::{
    composition::model::{Composition, Layer},
    foundation::error::ReelResult,
};

/// Where a new layer starts on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Explicit start time in seconds.
    At(f64),
    /// Right after everything already placed (the cursor), decided at append time.
    Sequential,
}

impl Placement {
    pub fn is_sequential(self) -> bool {
        matches!(self, Self::Sequential)
    }

    /// Resolve the start time against the composition as it is *now*.
    pub fn resolve(self, comp: &Composition) -> f64 {
        match self {
            Self::At(t) => t,
            Self::Sequential => TimelineCursor::next_start(comp),
        }
    }
}

/// Next free insertion point on the shared timeline.
///
/// The cursor is the composition duration, so back-to-back appends never overlap. Callers
/// must read it at the moment they append; a value captured earlier goes stale as soon as
/// another append lands.
pub struct TimelineCursor;

impl TimelineCursor {
    /// Point right after the last-ending finite layer (`0.0` when empty).
    pub fn next_start(comp: &Composition) -> f64 {
        comp.duration()
    }

    /// Append `layer` and extend the composition duration; returns the layer index.
    pub fn advance(comp: &mut Composition, layer: Layer) -> ReelResult<usize> {
        let idx = comp.registry.push(layer)?;
        tracing::debug!(
            idx,
            duration = comp.duration(),
            "layer appended to composition"
        );
        Ok(idx)
    }

    /// Resolve `placement`, set it on `layer`, then [`advance`](Self::advance).
    pub fn place(
        comp: &mut Composition,
        placement: Placement,
        mut layer: Layer,
    ) -> ReelResult<usize> {
        layer.start_time = placement.resolve(comp);
        Self::advance(comp, layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/cursor.rs"]
mod tests;
