use crate::{
    composition::model::Layer,
    foundation::error::{ReelError, ReelResult},
};

/// Ordered, append-only collection of layers plus their derived duration.
///
/// Layers keep insertion order and are never removed or edited in place. The registry treats
/// every kind through the shared envelope (`start_time`, `duration`, `transform`); only
/// validation looks at the payload.
#[derive(Clone, Debug, Default)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    duration: f64,
}

impl LayerRegistry {
    /// Build a registry from a full sequence, validating every layer first.
    pub fn from_layers(layers: Vec<Layer>) -> ReelResult<Self> {
        for (idx, layer) in layers.iter().enumerate() {
            layer
                .validate()
                .map_err(|e| ReelError::validation(format!("layer {idx}: {e}")))?;
        }
        let duration = layers
            .iter()
            .filter_map(Layer::end_time)
            .fold(0.0, f64::max);
        Ok(Self { layers, duration })
    }

    /// Append `layer`, returning its index.
    pub fn push(&mut self, layer: Layer) -> ReelResult<usize> {
        layer.validate()?;
        if let Some(end) = layer.end_time() {
            self.duration = self.duration.max(end);
        }
        self.layers.push(layer);
        Ok(self.layers.len() - 1)
    }

    /// `max(start + duration)` over finite layers; `0.0` when empty.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, idx: usize) -> Option<&Layer> {
        self.layers.get(idx)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl serde::Serialize for LayerRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.layers.serialize(serializer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/registry.rs"]
mod tests;
