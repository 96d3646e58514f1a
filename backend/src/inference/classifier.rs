use std::path::Path;
use std::sync::{Arc, Mutex};

use tch::{CModule, Device, Kind, Tensor};
use thiserror::Error;

/// Class names in training order. The classifier's output index space is a
/// bijection with this table, so it must never be reordered without retraining.
pub const PEST_LABELS: [&str; 8] = [
    "Brown Planthopper",
    "Larval Stage Leaf Folder",
    "Nilaparvata lugens",
    "Rice Gall Midge",
    "Rice Leaf Folder",
    "Rice White Stem Borer",
    "Rice Yellow Stem Borer",
    "White-Backed Planthopper",
];

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to load model weights: {0}")]
    ModelLoad(tch::TchError),
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Convolutional pest classifier backed by a TorchScript module. Weights are
/// loaded once at startup and shared read-only across requests; the mutex only
/// serializes access to the non-Sync module handle.
#[derive(Clone)]
pub struct Classifier {
    module: Arc<Mutex<CModule>>,
}

impl Classifier {
    pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
        let device = Device::cuda_if_available();
        let module =
            CModule::load_on_device(model_path, device).map_err(ClassifierError::ModelLoad)?;
        Ok(Self {
            module: Arc::new(Mutex::new(module)),
        })
    }

    /// Runs a forward pass with gradients disabled and maps the arg-max logit
    /// to its pest label.
    pub fn classify(&self, input: &Tensor) -> Result<&'static str, ClassifierError> {
        let output = tch::no_grad(|| {
            self.module
                .lock()
                .unwrap()
                .forward_ts(&[input.shallow_clone()])
        })
        .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let logits = output.to_kind(Kind::Float).view([-1]);
        let count = logits.size()[0] as usize;
        if count != PEST_LABELS.len() {
            return Err(ClassifierError::Inference(format!(
                "model produced {} scores, expected {}",
                count,
                PEST_LABELS.len()
            )));
        }

        let index = logits.argmax(0i64, false).int64_value(&[]) as usize;
        label_for_index(index).ok_or_else(|| {
            ClassifierError::Inference(format!("class index {} out of range", index))
        })
    }
}

pub fn label_for_index(index: usize) -> Option<&'static str> {
    PEST_LABELS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_table_covers_eight_classes() {
        assert_eq!(PEST_LABELS.len(), 8);
    }

    #[test]
    fn every_index_maps_to_a_distinct_label() {
        let labels: Vec<_> = (0..8).map(|i| label_for_index(i).unwrap()).collect();
        for (i, label) in labels.iter().enumerate() {
            assert_eq!(PEST_LABELS[i], *label);
        }
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), labels.len());
    }

    #[test]
    fn out_of_range_index_has_no_label() {
        assert!(label_for_index(8).is_none());
        assert!(label_for_index(usize::MAX).is_none());
    }
}
