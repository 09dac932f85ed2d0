use std::path::Path;
use std::time::Instant;

use tracing::info;

use super::{Classifier, InferenceError, ModelLoader};

/// Lazily populated model handle owned by the window.
///
/// The first successful [`ModelSlot::ensure_loaded`] keeps the model for the
/// rest of the run. A failed load leaves the slot empty.
#[derive(Default)]
pub struct ModelSlot {
    model: Option<Box<dyn Classifier>>,
}

impl ModelSlot {
    /// Whether a model is held.
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Return the loaded model, asking `loader` for it on first use.
    pub fn ensure_loaded(
        &mut self,
        loader: &dyn ModelLoader,
        path: &Path,
    ) -> Result<&dyn Classifier, InferenceError> {
        let model = match self.model.take() {
            Some(model) => model,
            None => {
                let started = Instant::now();
                let model = loader.load(path)?;
                info!(
                    path = %path.display(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Model loaded"
                );
                model
            }
        };
        Ok(&**self.model.insert(model))
    }
}
