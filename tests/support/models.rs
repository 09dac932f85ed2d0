use std::{cell::Cell, path::Path, rc::Rc};

use deepfake_detect::inference::{Classifier, InferenceError, InputTensor, ModelLoader};

/// Call counters shared between a test and the loader it hands to the controller.
#[derive(Clone, Default)]
pub struct Calls {
    pub loads: Rc<Cell<usize>>,
    pub predictions: Rc<Cell<usize>>,
    pub last_shape: Rc<Cell<Option<[usize; 4]>>>,
}

impl Calls {
    pub fn loads(&self) -> usize {
        self.loads.get()
    }

    pub fn predictions(&self) -> usize {
        self.predictions.get()
    }

    pub fn last_shape(&self) -> Option<[usize; 4]> {
        self.last_shape.get()
    }
}

/// Loader whose model always returns `score`.
pub struct FixedScoreLoader {
    score: f32,
    calls: Calls,
}

impl FixedScoreLoader {
    pub fn new(score: f32) -> (Box<dyn ModelLoader>, Calls) {
        let calls = Calls::default();
        let loader = Self {
            score,
            calls: calls.clone(),
        };
        (Box::new(loader), calls)
    }
}

impl ModelLoader for FixedScoreLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn Classifier>, InferenceError> {
        self.calls.loads.set(self.calls.loads.get() + 1);
        Ok(Box::new(FixedScore {
            score: self.score,
            calls: self.calls.clone(),
        }))
    }
}

struct FixedScore {
    score: f32,
    calls: Calls,
}

impl Classifier for FixedScore {
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError> {
        self.calls.predictions.set(self.calls.predictions.get() + 1);
        self.calls.last_shape.set(Some(input.shape()));
        Ok(vec![self.score; input.batch_size()])
    }
}

/// Loader that behaves like a missing model file.
pub struct MissingModelLoader {
    pub calls: Calls,
}

impl ModelLoader for MissingModelLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Classifier>, InferenceError> {
        self.calls.loads.set(self.calls.loads.get() + 1);
        Err(InferenceError::ModelMissing {
            path: path.to_path_buf(),
        })
    }
}
