//! ONNX Runtime session wrapper for the digit classifier

use std::path::Path;

use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::TensorRef;
use tracing::{debug, info};

use crate::error::{ClassifyError, Result};
use crate::tensor;

/// Inference engine owning the loaded classifier session
///
/// One long-lived instance per classifier lifetime: constructed once when the
/// model asset is available, reused across all classification calls, and
/// released exactly once via [`InferenceEngine::dispose`]. Forward passes are
/// serialized through `&mut self`.
pub struct InferenceEngine {
    session: Option<Session>,
}

impl InferenceEngine {
    /// Load the classifier model from an ONNX file
    ///
    /// # Errors
    /// [`ClassifyError::ModelNotFound`] if the path does not exist,
    /// [`ClassifyError::ModelLoad`] if the model fails to load or compile.
    pub fn load_from_file<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            return Err(ClassifyError::ModelNotFound(
                model_path.display().to_string(),
            ));
        }

        info!("Loading digit classifier model from {:?}", model_path);

        let session = Self::session_builder(&model_path.display().to_string())?
            .commit_from_file(model_path)
            .map_err(|e| ClassifyError::ModelLoad {
                path: model_path.display().to_string(),
                error: e.to_string(),
            })?;

        info!("Digit classifier model loaded successfully");

        Ok(Self {
            session: Some(session),
        })
    }

    /// Load the classifier model from in-memory ONNX bytes
    ///
    /// # Errors
    /// [`ClassifyError::ModelLoad`] if the model fails to load or compile.
    pub fn load_from_memory(model_bytes: &[u8]) -> Result<Self> {
        info!(
            "Loading digit classifier model from memory ({} bytes)",
            model_bytes.len()
        );

        let session = Self::session_builder("<memory>")?
            .commit_from_memory(model_bytes)
            .map_err(|e| ClassifyError::ModelLoad {
                path: "<memory>".to_string(),
                error: e.to_string(),
            })?;

        Ok(Self {
            session: Some(session),
        })
    }

    fn session_builder(path: &str) -> Result<SessionBuilder> {
        let load_err = |e: ort::Error| ClassifyError::ModelLoad {
            path: path.to_string(),
            error: e.to_string(),
        };

        Session::builder()
            .map_err(load_err)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(load_err)?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(load_err)
    }

    /// Run one forward pass and return the raw 10-class output scores
    ///
    /// The input tensor is borrowed for exactly the duration of the pass; no
    /// per-call device state is retained afterwards.
    ///
    /// # Errors
    /// [`ClassifyError::BackendUnavailable`] if the engine was disposed,
    /// [`ClassifyError::Inference`] on backend failure (the session stays
    /// valid for retry), [`ClassifyError::InvalidOutput`] if the model output
    /// does not hold 10 class scores.
    pub fn infer(&mut self, input: &Array4<f32>) -> Result<Vec<f32>> {
        let session = self.session.as_mut().ok_or_else(|| {
            ClassifyError::BackendUnavailable("inference session has been disposed".to_string())
        })?;

        let input_tensor = TensorRef::from_array_view(input.view())
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        debug!("Model output shape: {:?}", shape);

        tensor::decode(shape.as_ref(), data)
    }

    /// Release the session and its backing compute resources
    ///
    /// Idempotent; subsequent [`InferenceEngine::infer`] calls fail with
    /// [`ClassifyError::BackendUnavailable`].
    pub fn dispose(&mut self) {
        if self.session.take().is_some() {
            info!("Inference session disposed");
        }
    }

    /// Whether the engine has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.session.is_none()
    }
}
