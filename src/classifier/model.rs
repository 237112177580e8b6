/// Model loading and inference
///
/// The bundled model is loaded once per app session and shared read-only
/// across all classify actions. Its numeric contract (input size,
/// normalization constants, output length) lives in a descriptor file next
/// to the model rather than being hardcoded, since those values belong to
/// this particular model and not to the pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tract_onnx::prelude::*;

/// Errors from model loading and inference
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The model asset is missing or corrupt. Fatal to the classify
    /// feature; detected at startup, never retried.
    #[error("failed to load model from {path}: {detail}")]
    ModelLoad { path: String, detail: String },

    /// The input tensor does not match the model's declared input shape
    #[error("input tensor shape {got:?} does not match model input {expected:?}")]
    InputShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    /// The model produced a different number of scores than declared
    #[error("model produced {got} scores, expected {expected}")]
    OutputLengthMismatch { expected: usize, got: usize },

    /// The forward pass itself failed inside the runtime
    #[error("inference failed: {detail}")]
    Inference { detail: String },
}

/// Numeric contract of the bundled model
///
/// Serialized as JSON next to the model asset (assets/model.json) so the
/// constants stay tied to the artifact they describe.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelSpec {
    /// Spatial input width in pixels
    pub input_width: u32,
    /// Spatial input height in pixels
    pub input_height: u32,
    /// Color channels fed to the model (RGB = 3)
    pub channels: usize,
    /// Subtracted from each raw 8-bit intensity before scaling
    pub norm_mean: f32,
    /// Divisor applied after mean subtraction
    pub norm_scale: f32,
    /// Length of the output score vector
    pub output_len: usize,
}

impl Default for ModelSpec {
    /// Descriptor for the bundled MobileNet classifier:
    /// 224x224 RGB input, (raw - 127.5) / 127.5 normalization,
    /// 1001 output classes (background + ImageNet 1000).
    fn default() -> Self {
        Self {
            input_width: 224,
            input_height: 224,
            channels: 3,
            norm_mean: 127.5,
            norm_scale: 127.5,
            output_len: 1001,
        }
    }
}

impl ModelSpec {
    /// Parse a descriptor from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the descriptor to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load the descriptor from disk, falling back to the bundled
    /// model's defaults when the file is absent or unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(spec) => {
                    println!("📐 Model descriptor loaded from {}", path.display());
                    spec
                }
                Err(e) => {
                    eprintln!(
                        "⚠️  Invalid model descriptor {}: {} (using defaults)",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                println!(
                    "📐 No model descriptor at {}, using bundled defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// The tensor shape the model expects: batch of 1, NHWC
    pub fn input_shape(&self) -> [usize; 4] {
        [
            1,
            self.input_height as usize,
            self.input_width as usize,
            self.channels,
        ]
    }
}

/// A ready-to-run inference handle over the bundled model
///
/// Holds the optimized tract plan plus the descriptor it was loaded with.
/// The plan is immutable after load and safe to share behind an Arc.
pub struct Model {
    plan: TypedRunnableModel<TypedModel>,
    spec: ModelSpec,
}

impl Model {
    /// Load the model asset and build an optimized, runnable plan
    ///
    /// The input fact is pinned to the descriptor's declared shape so a
    /// wrong-shaped asset fails here, at startup, instead of on the first
    /// classify press.
    pub fn load(model_path: &Path, spec: ModelSpec) -> Result<Self, ClassifierError> {
        let shape = spec.input_shape();
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|m| m.with_input_fact(0, f32::fact(shape).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| ClassifierError::ModelLoad {
                path: model_path.display().to_string(),
                detail: e.to_string(),
            })?;

        println!(
            "🧠 Model loaded: {} ({}x{}x{} -> {} scores)",
            model_path.display(),
            spec.input_height,
            spec.input_width,
            spec.channels,
            spec.output_len
        );

        Ok(Model { plan, spec })
    }

    /// The descriptor this model was loaded with
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Run one synchronous forward pass
    ///
    /// tract allocates a fresh output tensor per run, so no state from a
    /// previous invocation can leak into this one.
    pub fn run(&self, input: Tensor) -> Result<Vec<f32>, ClassifierError> {
        let expected = self.spec.input_shape();
        if input.shape() != expected.as_slice() {
            return Err(ClassifierError::InputShapeMismatch {
                expected: expected.to_vec(),
                got: input.shape().to_vec(),
            });
        }

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ClassifierError::Inference {
                detail: e.to_string(),
            })?;

        let scores: Vec<f32> = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference {
                detail: e.to_string(),
            })?
            .iter()
            .copied()
            .collect();

        if scores.len() != self.spec.output_len {
            return Err(ClassifierError::OutputLengthMismatch {
                expected: self.spec.output_len,
                got: scores.len(),
            });
        }

        Ok(scores)
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model").field("spec", &self.spec).finish()
    }
}
