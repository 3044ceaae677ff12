use anyhow::{Context, Result};
use tch::{CModule, Device, Tensor};

use crate::encode::{FeatureRecord, FEATURE_COLUMNS};
use crate::types::PredictError;

/// The one capability the service consumes from the model artifact. Tests
/// substitute stubs through this trait; the artifact itself stays opaque.
pub trait PricePredictor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictError>;
}

/// Pre-trained TorchScript regression model. Loaded once at startup and
/// never mutated afterwards.
pub struct TorchModel {
    model: CModule,
    device: Device,
}

impl TorchModel {
    pub fn load(model_path: &str) -> Result<Self> {
        let device = Device::Cpu;
        let model = CModule::load_on_device(model_path, device)
            .with_context(|| format!("failed to load TorchScript {}", model_path))?;

        let loaded = Self { model, device };

        // Probe with a dummy forward so a malformed artifact fails at load
        // time, not on the first user request.
        loaded
            .forward(&[0.0; FEATURE_COLUMNS.len()])
            .map_err(|e| anyhow::anyhow!("warmup forward failed: {}", e))?;

        Ok(loaded)
    }

    /// Submit a 1-row batch and take the first element of the output.
    /// The artifact may answer with shape [1] or [1, 1]; anything else
    /// means the record layout no longer matches the training schema.
    fn forward(&self, row: &[f32; 9]) -> Result<f64, PredictError> {
        let input = Tensor::from_slice(row)
            .reshape([1, row.len() as i64])
            .to_device(self.device);

        let out = self
            .model
            .forward_ts(&[input])
            .map_err(|e| PredictError::Inference(e.to_string()))?;

        match out.size().as_slice() {
            [1] | [1, 1] => Ok(out.reshape([-1]).double_value(&[0])),
            sz => Err(PredictError::Inference(format!(
                "unexpected model output size: {:?}",
                sz
            ))),
        }
    }
}

impl PricePredictor for TorchModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictError> {
        self.forward(&record.as_row())
    }
}
