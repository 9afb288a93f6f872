use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use nn_core::{Error, Result, TextGenerator};

use crate::Config;

pub mod deepseek;
pub mod dummy;
pub mod gemini;

pub use deepseek::DeepSeekModel;
pub use dummy::DummyModel;
pub use gemini::GeminiModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    #[default]
    Gemini,
    DeepSeek,
    Dummy,
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ModelKind::Gemini),
            "deepseek" => Ok(ModelKind::DeepSeek),
            "dummy" => Ok(ModelKind::Dummy),
            other => Err(Error::InvalidInput(format!(
                "Unknown model '{}'. Available models: gemini (default), deepseek, dummy",
                other
            ))),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Gemini => "gemini",
            ModelKind::DeepSeek => "deepseek",
            ModelKind::Dummy => "dummy",
        };
        f.write_str(name)
    }
}

pub fn create_model(kind: ModelKind, config: Config) -> Result<Arc<dyn TextGenerator>> {
    let model: Arc<dyn TextGenerator> = match kind {
        ModelKind::Gemini => Arc::new(GeminiModel::new(config)?),
        ModelKind::DeepSeek => Arc::new(DeepSeekModel::new(config)?),
        ModelKind::Dummy => Arc::new(DummyModel::new(None)),
    };
    tracing::debug!("Created {} text generator", model.name());
    Ok(model)
}
