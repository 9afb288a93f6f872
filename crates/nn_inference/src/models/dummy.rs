use std::fmt;
use std::sync::Mutex;

use nn_core::{Error, Result, TextGenerator};

/// Offline generator that answers every prompt with a fixed reply.
///
/// Without a scripted reply every call fails, which drives callers onto
/// their fallback path. Only models built with [`DummyModel::replying`]
/// keep the prompts they receive.
pub struct DummyModel {
    reply: Option<String>,
    prompts: Option<Mutex<Vec<String>>>,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").field("reply", &self.reply).finish()
    }
}

impl DummyModel {
    pub fn new(reply: Option<String>) -> Self {
        Self { reply, prompts: None }
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Some(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .as_ref()
            .and_then(|prompts| prompts.lock().ok().map(|p| p.clone()))
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl TextGenerator for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Some(Ok(mut prompts)) = self.prompts.as_ref().map(Mutex::lock) {
            prompts.push(prompt.to_string());
        }
        self.reply
            .clone()
            .ok_or_else(|| Error::Inference("Dummy model has no scripted reply".to_string()))
    }
}
