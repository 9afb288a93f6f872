use std::fmt;

use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Send a free-form prompt and return the model's raw text reply
    async fn generate(&self, prompt: &str) -> Result<String>;
}
