use crate::domain::model::Contract;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the contract collection. Called once at startup.
pub trait ContractSource: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<Contract>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn model(&self) -> &str;
    fn endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn api_key(&self) -> Option<&str>;
}

/// A generative-text service: prompt in, text out.
///
/// `Ok(None)` means the service answered but produced no text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, credential: &str, model: &str, prompt: &str)
        -> Result<Option<String>>;
}
