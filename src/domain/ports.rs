use crate::domain::model::Credentials;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    /// Persist one invoice as `<identifier>.pdf`, replacing any previous copy.
    fn save(
        &self,
        identifier: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn tax_id(&self) -> &str;
    fn serial(&self) -> &str;
    fn credentials(&self) -> Credentials;
    fn sec_file(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait InvoiceApi: Send + Sync {
    async fn fetch_one(&self, identifier: &str) -> Result<Vec<u8>>;
}
