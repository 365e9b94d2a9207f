use crate::domain::model::{CookieRecord, DataSource, MaintenanceRun, OutputFormat, SiteProfile};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_source(&self) -> DataSource;
    fn output_path(&self) -> &str;
    fn site_profile(&self) -> SiteProfile;
    fn output_formats(&self) -> &[OutputFormat];
    fn alerts_enabled(&self) -> bool;
    fn force_update(&self) -> bool;
    fn bundle_artifacts(&self) -> bool;
    fn request_timeout_secs(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CookieRecord>>;
    async fn transform(&self, records: Vec<CookieRecord>) -> Result<MaintenanceRun>;
    async fn load(&self, run: MaintenanceRun) -> Result<String>;
}
