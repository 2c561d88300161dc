use crate::model::dashboard::DashboardSummary;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn summary(&self) -> AppResult<DashboardSummary>;
}
