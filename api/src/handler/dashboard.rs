use crate::{extractor::AuthorizedUser, model::dashboard::DashboardSummaryResponse};
use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_dashboard_summary(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DashboardSummaryResponse>> {
    if !user.is_staff_level() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .dashboard_repository()
        .summary()
        .await
        .map(DashboardSummaryResponse::from)
        .map(Json)
}
