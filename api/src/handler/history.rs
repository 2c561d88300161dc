use crate::{extractor::AuthorizedUser, model::history::HistoriesResponse};
use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_my_history(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HistoriesResponse>> {
    registry
        .history_repository()
        .find_by_user_id(user.id())
        .await
        .map(HistoriesResponse::from)
        .map(Json)
}

pub async fn show_all_history(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HistoriesResponse>> {
    if !user.is_staff_level() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .history_repository()
        .find_all()
        .await
        .map(HistoriesResponse::from)
        .map(Json)
}
