use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::history::{show_all_history, show_my_history};

pub fn build_history_routers() -> Router<AppRegistry> {
    let history_routers = Router::new()
        .route("/me", get(show_my_history))
        .route("/all", get(show_all_history));

    Router::new().nest("/history", history_routers)
}
