use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::dashboard::show_dashboard_summary;

pub fn build_dashboard_routers() -> Router<AppRegistry> {
    let dashboard_routers = Router::new().route("/summary", get(show_dashboard_summary));

    Router::new().nest("/dashboard", dashboard_routers)
}
