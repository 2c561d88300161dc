use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    cancel_booking, request_booking, show_my_bookings, show_pending_bookings,
    update_booking_status,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", post(request_booking))
        .route("/me", get(show_my_bookings))
        .route("/pending", get(show_pending_bookings))
        .route("/:booking_id/status", put(update_booking_status))
        .route("/:booking_id", delete(cancel_booking));

    Router::new().nest("/bookings", booking_routers)
}
