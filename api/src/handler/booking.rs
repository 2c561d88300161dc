use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingsResponse, CreateBookingRequest, CreatedBookingResponse, UpdateBookingStatusRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::event::{CancelBooking, CreateBooking, DecideBooking},
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn request_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreatedBookingResponse>)> {
    req.validate(&())?;

    // The booking is always created for the caller; the identity tag is
    // trusted as-is.
    let booking_id = registry
        .booking_repository()
        .create(CreateBooking::new(
            req.room_id,
            req.slot_id,
            user.id(),
            req.booking_date,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedBookingResponse { booking_id })))
}

pub async fn show_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_active_by_user_id(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_pending_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    if !user.is_staff_level() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .booking_repository()
        .find_pending_all()
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn update_booking_status(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> AppResult<StatusCode> {
    if !user.is_staff_level() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .booking_repository()
        .decide(DecideBooking::new(
            booking_id,
            req.new_status.into(),
            user.id(),
        ))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_repository()
        .cancel(CancelBooking::new(booking_id, user.id(), user.role()))
        .await
        .map(|_| StatusCode::OK)
}
