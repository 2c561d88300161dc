use crate::{
    extractor::AuthorizedUser,
    model::room::{
        AvailabilityQuery, CreateRoomRequest, RoomAvailabilitiesResponse, RoomResponse,
        RoomsResponse, UpdateRoomRequest, UpdateRoomRequestWithIds,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::RoomId, room::event::DisableRoom};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<StatusCode> {
    if !user.is_staff_level() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    registry
        .room_repository()
        .create(req.into())
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_room_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound("room not found".into())),
        })
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<StatusCode> {
    if !user.is_staff_level() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let update_room = UpdateRoomRequestWithIds::new(room_id, user.id(), req);
    registry
        .room_repository()
        .update(update_room.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn disable_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_staff_level() {
        return Err(AppError::ForbiddenOperation);
    }

    let disable_room = DisableRoom {
        room_id,
        requested_user: user.id(),
    };
    registry
        .room_repository()
        .disable(disable_room)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_room_availability(
    _user: AuthorizedUser,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomAvailabilitiesResponse>> {
    registry
        .availability_repository()
        .find_by_date(query.date)
        .await
        .map(RoomAvailabilitiesResponse::from)
        .map(Json)
}
