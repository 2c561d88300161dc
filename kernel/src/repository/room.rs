use crate::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DisableRoom, UpdateRoom},
        Room,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId>;
    async fn update(&self, event: UpdateRoom) -> AppResult<()>;
    // soft delete: rooms referenced by bookings are never removed
    async fn disable(&self, event: DisableRoom) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
}
