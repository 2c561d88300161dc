use crate::database::{model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DisableRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        let mut tx = self.db.begin().await?;

        let duplicate = sqlx::query_scalar::<_, RoomId>(
            r#"
                SELECT room_id FROM rooms WHERE room_name = $1
            "#,
        )
        .bind(&event.room_name)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if duplicate.is_some() {
            return Err(AppError::UnprocessableEntity(format!(
                "room name ({}) already exists",
                event.room_name
            )));
        }

        let room_id = RoomId::new();
        sqlx::query(
            r#"
                INSERT INTO rooms (room_id, room_name, image_url, price_per_day, status)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(room_id)
        .bind(&event.room_name)
        .bind(&event.image_url)
        .bind(event.price_per_day)
        .bind(event.status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(room_id)
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Renaming must not collide with another room.
        if let Some(new_name) = &event.room_name {
            let duplicate = sqlx::query_scalar::<_, RoomId>(
                r#"
                    SELECT room_id FROM rooms WHERE room_name = $1 AND room_id != $2
                "#,
            )
            .bind(new_name)
            .bind(event.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if duplicate.is_some() {
                return Err(AppError::UnprocessableEntity(format!(
                    "room name ({new_name}) already exists"
                )));
            }
        }

        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET room_name = COALESCE($2, room_name),
                    image_url = COALESCE($3, image_url),
                    price_per_day = COALESCE($4, price_per_day),
                    status = COALESCE($5, status)
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .bind(&event.room_name)
        .bind(&event.image_url)
        .bind(event.price_per_day)
        .bind(event.status.map(|s| s.as_str()))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "room ({}) was not found",
                event.room_id
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn disable(&self, event: DisableRoom) -> AppResult<()> {
        // Soft delete. Bookings and history keep referencing the row.
        let res = sqlx::query(
            r#"
                UPDATE rooms SET status = 'disabled' WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "room ({}) was not found",
                event.room_id
            )));
        }

        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT room_id, room_name, image_url, price_per_day, status
                FROM rooms
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Room::try_from)
        .collect()
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT room_id, room_name, image_url, price_per_day, status
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Room::try_from)
        .transpose()
    }
}
