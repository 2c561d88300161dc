use crate::model::availability::RoomAvailability;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// One entry per room, each carrying every slot's status on the date.
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<RoomAvailability>>;
}
