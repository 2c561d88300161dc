use kernel::model::dashboard::DashboardSummary;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryResponse {
    pub total_slots: i64,
    pub free_slots: i64,
    pub pending_slots: i64,
    pub disabled_rooms: i64,
}

impl From<DashboardSummary> for DashboardSummaryResponse {
    fn from(value: DashboardSummary) -> Self {
        let DashboardSummary {
            total_slots,
            free_slots_today,
            pending_bookings,
            disabled_rooms,
        } = value;
        Self {
            total_slots,
            free_slots: free_slots_today,
            pending_slots: pending_bookings,
            disabled_rooms,
        }
    }
}
