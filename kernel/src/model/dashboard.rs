/// Aggregate counts backing the staff dashboard.
#[derive(Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_slots: i64,
    pub free_slots_today: i64,
    pub pending_bookings: i64,
    pub disabled_rooms: i64,
}
