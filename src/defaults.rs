use chrono::NaiveTime;

/// Time budgeted for every task at a stop
pub const DEFAULT_TASK_DURATION_SECS: i64 = 30 * 60;

/// Fixed gap between departing one stop and arriving at the next
pub const DEFAULT_TRAVEL_BUFFER_SECS: i64 = 15 * 60;

/// Assumed walking speed used for travel feasibility checks
pub const DEFAULT_WALKING_SPEED_MPS: f64 = 5.0;

/// Horizon of the routine summary task fetch
pub const DEFAULT_SUMMARY_DAYS_AHEAD: u32 = 30;

pub fn default_day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("valid static default day start")
}
