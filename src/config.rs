//! Configuration management

use anyhow::{self, Context, Result};
use chrono::{Duration, NaiveTime};

use crate::defaults;

/// Constants that drive the route pipeline.
///
/// `Default` reproduces the production behaviour: 08:00 start, 15 minute
/// travel buffer, 30 minutes per task, 5 m/s travel speed, 30 day summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSettings {
    /// Arrival time at the first stop of the day
    pub day_start: NaiveTime,
    /// Gap inserted between consecutive stops, independent of distance
    pub travel_buffer: Duration,
    /// Time budget per task
    pub per_task_duration: Duration,
    /// Speed used by the conflict detector to judge travel feasibility
    pub walking_speed_mps: f64,
    /// How far ahead the routine summary looks
    pub summary_days_ahead: u32,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            day_start: defaults::default_day_start(),
            travel_buffer: Duration::seconds(defaults::DEFAULT_TRAVEL_BUFFER_SECS),
            per_task_duration: Duration::seconds(defaults::DEFAULT_TASK_DURATION_SECS),
            walking_speed_mps: defaults::DEFAULT_WALKING_SPEED_MPS,
            summary_days_ahead: defaults::DEFAULT_SUMMARY_DAYS_AHEAD,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Route pipeline constants
    pub schedule: ScheduleSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let schedule = Self::schedule_from_env()?;

        Ok(Self { schedule })
    }

    fn schedule_from_env() -> Result<ScheduleSettings> {
        let mut settings = ScheduleSettings::default();

        if let Ok(raw) = std::env::var("ROUTE_DAY_START") {
            settings.day_start = NaiveTime::parse_from_str(&raw, "%H:%M")
                .with_context(|| format!("ROUTE_DAY_START must be HH:MM, got '{}'", raw))?;
        }

        if let Some(secs) = parse_env::<i64>("ROUTE_TRAVEL_BUFFER_SECS")? {
            if secs < 0 {
                anyhow::bail!("ROUTE_TRAVEL_BUFFER_SECS must not be negative (got {})", secs);
            }
            settings.travel_buffer = Duration::seconds(secs);
        }

        if let Some(secs) = parse_env::<i64>("ROUTE_TASK_DURATION_SECS")? {
            if secs <= 0 {
                anyhow::bail!("ROUTE_TASK_DURATION_SECS must be positive (got {})", secs);
            }
            settings.per_task_duration = Duration::seconds(secs);
        }

        if let Some(speed) = parse_env::<f64>("ROUTE_WALKING_SPEED_MPS")? {
            if !(speed.is_finite() && speed > 0.0) {
                anyhow::bail!("ROUTE_WALKING_SPEED_MPS must be a positive number (got {})", speed);
            }
            settings.walking_speed_mps = speed;
        }

        if let Some(days) = parse_env::<u32>("ROUTE_SUMMARY_DAYS_AHEAD")? {
            settings.summary_days_ahead = days;
        }

        Ok(settings)
    }
}

fn parse_env<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_settings() {
        let settings = ScheduleSettings::default();
        assert_eq!(settings.day_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(settings.travel_buffer.num_seconds(), 900);
        assert_eq!(settings.per_task_duration.num_seconds(), 1800);
        assert_eq!(settings.walking_speed_mps, 5.0);
        assert_eq!(settings.summary_days_ahead, 30);
    }

    #[test]
    fn test_parse_env_missing_is_none() {
        let value = parse_env::<i64>("CREWROUTE_TEST_UNSET_VARIABLE").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_parse_env_invalid_value_is_error() {
        std::env::set_var("CREWROUTE_TEST_BAD_NUMBER", "fifteen");

        let result = parse_env::<i64>("CREWROUTE_TEST_BAD_NUMBER");
        assert!(result.is_err());

        std::env::remove_var("CREWROUTE_TEST_BAD_NUMBER");
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_reads_schedule_overrides() {
        std::env::set_var("ROUTE_DAY_START", "07:30");
        std::env::set_var("ROUTE_TRAVEL_BUFFER_SECS", "600");

        let config = Config::from_env().unwrap();
        assert_eq!(config.schedule.day_start, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert_eq!(config.schedule.travel_buffer.num_seconds(), 600);

        std::env::remove_var("ROUTE_DAY_START");
        std::env::remove_var("ROUTE_TRAVEL_BUFFER_SECS");
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_rejects_zero_speed() {
        std::env::set_var("ROUTE_WALKING_SPEED_MPS", "0");

        assert!(Config::from_env().is_err());

        std::env::remove_var("ROUTE_WALKING_SPEED_MPS");
    }
}
