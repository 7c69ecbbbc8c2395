//! Sequential schedule computation for route arrival/departure times.
//!
//! Walks an already ordered stop list and stamps arrival/departure times.
//! The first stop is reached at the day start; every later stop is reached
//! a fixed travel buffer after leaving the previous one. The buffer does NOT
//! depend on the distance between the stops. Real travel feasibility is
//! judged separately by the conflict detector, and the two can disagree.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::types::Stop;

/// Inputs of the schedule walk
#[derive(Debug, Clone, Copy)]
pub struct ScheduleInput {
    /// Date of the route; only its calendar day is used
    pub date: NaiveDateTime,
    /// Wall-clock arrival at the first stop
    pub day_start: NaiveTime,
    /// Gap between departing a stop and arriving at the next one
    pub travel_buffer: Duration,
}

impl ScheduleInput {
    /// Arrival time at the first stop
    pub fn first_arrival(&self) -> NaiveDateTime {
        self.date.date().and_time(self.day_start)
    }
}

/// Assign arrival/departure times to `stops` in their current order.
pub fn compute_sequential_schedule(input: &ScheduleInput, mut stops: Vec<Stop>) -> Vec<Stop> {
    let mut cursor = input.first_arrival();

    for (i, stop) in stops.iter_mut().enumerate() {
        if i > 0 {
            cursor += input.travel_buffer;
        }
        let arrival = cursor;
        let departure = arrival + stop.estimated_duration();

        stop.arrival_time = Some(arrival);
        stop.departure_time = Some(departure);
        cursor = departure;
    }

    stops
}

// ===========================================================================
// Tests
// ===========================================================================
