//! Season calendar and check-in time sampling.
//!
//! Attendance clusters on weekends and Friday evenings. Dates are drawn with
//! day-of-week weights and, on peak days, hours are biased toward the evening.

use rand::{Rng, distributions::WeightedIndex, prelude::Distribution};
use time::{Date, PrimitiveDateTime, Time, Weekday};

use crate::config::{DayWeights, VisitGenConfig};
use crate::error::GenerationError;

/// Friday, Saturday and Sunday.
pub fn is_peak_day(weekday: Weekday) -> bool {
    matches!(
        weekday,
        Weekday::Friday | Weekday::Saturday | Weekday::Sunday
    )
}

/// Relative likelihood of a visit falling on a day.
pub fn day_weight(weekday: Weekday, weights: &DayWeights) -> u32 {
    match weekday {
        Weekday::Saturday | Weekday::Sunday => weights.weekend,
        Weekday::Friday => weights.friday,
        _ => weights.weekday,
    }
}

/// Every day from `start` to `end`, both inclusive.
pub fn days_between(start: Date, end: Date) -> Vec<Date> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        match day.next_day() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// Samples check-in timestamps over a season.
#[derive(Debug, Clone)]
pub struct CheckinSampler {
    days: Vec<Date>,
    day_index: WeightedIndex<u32>,
    open_hour: u8,
    close_hour: u8,
    peak_day_hours: Vec<u8>,
    peak_day_index: WeightedIndex<u32>,
}

impl CheckinSampler {
    /// Precomputes the date and peak-hour weight tables.
    pub fn new(config: &VisitGenConfig) -> Result<Self, GenerationError> {
        config.validate()?;

        let days = days_between(config.season_start, config.season_end);
        let day_index = WeightedIndex::new(
            days.iter()
                .map(|d| day_weight(d.weekday(), &config.day_weights)),
        )?;

        // Evening peak runs to closing; everything before it is off-peak.
        let peak_start = config.peak_start_hour.clamp(config.open_hour, config.close_hour);
        let mut peak_day_hours = Vec::new();
        let mut peak_day_weights = Vec::new();
        for hour in peak_start..config.close_hour {
            peak_day_hours.push(hour);
            peak_day_weights.push(config.peak_hour_weight);
        }
        for hour in config.open_hour..peak_start {
            peak_day_hours.push(hour);
            peak_day_weights.push(config.off_peak_hour_weight);
        }
        let peak_day_index = WeightedIndex::new(peak_day_weights)?;

        Ok(Self {
            days,
            day_index,
            open_hour: config.open_hour,
            close_hour: config.close_hour,
            peak_day_hours,
            peak_day_index,
        })
    }

    /// Picks a season day, weighted by day of week.
    pub fn sample_date(&self, rng: &mut impl Rng) -> Date {
        self.days[self.day_index.sample(rng)]
    }

    /// Picks an opening hour for the given day.
    ///
    /// Peak days favour the evening; other days are uniform over opening hours.
    pub fn sample_hour(&self, date: Date, rng: &mut impl Rng) -> u8 {
        if is_peak_day(date.weekday()) {
            self.peak_day_hours[self.peak_day_index.sample(rng)]
        } else {
            rng.gen_range(self.open_hour..self.close_hour)
        }
    }

    /// Draws one complete check-in timestamp.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<PrimitiveDateTime, GenerationError> {
        let date = self.sample_date(rng);
        let hour = self.sample_hour(date, rng);
        let minute = rng.gen_range(0..60);
        let second = rng.gen_range(0..60);
        Ok(PrimitiveDateTime::new(
            date,
            Time::from_hms(hour, minute, second)?,
        ))
    }
}
