//! Date and time randomizers.
//!
//! Values are uniform over the configured date and time ranges, to the
//! second.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rand::Rng;
use specimen_core::{Range, Value};

fn date_in<R: Rng + ?Sized>(rng: &mut R, range: &Range<NaiveDate>) -> NaiveDate {
    let span = (range.max - range.min).num_days().max(0) as u64;
    let offset = rng.gen_range(0..=span);
    range
        .min
        .checked_add_days(Days::new(offset))
        .unwrap_or(range.min)
}

fn time_in<R: Rng + ?Sized>(rng: &mut R, range: &Range<NaiveTime>) -> NaiveTime {
    let min = range.min.num_seconds_from_midnight();
    let max = range.max.num_seconds_from_midnight().max(min);
    let secs = rng.gen_range(min..=max);
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(range.min)
}

/// Generate a random date in the range.
pub fn random_date<R: Rng + ?Sized>(rng: &mut R, range: &Range<NaiveDate>) -> Value {
    Value::Date(date_in(rng, range))
}

/// Generate a random time of day in the range.
pub fn random_time<R: Rng + ?Sized>(rng: &mut R, range: &Range<NaiveTime>) -> Value {
    Value::Time(time_in(rng, range))
}

/// Generate a random date and time.
pub fn random_date_time<R: Rng + ?Sized>(
    rng: &mut R,
    dates: &Range<NaiveDate>,
    times: &Range<NaiveTime>,
) -> Value {
    let date = date_in(rng, dates);
    let time = time_in(rng, times);
    Value::DateTime(NaiveDateTime::new(date, time))
}

/// Generate a random UTC timestamp.
pub fn random_timestamp<R: Rng + ?Sized>(
    rng: &mut R,
    dates: &Range<NaiveDate>,
    times: &Range<NaiveTime>,
) -> Value {
    let date = date_in(rng, dates);
    let time = time_in(rng, times);
    Value::Timestamp(NaiveDateTime::new(date, time).and_utc())
}
