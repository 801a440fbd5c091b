use std::ops::Range;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};

use crate::timeline::buckets::REFERENCE_DAY;

/// Hours between labeled ticks on the time of day axis.
pub const MAJOR_HOUR_STEP: u32 = 6;
pub const MINOR_HOUR_STEP: u32 = 1;

/// Horizontal axis of the scatter plot. Bold key points fall on the first day of every year and
/// light key points on the first day of every month.
#[derive(Debug, Clone)]
pub struct DateAxis {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateAxis {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        // A zero width range can't be mapped onto pixels
        let end = if start == end { end + Duration::days(1) } else { end };
        Self { start, end }
    }

    pub fn year_starts(&self) -> Vec<NaiveDateTime> {
        (self.start.year()..=self.end.year())
            .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .map(|date| date.and_time(NaiveTime::MIN))
            .filter(|date| self.contains(date))
            .collect()
    }

    pub fn month_starts(&self) -> Vec<NaiveDateTime> {
        let mut months = vec![];
        let mut current = NaiveDate::from_ymd_opt(self.start.year(), self.start.month(), 1);
        while let Some(date) = current {
            let date = date.and_time(NaiveTime::MIN);
            if date > self.end {
                break;
            }
            if self.contains(&date) {
                months.push(date);
            }
            current = date.date().checked_add_months(Months::new(1));
        }
        months
    }

    fn contains(&self, value: &NaiveDateTime) -> bool {
        self.start <= *value && *value <= self.end
    }
}

impl Ranged for DateAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = NaiveDateTime;

    fn map(&self, value: &NaiveDateTime, limit: (i32, i32)) -> i32 {
        let fraction = seconds_between(self.start, *value) / seconds_between(self.start, self.end);
        limit.0 + ((limit.1 - limit.0) as f64 * fraction).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<NaiveDateTime> {
        if hint.weight().allow_light_points() {
            self.month_starts()
        } else {
            self.year_starts()
        }
    }

    fn range(&self) -> Range<NaiveDateTime> {
        self.start..self.end
    }
}

/// Vertical axis covering a single day on [REFERENCE_DAY]. It's drawn upside down, so that
/// midnight is at the top and the day flows downwards.
#[derive(Debug, Clone)]
pub struct TimeOfDayAxis {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Default for TimeOfDayAxis {
    fn default() -> Self {
        let start = REFERENCE_DAY.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }
}

impl TimeOfDayAxis {
    pub fn hour_marks(&self, step: u32) -> Vec<NaiveDateTime> {
        (0..=24)
            .step_by(step.max(1) as usize)
            .map(|hour| self.start + Duration::hours(hour as i64))
            .collect()
    }
}

impl Ranged for TimeOfDayAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = NaiveDateTime;

    fn map(&self, value: &NaiveDateTime, limit: (i32, i32)) -> i32 {
        let fraction = seconds_between(self.start, *value) / seconds_between(self.start, self.end);
        limit.1 + ((limit.0 - limit.1) as f64 * fraction).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<NaiveDateTime> {
        if hint.weight().allow_light_points() {
            self.hour_marks(MINOR_HOUR_STEP)
        } else {
            self.hour_marks(MAJOR_HOUR_STEP)
        }
    }

    fn range(&self) -> Range<NaiveDateTime> {
        self.start..self.end
    }
}

fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use plotters::coord::ranged1d::{BoldPoints, LightPoints, Ranged};

    use crate::timeline::buckets::REFERENCE_DAY;

    use super::{DateAxis, TimeOfDayAxis};

    fn day(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn date_axis_major_ticks_are_years() {
        let axis = DateAxis::new(day(2019, 3, 15), day(2022, 2, 1));

        assert_eq!(
            axis.key_points(BoldPoints(10)),
            vec![day(2020, 1, 1), day(2021, 1, 1), day(2022, 1, 1)]
        );
    }

    #[test]
    fn date_axis_minor_ticks_are_months() {
        let axis = DateAxis::new(day(2020, 11, 1), day(2021, 2, 10));

        assert_eq!(
            axis.key_points(LightPoints::new(10, 100)),
            vec![
                day(2020, 11, 1),
                day(2020, 12, 1),
                day(2021, 1, 1),
                day(2021, 2, 1)
            ]
        );
    }

    #[test]
    fn date_axis_maps_left_to_right() {
        let axis = DateAxis::new(day(2020, 1, 1), day(2020, 1, 11));

        assert_eq!(axis.map(&day(2020, 1, 1), (0, 100)), 0);
        assert_eq!(axis.map(&day(2020, 1, 6), (0, 100)), 50);
        assert_eq!(axis.map(&day(2020, 1, 11), (0, 100)), 100);
    }

    #[test]
    fn date_axis_widens_single_day() {
        let axis = DateAxis::new(day(2020, 5, 5), day(2020, 5, 5));

        assert_eq!(axis.range(), day(2020, 5, 5)..day(2020, 5, 6));
        assert_eq!(axis.map(&day(2020, 5, 5), (10, 20)), 10);
    }

    #[test]
    fn time_axis_ticks() {
        let axis = TimeOfDayAxis::default();
        let major = axis.key_points(BoldPoints(10));
        let minor = axis.key_points(LightPoints::new(10, 100));

        assert_eq!(
            major
                .iter()
                .map(|v| v.format("%H:%M").to_string())
                .collect::<Vec<_>>(),
            vec!["00:00", "06:00", "12:00", "18:00", "00:00"]
        );
        assert_eq!(minor.len(), 25);
        assert_eq!(minor[1], REFERENCE_DAY.and_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn time_axis_is_inverted() {
        let axis = TimeOfDayAxis::default();
        // plotters hands the vertical limit as (bottom, top)
        let limit = (400, 0);

        assert_eq!(axis.map(&REFERENCE_DAY.and_hms_opt(0, 0, 0).unwrap(), limit), 0);
        assert_eq!(axis.map(&REFERENCE_DAY.and_hms_opt(12, 0, 0).unwrap(), limit), 200);
        assert_eq!(axis.map(&REFERENCE_DAY.and_hms_opt(18, 0, 0).unwrap(), limit), 300);
    }
}
