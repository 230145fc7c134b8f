//! Horizon filtering of 3-hourly forecast samples.

use chrono::{NaiveDate, Timelike};

use crate::model::{ForecastHorizon, ForecastPoint};

/// Hour of day of the sample that stands in for a whole day in week view.
const MIDDAY_HOUR: u32 = 12;

/// Narrow the raw sample list to the requested window, preserving order.
///
/// `today` is injected so callers control what "today" means: the local
/// calendar date in production, a fixed date in tests. An empty result is a
/// valid outcome; the presenter turns it into user guidance.
pub fn select(
    mut points: Vec<ForecastPoint>,
    horizon: ForecastHorizon,
    today: NaiveDate,
) -> Vec<ForecastPoint> {
    match horizon {
        ForecastHorizon::Now => {}
        ForecastHorizon::Today => points.retain(|p| p.timestamp.date() == today),
        ForecastHorizon::Tomorrow => {
            points.retain(|p| Some(p.timestamp.date()) == today.succ_opt());
        }
        ForecastHorizon::Week => points.retain(|p| p.timestamp.hour() == MIDDAY_HOUR),
    }
    points
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDateTime;

    use super::*;

    fn point(ts: &str) -> ForecastPoint {
        ForecastPoint {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            temperature_c: 18.0,
            feels_like_c: 17.5,
            temp_min_c: None,
            temp_max_c: None,
            humidity_pct: 60,
            wind_speed_mps: 3.2,
            description: "scattered clouds".to_owned(),
        }
    }

    /// Five days of 3-hourly samples starting at the given date, like one
    /// upstream forecast response.
    fn five_days_from(start: NaiveDate) -> Vec<ForecastPoint> {
        let mut points = Vec::new();
        for day in 0..5 {
            let date = start + chrono::Days::new(day);
            for hour in (0..24).step_by(3) {
                points.push(point(&format!("{date} {hour:02}:00:00")));
            }
        }
        points
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn now_keeps_everything() {
        let today = date("2026-08-23");
        let points = five_days_from(today);
        let kept = select(points.clone(), ForecastHorizon::Now, today);
        assert_eq!(kept, points);
    }

    #[test]
    fn today_keeps_only_samples_from_today() {
        let today = date("2026-08-23");
        let kept = select(five_days_from(today), ForecastHorizon::Today, today);
        assert_eq!(kept.len(), 8);
        assert!(kept.iter().all(|p| p.timestamp.date() == today));
    }

    #[test]
    fn tomorrow_keeps_only_the_next_day() {
        let today = date("2026-08-23");
        let kept = select(five_days_from(today), ForecastHorizon::Tomorrow, today);
        assert_eq!(kept.len(), 8);
        assert!(kept.iter().all(|p| p.timestamp.date() == date("2026-08-24")));
    }

    #[test]
    fn week_takes_one_noon_sample_per_day() {
        let today = date("2026-08-23");
        let kept = select(five_days_from(today), ForecastHorizon::Week, today);
        assert_eq!(kept.len(), 5);
        assert!(kept.iter().all(|p| p.timestamp.hour() == 12));

        let days: BTreeSet<_> = kept.iter().map(|p| p.timestamp.date()).collect();
        assert_eq!(days.len(), 5);
    }

    #[test]
    fn today_is_empty_when_all_samples_are_in_the_future() {
        // Requesting late in the day can leave no remaining samples for it.
        let today = date("2026-08-23");
        let kept = select(
            five_days_from(date("2026-08-24")),
            ForecastHorizon::Today,
            today,
        );
        assert!(kept.is_empty());
    }

    #[test]
    fn month_boundary_rolls_over() {
        let today = date("2026-08-31");
        let kept = select(five_days_from(today), ForecastHorizon::Tomorrow, today);
        assert_eq!(kept.len(), 8);
        assert!(kept.iter().all(|p| p.timestamp.date() == date("2026-09-01")));
    }
}
