//! KMA ultra-short-range nowcast support
//!
//! Base date/time selection for the `getUltraSrtNcst` endpoint, extraction
//! of observations from its JSON payload and the 12-hour history kept for
//! graphing.

use crate::error::WeatherGridError;
use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use chrono_tz::Asia::Seoul;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Number of hourly slots kept in [`WeatherHistory`]
pub const HISTORY_HOURS: usize = 12;

/// Observations for an hour are published a few minutes after the hour
const PUBLICATION_DELAY_MINUTES: i64 = 7;

/// Hour for which observations are requested, in Korea Standard Time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BaseTime(NaiveDateTime);

impl BaseTime {
    /// Latest hour whose observations should be available at `now`
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        let local = (now - Duration::minutes(PUBLICATION_DELAY_MINUTES))
            .with_timezone(&Seoul)
            .naive_local();
        let hour = local
            .date()
            .and_hms_opt(local.hour(), 0, 0)
            .unwrap_or(local);
        Self(hour)
    }

    /// `base_date` query value (YYYYMMDD)
    #[must_use]
    pub fn date_param(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// `base_time` query value (HH00)
    #[must_use]
    pub fn time_param(&self) -> String {
        self.0.format("%H00").to_string()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn hours_before(&self, hours: i64) -> Self {
        Self(self.0 - Duration::hours(hours))
    }
}

/// Base times of the history window, oldest first, ending at the current hour
#[must_use]
pub fn history_base_times(now: DateTime<Utc>) -> Vec<BaseTime> {
    let current = BaseTime::at(now);
    (0..HISTORY_HOURS)
        .map(|slot| current.hours_before((HISTORY_HOURS - 1 - slot) as i64))
        .collect()
}

/// One hourly observation for a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Temperature in Celsius (T1H)
    pub temperature: f32,
    /// Relative humidity in percent (REH)
    pub humidity: f32,
    /// Rainfall over the last hour in mm (RN1)
    pub rainfall: Option<f32>,
    /// Wind speed in m/s (WSD)
    pub wind_speed: Option<f32>,
    /// Wind direction in degrees (VEC)
    pub wind_direction: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct NowcastResponse {
    response: NowcastEnvelope,
}

#[derive(Debug, Deserialize)]
struct NowcastEnvelope {
    header: Option<NowcastHeader>,
    body: Option<NowcastBody>,
}

#[derive(Debug, Deserialize)]
struct NowcastHeader {
    #[serde(rename = "resultCode")]
    result_code: String,
    #[serde(rename = "resultMsg", default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
struct NowcastBody {
    items: Option<NowcastItems>,
}

#[derive(Debug, Deserialize)]
struct NowcastItems {
    #[serde(default)]
    item: Vec<NowcastItem>,
}

#[derive(Debug, Deserialize)]
struct NowcastItem {
    category: String,
    #[serde(rename = "obsrValue")]
    obsr_value: Value,
}

impl NowcastItem {
    fn value(&self) -> Option<f32> {
        match &self.obsr_value {
            Value::Number(n) => n.as_f64().map(|v| v as f32),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Extract an observation from a `getUltraSrtNcst` JSON payload.
///
/// Returns `Ok(None)` when the payload carries no items or lacks
/// temperature or humidity.
pub fn extract_observation(json: &str) -> crate::Result<Option<Observation>> {
    let parsed: NowcastResponse = serde_json::from_str(json)
        .map_err(|e| WeatherGridError::parse(format!("Invalid nowcast JSON: {e}")))?;

    if let Some(header) = &parsed.response.header {
        debug!(
            "Nowcast result {}: {}",
            header.result_code, header.result_msg
        );
    }

    let Some(items) = parsed.response.body.and_then(|body| body.items) else {
        return Ok(None);
    };

    let (mut t1h, mut reh, mut rn1, mut wsd, mut vec_deg) = (None, None, None, None, None);
    for item in &items.item {
        let slot = match item.category.as_str() {
            "T1H" => &mut t1h,
            "REH" => &mut reh,
            "RN1" => &mut rn1,
            "WSD" => &mut wsd,
            "VEC" => &mut vec_deg,
            _ => continue,
        };
        *slot = item.value();
    }

    Ok(match (t1h, reh) {
        (Some(temperature), Some(humidity)) => Some(Observation {
            temperature,
            humidity,
            rainfall: rn1,
            wind_speed: wsd,
            wind_direction: vec_deg,
        }),
        _ => None,
    })
}

/// Quantity plotted from the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    Rainfall,
    WindSpeed,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Rainfall,
        Metric::WindSpeed,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temp (C)",
            Metric::Humidity => "Humid (%)",
            Metric::Rainfall => "Rain (mm,log)",
            Metric::WindSpeed => "Wind (m/s)",
        }
    }

    #[must_use]
    pub fn value(&self, observation: &Observation) -> Option<f32> {
        match self {
            Metric::Temperature => Some(observation.temperature),
            Metric::Humidity => Some(observation.humidity),
            Metric::Rainfall => observation.rainfall,
            Metric::WindSpeed => observation.wind_speed,
        }
    }

    /// Value on the plotting axis; rainfall is log-scaled
    #[must_use]
    pub fn plot_value(&self, raw: f32) -> f32 {
        match self {
            Metric::Rainfall => (1.0 + raw.max(0.0)).log10(),
            _ => raw,
        }
    }
}

/// Rolling 12-hour window of observations, oldest slot first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherHistory {
    slots: [Option<Observation>; HISTORY_HOURS],
}

impl WeatherHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an observation; out-of-range slots are ignored
    pub fn record(&mut self, slot: usize, observation: Observation) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(observation);
        }
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Observation> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Observation for the current hour
    #[must_use]
    pub fn latest(&self) -> Option<&Observation> {
        self.get(HISTORY_HOURS - 1)
    }

    /// Number of slots holding an observation
    #[must_use]
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Raw values of `metric`, one per slot
    #[must_use]
    pub fn series(&self, metric: Metric) -> [Option<f32>; HISTORY_HOURS] {
        self.slots
            .map(|slot| slot.as_ref().and_then(|observation| metric.value(observation)))
    }

    /// Minimum and maximum of the present values.
    ///
    /// A flat series gets `max = min + 1` so it can still be scaled.
    #[must_use]
    pub fn range(&self, metric: Metric) -> Option<(f32, f32)> {
        let mut values = self.series(metric).into_iter().flatten();
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if min == max {
            Some((min, min + 1.0))
        } else {
            Some((min, max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    const SAMPLE: &str = r#"{
        "response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL_SERVICE"},
            "body": {
                "dataType": "JSON",
                "items": {"item": [
                    {"baseDate": "20261017", "baseTime": "1400", "category": "PTY", "nx": 60, "ny": 127, "obsrValue": "0"},
                    {"baseDate": "20261017", "baseTime": "1400", "category": "REH", "nx": 60, "ny": 127, "obsrValue": "45"},
                    {"baseDate": "20261017", "baseTime": "1400", "category": "RN1", "nx": 60, "ny": 127, "obsrValue": "0"},
                    {"baseDate": "20261017", "baseTime": "1400", "category": "T1H", "nx": 60, "ny": 127, "obsrValue": "18.4"},
                    {"baseDate": "20261017", "baseTime": "1400", "category": "VEC", "nx": 60, "ny": 127, "obsrValue": 250},
                    {"baseDate": "20261017", "baseTime": "1400", "category": "WSD", "nx": 60, "ny": 127, "obsrValue": 2.1}
                ]},
                "pageNo": 1, "numOfRows": 60, "totalCount": 8
            }
        }
    }"#;

    fn observation(temperature: f32, rainfall: Option<f32>) -> Observation {
        Observation {
            temperature,
            humidity: 50.0,
            rainfall,
            wind_speed: Some(1.0),
            wind_direction: None,
        }
    }

    #[rstest]
    // 14:10 KST -> 14:03 -> 1400
    #[case(Utc.with_ymd_and_hms(2026, 10, 17, 5, 10, 0).unwrap(), "20261017", "1400")]
    // 14:05 KST -> 13:58 -> 1300
    #[case(Utc.with_ymd_and_hms(2026, 10, 17, 5, 5, 0).unwrap(), "20261017", "1300")]
    // 00:03 KST -> previous day 23:56
    #[case(Utc.with_ymd_and_hms(2026, 10, 16, 15, 3, 0).unwrap(), "20261016", "2300")]
    fn test_base_time(#[case] now: DateTime<Utc>, #[case] date: &str, #[case] time: &str) {
        let base = BaseTime::at(now);
        assert_eq!(base.date_param(), date);
        assert_eq!(base.time_param(), time);
    }

    #[test]
    fn test_history_base_times_oldest_first() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 1, 30, 0).unwrap(); // 10:30 KST
        let times = history_base_times(now);

        assert_eq!(times.len(), HISTORY_HOURS);
        assert_eq!(times[0].time_param(), "2300");
        assert_eq!(times[0].date_param(), "20261016");
        assert_eq!(times[11].time_param(), "1000");
        assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_extract_observation() {
        let observation = extract_observation(SAMPLE).unwrap().unwrap();
        assert_eq!(observation.temperature, 18.4);
        assert_eq!(observation.humidity, 45.0);
        assert_eq!(observation.rainfall, Some(0.0));
        assert_eq!(observation.wind_speed, Some(2.1));
        assert_eq!(observation.wind_direction, Some(250.0));
    }

    #[test]
    fn test_extract_observation_requires_temperature_and_humidity() {
        let json = r#"{"response": {"body": {"items": {"item": [
            {"category": "T1H", "obsrValue": "3.5"},
            {"category": "WSD", "obsrValue": "4.0"}
        ]}}}}"#;
        assert_eq!(extract_observation(json).unwrap(), None);
    }

    #[test]
    fn test_extract_observation_without_body() {
        let json = r#"{"response": {"header": {"resultCode": "03", "resultMsg": "NO_DATA"}}}"#;
        assert_eq!(extract_observation(json).unwrap(), None);
    }

    #[test]
    fn test_extract_observation_rejects_invalid_json() {
        let err = extract_observation("<OpenAPI_ServiceResponse>").unwrap_err();
        assert!(matches!(err, WeatherGridError::Parse { .. }));
    }

    #[test]
    fn test_history_latest_and_range() {
        let mut history = WeatherHistory::new();
        assert!(history.latest().is_none());
        assert_eq!(history.range(Metric::Temperature), None);

        history.record(0, observation(12.0, Some(0.0)));
        history.record(5, observation(15.5, None));
        history.record(11, observation(14.0, Some(3.0)));
        history.record(12, observation(99.0, None));

        assert_eq!(history.filled(), 3);
        assert_eq!(history.latest().map(|o| o.temperature), Some(14.0));
        assert_eq!(history.range(Metric::Temperature), Some((12.0, 15.5)));
        assert_eq!(history.range(Metric::Rainfall), Some((0.0, 3.0)));

        let rain = history.series(Metric::Rainfall);
        assert_eq!(rain[5], None);
        assert_eq!(rain[11], Some(3.0));
    }

    #[test]
    fn test_flat_range_is_widened() {
        let mut history = WeatherHistory::new();
        history.record(3, observation(20.0, None));
        history.record(4, observation(20.0, None));
        assert_eq!(history.range(Metric::Temperature), Some((20.0, 21.0)));
    }

    #[test]
    fn test_rainfall_plot_value_is_log_scaled() {
        assert_eq!(Metric::Rainfall.plot_value(0.0), 0.0);
        assert!((Metric::Rainfall.plot_value(9.0) - 1.0).abs() < 1e-6);
        assert_eq!(Metric::Rainfall.plot_value(-2.0), 0.0);
        assert_eq!(Metric::Temperature.plot_value(-2.0), -2.0);
    }
}
