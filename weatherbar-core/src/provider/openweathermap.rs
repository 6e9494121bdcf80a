use chrono::{DateTime, Local, NaiveDate, Timelike};
use reqwest::Url;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{Credentials, Day, RawForecast, Summary, Today};
use crate::normalize::{icon_file, local_datetime, weekday_name};

use super::{Provider, ProviderId};

const FORECAST_URL: &str = "http://api.openweathermap.org/data/2.5/forecast";

const FORECAST_DAYS: usize = 3;

/// OpenWeatherMap reports temperatures in Kelvin.
const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy)]
pub struct OpenWeatherMapProvider;

#[derive(Debug, Deserialize)]
struct OwForecast {
    list: Vec<OwEntry>,
}

#[derive(Debug, Deserialize)]
struct OwEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

impl Provider for OpenWeatherMapProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeatherMap
    }

    fn request_url(&self, creds: &Credentials) -> Url {
        Url::parse_with_params(
            FORECAST_URL,
            &[
                ("q", creds.location.as_str()),
                ("APPID", creds.api_key.as_str()),
            ],
        )
        .expect("static url template is valid")
    }

    fn normalize(&self, raw: &RawForecast) -> Result<Summary> {
        let parsed: OwForecast = serde_json::from_value(raw.as_value().clone())
            .map_err(|e| Error::Parse(format!("openweathermap forecast: {e}")))?;

        let first = parsed.list.first().ok_or_else(|| {
            Error::Parse("openweathermap forecast contained no entries".to_string())
        })?;

        let today = Today {
            date: weekday_name(first.dt)?,
            icon: icon_file(condition_code(first)).to_string(),
            temp: kelvin_to_celsius(first.main.temp),
            humidity: first.main.humidity / 100.0,
            summary: first
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        };

        let first_date = local_datetime(first.dt)?.date_naive();
        let days = daily_buckets(&parsed.list, first_date)?;

        Ok(Summary { today, days })
    }
}

fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

/// Translate an entry's condition group onto the shared icon-code table.
/// Groups without a counterpart fall through to the table's own fallback.
fn condition_code(entry: &OwEntry) -> &str {
    match entry.weather.first().map(|w| w.main.as_str()) {
        Some("Clear") => "clear-day",
        Some("Clouds") => "cloudy",
        Some("Rain") | Some("Drizzle") | Some("Thunderstorm") => "rain",
        Some("Snow") => "snow",
        Some("Mist") | Some("Fog") | Some("Haze") => "fog",
        Some(other) => other,
        None => "",
    }
}

/// Collapse the 3-hourly series into per-day forecasts: group entries by
/// local calendar date, skip the date the series starts on, and keep the
/// next three dates. Min/max aggregate over each day's entries; the icon
/// comes from the entry nearest local midday.
fn daily_buckets(entries: &[OwEntry], first_date: NaiveDate) -> Result<Vec<Day>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<(DateTime<Local>, &OwEntry)>> = BTreeMap::new();

    for entry in entries {
        let local = local_datetime(entry.dt)?;
        buckets.entry(local.date_naive()).or_default().push((local, entry));
    }

    let mut days = Vec::new();

    for (date, bucket) in buckets
        .iter()
        .filter(|(date, _)| **date > first_date)
        .take(FORECAST_DAYS)
    {
        let min = bucket
            .iter()
            .map(|(_, e)| e.main.temp_min)
            .fold(f64::INFINITY, f64::min);
        let max = bucket
            .iter()
            .map(|(_, e)| e.main.temp_max)
            .fold(f64::NEG_INFINITY, f64::max);

        let Some(&(_, icon_entry)) = bucket.iter().min_by_key(|(local, _)| {
            let minutes = i64::from(local.hour()) * 60 + i64::from(local.minute());
            (minutes - 12 * 60).abs()
        }) else {
            continue;
        };

        days.push(Day {
            date: date.format("%A").to_string(),
            icon: icon_file(condition_code(icon_entry)).to_string(),
            min: kelvin_to_celsius(min),
            max: kelvin_to_celsius(max),
        });
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2021-03-08 12:00 UTC
    const BASE_TS: i64 = 1_615_204_800;

    fn entry(dt: i64, temp: f64, group: &str) -> serde_json::Value {
        serde_json::json!({
            "dt": dt,
            "main": {
                "temp": temp,
                "temp_min": temp - 1.0,
                "temp_max": temp + 1.0,
                "humidity": 82,
            },
            "weather": [{"main": group, "description": format!("{} conditions", group)}],
        })
    }

    fn fixture() -> RawForecast {
        // one entry today, then three-hourly entries across four more days
        let mut list = vec![entry(BASE_TS, 291.35, "Rain")];
        for day in 1..=4_i64 {
            for hour_slot in [-6, 0, 6] {
                list.push(entry(
                    BASE_TS + day * 86_400 + hour_slot * 3_600,
                    285.15 + day as f64,
                    "Clouds",
                ));
            }
        }
        RawForecast(serde_json::json!({"list": list}))
    }

    #[test]
    fn request_url_follows_the_template() {
        let url = OpenWeatherMapProvider.request_url(&Credentials {
            api_key: "KEY".into(),
            location: "Lisbon".into(),
        });

        let s = url.as_str();
        assert!(s.starts_with("http://api.openweathermap.org/data/2.5/forecast?"));
        assert!(s.contains("q=Lisbon"));
        assert!(s.contains("APPID=KEY"));
    }

    #[test]
    fn request_url_encodes_the_location() {
        let url = OpenWeatherMapProvider.request_url(&Credentials {
            api_key: "KEY".into(),
            location: "São Paulo".into(),
        });

        assert!(!url.as_str().contains(' '));
        assert!(!url.as_str().contains('ã'));
    }

    #[test]
    fn normalize_converts_kelvin_and_humidity() {
        let summary = OpenWeatherMapProvider.normalize(&fixture()).unwrap();

        assert!((summary.today.temp - 18.2).abs() < 1e-9);
        assert!((summary.today.humidity - 0.82).abs() < 1e-9);
        assert_eq!(summary.today.icon, "12.png");
        assert_eq!(summary.today.summary, "Rain conditions");
    }

    #[test]
    fn normalize_buckets_the_series_into_three_days() {
        let summary = OpenWeatherMapProvider.normalize(&fixture()).unwrap();

        assert_eq!(summary.days.len(), 3);

        // day 1 entries sit at 286.15 K ± 1
        let day1 = &summary.days[0];
        assert!((day1.min - (285.15 - 273.15)).abs() < 1e-9);
        assert!((day1.max - (287.15 - 273.15)).abs() < 1e-9);
        assert_eq!(day1.icon, "28.png");
    }

    #[test]
    fn short_series_yields_fewer_days() {
        let list = vec![
            entry(BASE_TS, 291.35, "Clear"),
            entry(BASE_TS + 86_400, 290.15, "Snow"),
        ];
        let raw = RawForecast(serde_json::json!({"list": list}));

        let summary = OpenWeatherMapProvider.normalize(&raw).unwrap();
        assert_eq!(summary.today.icon, "32.png");
        assert_eq!(summary.days.len(), 1);
        assert_eq!(summary.days[0].icon, "14.png");
    }

    #[test]
    fn unknown_condition_group_falls_back() {
        let raw = RawForecast(serde_json::json!({"list": [entry(BASE_TS, 291.35, "Squall")]}));
        let summary = OpenWeatherMapProvider.normalize(&raw).unwrap();
        assert_eq!(summary.today.icon, "3200.png");
    }

    #[test]
    fn empty_list_is_a_parse_error() {
        let raw = RawForecast(serde_json::json!({"list": []}));
        let err = OpenWeatherMapProvider.normalize(&raw).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
