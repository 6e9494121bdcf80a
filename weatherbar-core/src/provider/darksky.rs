use reqwest::Url;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Credentials, Day, RawForecast, Summary, Today};
use crate::normalize::{icon_file, weekday_name};

use super::{Provider, ProviderId};

const FORECAST_URL: &str = "https://api.darksky.net/forecast";

/// How many daily entries feed the summary.
const FORECAST_DAYS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct DarkSkyProvider;

#[derive(Debug, Deserialize)]
struct DsForecast {
    currently: DsCurrently,
    daily: DsDaily,
}

#[derive(Debug, Deserialize)]
struct DsCurrently {
    time: i64,
    icon: String,
    temperature: f64,
    humidity: f64,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct DsDaily {
    data: Vec<DsDay>,
}

#[derive(Debug, Deserialize)]
struct DsDay {
    time: i64,
    icon: String,
    #[serde(rename = "temperatureMin")]
    temperature_min: f64,
    #[serde(rename = "temperatureMax")]
    temperature_max: f64,
}

impl Provider for DarkSkyProvider {
    fn id(&self) -> ProviderId {
        ProviderId::DarkSky
    }

    fn request_url(&self, creds: &Credentials) -> Url {
        let mut url = Url::parse(FORECAST_URL).expect("static url template is valid");

        url.path_segments_mut()
            .expect("https url is a valid base")
            .push(&creds.api_key)
            .push(&creds.location);

        url.query_pairs_mut()
            .append_pair("units", "si")
            .append_pair("lang", "pt")
            .append_pair("exclude", "minutely,hourly,alerts,flags");

        url
    }

    fn normalize(&self, raw: &RawForecast) -> Result<Summary> {
        let parsed: DsForecast = serde_json::from_value(raw.as_value().clone())
            .map_err(|e| Error::Parse(format!("darksky forecast: {e}")))?;

        let today = Today {
            date: weekday_name(parsed.currently.time)?,
            icon: icon_file(&parsed.currently.icon).to_string(),
            temp: parsed.currently.temperature,
            humidity: parsed.currently.humidity,
            summary: parsed.currently.summary,
        };

        // fewer than three daily entries just yields fewer days
        let days = parsed
            .daily
            .data
            .iter()
            .take(FORECAST_DAYS)
            .map(|day| {
                Ok(Day {
                    date: weekday_name(day.time)?,
                    icon: icon_file(&day.icon).to_string(),
                    min: day.temperature_min,
                    max: day.temperature_max,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Summary { today, days })
    }
}
