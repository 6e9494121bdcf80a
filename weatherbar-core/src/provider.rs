use async_trait::async_trait;
use reqwest::{Client, Url};
use std::{convert::TryFrom, fmt::Debug};
use tracing::debug;

use crate::{
    error::{Error, Result},
    fetch,
    model::{Credentials, RawForecast, Summary},
    provider::{darksky::DarkSkyProvider, openweathermap::OpenWeatherMapProvider},
};

pub mod darksky;
pub mod openweathermap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeatherMap,
    DarkSky,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "openweathermap",
            ProviderId::DarkSky => "darkskynet",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeatherMap, ProviderId::DarkSky]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweathermap" => Ok(ProviderId::OpenWeatherMap),
            "darkskynet" => Ok(ProviderId::DarkSky),
            _ => Err(Error::UnknownProvider(value.to_string())),
        }
    }
}

/// A weather data source: one URL template, one response schema, one
/// normalization into the shared summary shape.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// The forecast request URL with credentials substituted. Location and
    /// key are percent-encoded, never spliced in verbatim.
    fn request_url(&self, creds: &Credentials) -> Url;

    /// Map this provider's raw document into the canonical summary.
    fn normalize(&self, raw: &RawForecast) -> Result<Summary>;

    /// Fetch the forecast: one GET against `request_url`, body parsed as
    /// JSON and kept verbatim.
    async fn fetch(&self, http: &Client, creds: &Credentials) -> Result<RawForecast> {
        // the URL embeds the API key, so log only the provider id
        debug!(provider = %self.id(), "requesting forecast");
        fetch::get_json(http, self.request_url(creds)).await
    }
}

/// Construct the provider implementation for an id. The set is closed, so
/// this cannot fail; unknown names are rejected earlier when parsing the
/// `ProviderId`.
pub fn provider(id: ProviderId) -> Box<dyn Provider> {
    match id {
        ProviderId::OpenWeatherMap => Box::new(OpenWeatherMapProvider),
        ProviderId::DarkSky => Box::new(DarkSkyProvider),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(matches!(err, Error::UnknownProvider(_)));
        assert!(err.to_string().contains("doesnotexist"));
    }

    #[test]
    fn provider_dispatch_matches_id() {
        for id in ProviderId::all() {
            assert_eq!(provider(*id).id(), *id);
        }
    }
}
