use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderId;

/// Error type shared by the whole crate.
///
/// Nothing here is recovered internally: every failure aborts the current
/// operation and surfaces to the caller. In particular there is no
/// partial-success mode where a summary is written from half-parsed data.
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "provider '{0}' has no credentials in the config file.\n\
         Hint: run `weatherbar configure {0}` and enter an API key and location."
    )]
    ConfigMissing(ProviderId),

    #[error("unknown provider '{0}'. Supported providers: openweathermap, darkskynet.")]
    UnknownProvider(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed forecast data: {0}")]
    Parse(String),

    #[error("no cached forecast at {}", .0.display())]
    CacheMiss(PathBuf),

    #[error("config file error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_missing_mentions_configure_hint() {
        let err = Error::ConfigMissing(ProviderId::DarkSky);
        let msg = err.to_string();
        assert!(msg.contains("darkskynet"));
        assert!(msg.contains("weatherbar configure"));
    }

    #[test]
    fn unknown_provider_lists_supported() {
        let msg = Error::UnknownProvider("wunderground".into()).to_string();
        assert!(msg.contains("wunderground"));
        assert!(msg.contains("openweathermap"));
        assert!(msg.contains("darkskynet"));
    }

    #[test]
    fn cache_miss_names_the_path() {
        let err = Error::CacheMiss(PathBuf::from("/tmp/weather-darkskynet.json"));
        assert!(err.to_string().contains("weather-darkskynet.json"));
    }
}
