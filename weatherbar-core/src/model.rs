use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Per-provider credentials, read from the config file once per run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub location: String,
}

/// The provider's JSON response, verbatim. The schema varies by provider and
/// nothing beyond "valid JSON" is guaranteed; providers re-interpret it with
/// typed structs during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawForecast(pub serde_json::Value);

impl RawForecast {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Current conditions for the summary record.
#[derive(Debug, Clone, PartialEq)]
pub struct Today {
    /// Full English weekday name, e.g. "Monday".
    pub date: String,
    /// Icon image file name, e.g. "12.png".
    pub icon: String,
    /// Temperature in degrees Celsius.
    pub temp: f64,
    /// Relative humidity as a 0..1 fraction.
    pub humidity: f64,
    /// Free-text conditions summary.
    pub summary: String,
}

/// One forecast day for the summary record.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: String,
    pub icon: String,
    pub min: f64,
    pub max: f64,
}

/// The normalized, provider-agnostic summary consumed by the status-bar
/// widget.
///
/// Serializes to a flat JSON object: five `today_*` keys plus
/// `day_{i}_date`/`day_{i}_icon`/`day_{i}_min`/`day_{i}_max` for each entry
/// in `days` (numbered from 1). `days` holds at most three entries; when the
/// provider reports fewer, the missing `day_i_*` keys are simply absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub today: Today,
    pub days: Vec<Day>,
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5 + self.days.len() * 4))?;
        map.serialize_entry("today_date", &self.today.date)?;
        map.serialize_entry("today_icon", &self.today.icon)?;
        map.serialize_entry("today_temp", &self.today.temp)?;
        map.serialize_entry("today_humidity", &self.today.humidity)?;
        map.serialize_entry("today_summary", &self.today.summary)?;

        for (i, day) in self.days.iter().enumerate() {
            let n = i + 1;
            map.serialize_entry(&format!("day_{n}_date"), &day.date)?;
            map.serialize_entry(&format!("day_{n}_icon"), &day.icon)?;
            map.serialize_entry(&format!("day_{n}_min"), &day.min)?;
            map.serialize_entry(&format!("day_{n}_max"), &day.max)?;
        }

        map.end()
    }
}
