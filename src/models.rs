use schemars::JsonSchema;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// DataPoint Observation Models
// ============================================================================

/// DataPoint collapses single-element lists into a bare object.
#[derive(Debug)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

// Decided by the JSON shape so that element errors keep their own message.
impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = match value {
            Value::Array(_) => serde_json::from_value(value).map(OneOrMany::Many),
            _ => serde_json::from_value(value).map(OneOrMany::One),
        };
        parsed.map_err(de::Error::custom)
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ObservationResponse {
    #[serde(rename = "SiteRep")]
    pub site_rep: SiteRep,
}

#[derive(Debug, Deserialize)]
pub struct SiteRep {
    #[serde(rename = "DV")]
    pub data_view: DataView,
}

#[derive(Debug, Deserialize)]
pub struct DataView {
    #[serde(rename = "Location")]
    pub location: ObservedLocation,
}

#[derive(Debug, Deserialize)]
pub struct ObservedLocation {
    pub name: String,
    #[serde(rename = "Period")]
    pub periods: OneOrMany<RawPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct RawPeriod {
    /// Day in `YYYY-MM-DDZ` form
    pub value: String,
    #[serde(rename = "Rep")]
    pub reps: OneOrMany<RawRep>,
}

/// One hourly report. Values arrive as strings or numbers depending on the
/// field, so they are kept as raw JSON.
#[derive(Debug, Deserialize)]
pub struct RawRep {
    /// Minutes since midnight
    #[serde(rename = "$")]
    pub minutes: Value,
    #[serde(rename = "T")]
    pub temperature: Option<Value>,
    #[serde(rename = "H")]
    pub humidity: Option<Value>,
    #[serde(rename = "P")]
    pub pressure: Option<Value>,
    #[serde(rename = "S")]
    pub wind_speed: Option<Value>,
    #[serde(rename = "G")]
    pub wind_gust: Option<Value>,
    #[serde(rename = "D")]
    pub wind_direction: Option<Value>,
    #[serde(rename = "W")]
    pub weather_type: Option<Value>,
    #[serde(rename = "V")]
    pub visibility: Option<Value>,
    #[serde(rename = "Dp")]
    pub dew_point: Option<Value>,
}

// ============================================================================
// Weather DataHub Site-Specific Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DailyForecastResponse {
    pub features: Vec<ForecastFeature>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastFeature {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub location: ForecastLocation,
    #[serde(rename = "timeSeries")]
    pub time_series: Vec<DailyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DailyEntry {
    /// ISO 8601 timestamp, e.g. `2024-05-21T00:00Z`
    pub time: String,
    #[serde(rename = "dayMaxScreenTemperature")]
    pub day_max_temperature: Option<Value>,
    #[serde(rename = "nightMinScreenTemperature")]
    pub night_min_temperature: Option<Value>,
    #[serde(rename = "daySignificantWeatherCode")]
    pub day_weather_code: Option<Value>,
    #[serde(rename = "nightSignificantWeatherCode")]
    pub night_weather_code: Option<Value>,
    #[serde(rename = "midday10MWindSpeed")]
    pub midday_wind_speed: Option<Value>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetHourlyObservationsRequest {
    /// Name of the location (e.g., "Cardinham")
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetDailyForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}
