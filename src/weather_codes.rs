use serde_json::Value;

/// Marker the Met Office uses when no weather type was recorded
pub const NOT_AVAILABLE: &str = "NA";

// https://www.metoffice.gov.uk/services/data/datapoint/code-definitions
const DESCRIPTIONS: [&str; 31] = [
    "Clear night",
    "Sunny day",
    "Partly cloudy (night)",
    "Partly cloudy (day)",
    "Not used",
    "Mist",
    "Fog",
    "Cloudy",
    "Overcast",
    "Light rain shower (night)",
    "Light rain shower (day)",
    "Drizzle",
    "Light rain",
    "Heavy rain shower (night)",
    "Heavy rain shower (day)",
    "Heavy rain",
    "Sleet shower (night)",
    "Sleet shower (day)",
    "Sleet",
    "Hail shower (night)",
    "Hail shower (day)",
    "Hail",
    "Light snow shower (night)",
    "Light snow shower (day)",
    "Light snow",
    "Heavy snow shower (night)",
    "Heavy snow shower (day)",
    "Heavy snow",
    "Thunder shower (night)",
    "Thunder shower (day)",
    "Thunder",
];

/// A weather type code as it arrived from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherCode {
    /// Integer code, with the text it was parsed from
    Numeric { code: i64, raw: String },
    /// The "NA" sentinel, or no code at all
    NotAvailable,
    /// Anything that is neither an integer nor the sentinel
    Unrecognised(String),
}

impl WeatherCode {
    /// Classifies a raw text value.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return WeatherCode::Numeric {
                code,
                raw: raw.to_string(),
            };
        }
        if raw == NOT_AVAILABLE {
            return WeatherCode::NotAvailable;
        }
        WeatherCode::Unrecognised(raw.to_string())
    }

    /// Classifies an optional JSON field; a missing field counts as the sentinel.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => WeatherCode::NotAvailable,
            Some(Value::String(s)) => Self::parse(s),
            Some(Value::Number(n)) => {
                let raw = n.to_string();
                // Fractional codes truncate toward zero.
                let integral = n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64));
                match integral {
                    Some(code) => WeatherCode::Numeric { code, raw },
                    None => WeatherCode::Unrecognised(raw),
                }
            }
            Some(other) => WeatherCode::Unrecognised(other.to_string()),
        }
    }

    /// Human-readable description of the code.
    pub fn describe(&self) -> String {
        match self {
            WeatherCode::Numeric { code, raw } => usize::try_from(*code)
                .ok()
                .and_then(|idx| DESCRIPTIONS.get(idx))
                .map(|desc| desc.to_string())
                .unwrap_or_else(|| format!("Unknown code: {raw}")),
            WeatherCode::NotAvailable => "Not available".to_string(),
            WeatherCode::Unrecognised(raw) => format!("Unknown code: {raw}"),
        }
    }
}
