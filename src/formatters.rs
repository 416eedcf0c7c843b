use serde_json::Value;

use crate::error::FormatError;
use crate::models::{DailyForecastResponse, ObservationResponse, RawPeriod, RawRep};
use crate::weather_codes::WeatherCode;

const MISSING: &str = "N/A";

/// Parsed hourly observations for one station.
#[derive(Debug)]
pub struct ObservationReport {
    pub location_name: String,
    pub periods: Vec<ObservationPeriod>,
}

/// One day of observations.
#[derive(Debug)]
pub struct ObservationPeriod {
    /// Day with the trailing zone marker removed
    pub date: String,
    pub readings: Vec<HourlyReading>,
}

#[derive(Debug)]
pub struct HourlyReading {
    pub minutes_since_midnight: u32,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub pressure: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_gust: Option<String>,
    pub wind_direction: Option<String>,
    pub weather: WeatherCode,
    pub visibility: Option<String>,
    pub dew_point: Option<String>,
}

impl ObservationReport {
    /// Builds the report from a DataPoint `wxobs` payload.
    pub fn from_payload(payload: Value, requested_name: &str) -> Result<Self, FormatError> {
        let response: ObservationResponse =
            serde_json::from_value(payload).map_err(|source| FormatError::Shape {
                requested: requested_name.to_string(),
                source,
            })?;

        let location = response.site_rep.data_view.location;
        let periods = location
            .periods
            .into_vec()
            .into_iter()
            .map(ObservationPeriod::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            location_name: location.name,
            periods,
        })
    }

    /// Renders the report as plain text.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("Hourly observations for {}:", self.location_name)];

        for period in &self.periods {
            lines.push(format!("\n=== {} ===", period.date));
            lines.extend(period.readings.iter().map(HourlyReading::render));
        }

        lines.join("\n")
    }
}

impl ObservationPeriod {
    fn from_raw(raw: RawPeriod) -> Result<Self, FormatError> {
        let date = raw
            .value
            .strip_suffix('Z')
            .unwrap_or(&raw.value)
            .to_string();

        let readings = raw
            .reps
            .into_vec()
            .into_iter()
            .map(HourlyReading::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { date, readings })
    }
}

impl HourlyReading {
    fn from_raw(rep: RawRep) -> Result<Self, FormatError> {
        Ok(Self {
            minutes_since_midnight: parse_minutes(&rep.minutes)?,
            temperature: field_text(rep.temperature.as_ref()),
            humidity: field_text(rep.humidity.as_ref()),
            pressure: field_text(rep.pressure.as_ref()),
            wind_speed: field_text(rep.wind_speed.as_ref()),
            wind_gust: field_text(rep.wind_gust.as_ref()),
            wind_direction: field_text(rep.wind_direction.as_ref()),
            weather: WeatherCode::from_value(rep.weather_type.as_ref()),
            visibility: field_text(rep.visibility.as_ref()),
            dew_point: field_text(rep.dew_point.as_ref()),
        })
    }

    /// `HH:MM`, zero padded
    pub fn time_of_day(&self) -> String {
        let hours = self.minutes_since_midnight / 60;
        let minutes = self.minutes_since_midnight % 60;
        format!("{hours:02}:{minutes:02}")
    }

    fn render(&self) -> String {
        format!(
            "\n{} - Temp: {}\u{00b0}C, Weather: {}\n         Humidity: {}%, Pressure: {}hPa\n         Wind: {}mph from {} (gusts {}mph)\n         Visibility: {}m, Dew Point: {}\u{00b0}C",
            self.time_of_day(),
            or_missing(&self.temperature),
            self.weather.describe(),
            or_missing(&self.humidity),
            or_missing(&self.pressure),
            or_missing(&self.wind_speed),
            or_missing(&self.wind_direction),
            or_missing(&self.wind_gust),
            or_missing(&self.visibility),
            or_missing(&self.dew_point),
        )
    }
}

/// Formats a DataPoint observations payload into a human-readable report.
///
/// Any shape problem fails the whole report; nothing partial is returned.
pub fn format_observations(payload: Value, requested_name: &str) -> Result<String, FormatError> {
    ObservationReport::from_payload(payload, requested_name).map(|report| report.render())
}

/// Formats a Weather DataHub daily forecast into a human-readable string
pub fn format_daily_forecast(payload: Value) -> Result<String, FormatError> {
    let response: DailyForecastResponse =
        serde_json::from_value(payload).map_err(|source| FormatError::Shape {
            requested: "daily forecast".to_string(),
            source,
        })?;

    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(FormatError::NoFeatures)?;
    let props = feature.properties;

    let mut output = vec![format!("Daily forecast for {}:", props.location.name)];
    for day in &props.time_series {
        let date = day.time.split('T').next().unwrap_or(&day.time);

        let max_temp = field_text(day.day_max_temperature.as_ref());
        let min_temp = field_text(day.night_min_temperature.as_ref());
        let wind = field_text(day.midday_wind_speed.as_ref());
        if max_temp.is_none() || min_temp.is_none() || wind.is_none() {
            tracing::warn!(
                "Missing temperature or wind speed data for {}: {:?}",
                date,
                day
            );
        }

        output.push(format!(
            "\n---\nDate: {}\nMax Temp: {}\u{00b0}C\nMin Temp: {}\u{00b0}C\nWeather Type: {} (Day), {} (Night)\nWind Speed (10m): {} m/s\n",
            date,
            or_missing(&max_temp),
            or_missing(&min_temp),
            WeatherCode::from_value(day.day_weather_code.as_ref()).describe(),
            WeatherCode::from_value(day.night_weather_code.as_ref()).describe(),
            or_missing(&wind),
        ));
    }

    Ok(output.join("\n"))
}

fn parse_minutes(value: &Value) -> Result<u32, FormatError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|m| u32::try_from(m).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FormatError::InvalidTime(value.to_string()))
}

fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn or_missing(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}
