use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::MetOfficeClient;
use crate::config::Config;
use crate::formatters::{format_daily_forecast, format_observations};
use crate::models::{GetDailyForecastRequest, GetHourlyObservationsRequest};
use crate::stations::resolve_station_id;

/// Outcome of a lookup, before it is wrapped for MCP.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Formatted report, or a plain "not found" answer
    Answer(String),
    /// Something went wrong upstream; the text is user-facing
    Failure(String),
}

impl Lookup {
    fn into_result(self) -> CallToolResult {
        match self {
            Lookup::Answer(text) => CallToolResult::success(vec![Content::text(text)]),
            Lookup::Failure(text) => CallToolResult::error(vec![Content::text(text)]),
        }
    }
}

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    client: Arc<MetOfficeClient>,
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: Config) -> Result<Self> {
        let client = MetOfficeClient::new(&config)?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        })
    }

    /// Resolves `name` to a station and renders its last 24 hours of observations
    pub async fn hourly_observations(&self, name: &str) -> Lookup {
        let Some(station_id) = resolve_station_id(&self.config.stations_path, name) else {
            tracing::info!("No station matches '{}'", name);
            return Lookup::Answer(format!(
                "Location '{}' not found. Please check the spelling or try a different location name.",
                name
            ));
        };

        let url = format!(
            "{}/wxobs/all/json/{}",
            self.config.datapoint_base, station_id
        );

        let data = match self
            .client
            .fetch_json(&url, &[("res", "hourly".to_string())])
            .await
        {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(
                    status = ?e.status(),
                    "Failed to fetch observations for station {}: {}",
                    station_id,
                    e
                );
                return Lookup::Failure(
                    "Unable to fetch observations data for this location.".to_string(),
                );
            }
        };

        match format_observations(data, name) {
            Ok(report) => Lookup::Answer(report),
            Err(e) => {
                tracing::error!("Failed to format observations for station {}: {}", station_id, e);
                Lookup::Failure(format!(
                    "Failed to parse the observations data: {}. The structure might have changed or the location is invalid.",
                    e
                ))
            }
        }
    }

    /// Fetches and renders the site-specific daily forecast for a coordinate pair
    pub async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Lookup {
        let url = format!("{}/daily", self.config.site_specific_base);
        let params = [
            ("dataSource", "BD1".to_string()),
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("includeLocationName", "true".to_string()),
        ];

        let data = match self.client.fetch_json_with_key_header(&url, &params).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(status = ?e.status(), "Failed to fetch daily forecast: {}", e);
                return Lookup::Failure(
                    "Unable to fetch forecast data for this location.".to_string(),
                );
            }
        };

        match format_daily_forecast(data) {
            Ok(report) => Lookup::Answer(report),
            Err(e) => {
                tracing::error!("Failed to format daily forecast: {}", e);
                Lookup::Failure(format!(
                    "Failed to parse the forecast data: {}. The structure might have changed or the location is invalid.",
                    e
                ))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "UK_weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "UK weather information from the Met Office. \
                Provides hourly observations for named UK observation stations and \
                daily site-specific forecasts for coordinates."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets hourly weather observations for a named UK station
    #[tool(description = "Returns hourly weather observations for the last 24 hours. Provide the name of the location (e.g., 'Cardinham').")]
    async fn get_hourly_observations(
        &self,
        Parameters(request): Parameters<GetHourlyObservationsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting hourly observations for: {}", request.name);

        Ok(self.hourly_observations(&request.name).await.into_result())
    }

    /// Gets the daily forecast for a UK coordinate pair
    #[tool(description = "Get the daily weather forecast for a location in the UK. Provide latitude and longitude (e.g., latitude: 50.50, longitude: -4.67).")]
    async fn get_daily_forecast(
        &self,
        Parameters(request): Parameters<GetDailyForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting daily forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        Ok(self
            .daily_forecast(request.latitude, request.longitude)
            .await
            .into_result())
    }
}
