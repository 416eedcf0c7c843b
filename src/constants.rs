use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-metoffice-weather/0.1.0";

/// Met Office DataPoint API base URL
pub const DATAPOINT_API_BASE: &str = "http://datapoint.metoffice.gov.uk/public/data/val";

/// Met Office Weather DataHub site-specific forecast base URL
pub const SITE_SPECIFIC_API_BASE: &str =
    "https://data.hub.api.metoffice.gov.uk/sitespecific/v0/point";

/// Environment variable holding the Met Office API key
pub const API_KEY_ENV: &str = "MET_OFFICE_API_KEY";

/// Environment variable overriding the station directory location
pub const STATIONS_FILE_ENV: &str = "MET_OFFICE_STATIONS_FILE";

/// Station directory read when no override is configured
pub const DEFAULT_STATIONS_FILE: &str = "stations.json";

/// Upper bound for a single upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
