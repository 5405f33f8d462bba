//! Hourly forecast from the National Weather Service API.
//!
//! Setup resolves the configured coordinates into a gridpoint forecast URL via
//! `/points/{lat},{lon}`; every tick then fetches that URL and shows the first
//! hourly period. Only available with the `weather` feature.

use crate::collector::{CollectError, Collector, Reading, Severity};

const API_BASE: &str = "https://api.weather.gov";
#[cfg(feature = "weather")]
const USER_AGENT: &str = concat!("sbar/", env!("CARGO_PKG_VERSION"));

/// Fetches a JSON document over HTTP.
pub trait HttpFetch: Send {
    fn fetch(&mut self, url: &str) -> Result<String, CollectError>;
}

/// Blocking `reqwest` client that accepts JSON and GeoJSON responses only.
#[cfg(feature = "weather")]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "weather")]
impl HttpClient {
    pub fn new() -> Result<Self, CollectError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| CollectError::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "weather")]
impl HttpFetch for HttpClient {
    fn fetch(&mut self, url: &str) -> Result<String, CollectError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/geo+json")
            .send()
            .map_err(|e| CollectError::Http(format!("Failed to get {}: {}", url, e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CollectError::Http(format!("{} returned {}", url, status)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_json_content_type(&content_type) {
            return Err(CollectError::Http(format!(
                "Mismatch content type ({}) for {}",
                content_type, url
            )));
        }

        response
            .text()
            .map_err(|e| CollectError::Http(format!("Failed to read body of {}: {}", url, e)))
    }
}

/// Stand-in used when the crate is built without the `weather` feature.
#[cfg(not(feature = "weather"))]
pub struct HttpClient;

#[cfg(not(feature = "weather"))]
impl HttpClient {
    pub fn new() -> Result<Self, CollectError> {
        Ok(Self)
    }
}

#[cfg(not(feature = "weather"))]
impl HttpFetch for HttpClient {
    fn fetch(&mut self, _url: &str) -> Result<String, CollectError> {
        Err(not_built())
    }
}

#[cfg(not(feature = "weather"))]
fn not_built() -> CollectError {
    CollectError::Unsupported("Not building weather routine".into())
}

/// `application/json` or `application/geo+json`, parameters ignored.
pub fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or("").trim();
    mime.eq_ignore_ascii_case("application/json")
        || mime.eq_ignore_ascii_case("application/geo+json")
}

/// Gridpoint lookup URL for a coordinate pair.
pub fn points_url(latitude: f64, longitude: f64) -> String {
    format!("{}/points/{:.4},{:.4}", API_BASE, latitude, longitude)
}

#[cfg(feature = "weather")]
mod json {
    use serde_json::Value;

    use crate::collector::CollectError;

    fn parse(body: &str, what: &str) -> Result<Value, CollectError> {
        serde_json::from_str(body)
            .map_err(|e| CollectError::Parse(format!("Failed to parse {} response: {}", what, e)))
    }

    fn node<'a>(value: &'a Value, key: &str) -> Result<&'a Value, CollectError> {
        value
            .get(key)
            .ok_or_else(|| CollectError::Parse(format!("Failed to find \"{}\" node", key)))
    }

    /// Extracts `properties.forecastHourly` from a `/points` response.
    pub fn parse_points(body: &str) -> Result<String, CollectError> {
        let json = parse(body, "properties")?;
        let props = node(&json, "properties")?;
        node(props, "forecastHourly")?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CollectError::Parse("\"forecastHourly\" is not a string".into()))
    }

    /// Formats `properties.periods[0]` of a forecast response.
    pub fn parse_forecast(body: &str) -> Result<String, CollectError> {
        let json = parse(body, "forecast")?;
        let periods = node(node(&json, "properties")?, "periods")?;
        let period = periods
            .get(0)
            .ok_or_else(|| CollectError::Parse("Forecast has no periods".into()))?;

        let temperature = match node(period, "temperature")? {
            Value::Number(n) => n.to_string(),
            // Some gridpoints report a quantitative value object instead.
            Value::Object(q) => q
                .get("value")
                .and_then(Value::as_f64)
                .map(|v| format!("{}", v.round() as i64))
                .ok_or_else(|| CollectError::Parse("Temperature has no value".into()))?,
            other => return Err(CollectError::Parse(format!("Unexpected temperature {}", other))),
        };
        let unit = period
            .get("temperatureUnit")
            .and_then(Value::as_str)
            .unwrap_or("F");
        let short = period
            .get("shortForecast")
            .and_then(Value::as_str)
            .unwrap_or("");

        Ok(format!("{}°{} {}", temperature, unit, short).trim_end().to_string())
    }
}

#[cfg(not(feature = "weather"))]
mod json {
    use crate::collector::CollectError;

    pub fn parse_points(_body: &str) -> Result<String, CollectError> {
        Err(super::not_built())
    }

    pub fn parse_forecast(_body: &str) -> Result<String, CollectError> {
        Err(super::not_built())
    }
}

pub use json::{parse_forecast, parse_points};

pub struct WeatherCollector<H: HttpFetch> {
    http: H,
    latitude: f64,
    longitude: f64,
    forecast_url: Option<String>,
}

impl<H: HttpFetch> WeatherCollector<H> {
    pub fn new(http: H, latitude: f64, longitude: f64) -> Self {
        Self {
            http,
            latitude,
            longitude,
            forecast_url: None,
        }
    }
}

impl<H: HttpFetch> Collector for WeatherCollector<H> {
    fn setup(&mut self) -> Result<(), CollectError> {
        let body = self.http.fetch(&points_url(self.latitude, self.longitude))?;
        let url = parse_points(&body)?;
        tracing::debug!(url = %url, "weather forecast endpoint resolved");
        self.forecast_url = Some(url);
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let url = self
            .forecast_url
            .as_deref()
            .ok_or_else(|| CollectError::NotFound("Forecast URL not resolved".into()))?;
        let body = self.http.fetch(url)?;
        Ok(Reading::new(parse_forecast(&body)?, Severity::Normal))
    }
}
