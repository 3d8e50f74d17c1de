use super::{client::ApiClient, types::ApiError};
use serde::Deserialize;

pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const UNKNOWN_LOCATION: &str = "Unknown location";

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    display_name: Option<String>,
}

impl ApiClient {
    /// Client for the public reverse geocoder. Carries no bearer token.
    pub fn geocoder() -> Self {
        Self::new_with_base_url(NOMINATIM_BASE_URL)
    }

    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<String, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/reverse", base_url))
                    .query(&[
                        ("format", "json".to_string()),
                        ("lat", lat.to_string()),
                        ("lon", lng.to_string()),
                    ]),
            )
            .await?;
        let body: ReverseGeocodeResponse = self.map_json_response(response).await?;
        Ok(body
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()))
    }

    /// Address for a fix; lookup failures degrade to [`UNKNOWN_LOCATION`].
    pub async fn address_for(&self, lat: f64, lng: f64) -> String {
        match self.reverse_geocode(lat, lng).await {
            Ok(address) => address,
            Err(err) => {
                log::warn!("Reverse geocoding failed: {}", err);
                UNKNOWN_LOCATION.to_string()
            }
        }
    }
}
