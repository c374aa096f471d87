//! Google Places (New) nearby search as the candidate source

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared::{process_debug, BusinessCandidate, ProcessId};

use super::http::{endpoint, ensure_success, read_json};
use crate::error::OrchestratorResult;
use crate::traits::CandidateSource;

pub const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
const FIELD_MASK: &str =
    "places.displayName,places.shortFormattedAddress,places.formattedAddress,places.rating,places.userRatingCount";
const COLLABORATOR: &str = "google-places";

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Place {
    display_name: Option<LocalizedText>,
    short_formatted_address: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    user_rating_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

impl Place {
    fn into_candidate(self) -> Option<BusinessCandidate> {
        let name = self.display_name?.text;
        if name.trim().is_empty() {
            return None;
        }
        let location = self.short_formatted_address.or(self.formatted_address).unwrap_or_default();
        Some(BusinessCandidate::new(
            name.trim(),
            location,
            self.rating.unwrap_or(0.0),
            self.user_rating_count.unwrap_or(0),
        ))
    }
}

/// Nearby food and drink businesses from the Places API
pub struct GooglePlacesSource {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    radius_meters: f64,
    max_results: u32,
    included_types: Vec<String>,
}

impl GooglePlacesSource {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: PLACES_BASE_URL.to_string(),
            radius_meters: 1500.0,
            max_results: 20,
            included_types: ["restaurant", "cafe", "bakery"].iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }
}

#[async_trait]
impl CandidateSource for GooglePlacesSource {
    async fn discover(&self, lat: f64, lng: f64) -> OrchestratorResult<Vec<BusinessCandidate>> {
        let body = json!({
            "includedTypes": self.included_types,
            "maxResultCount": self.max_results,
            "locationRestriction": {
                "circle": {
                    "center": {"latitude": lat, "longitude": lng},
                    "radius": self.radius_meters,
                }
            }
        });

        let sent = self
            .client
            .post(endpoint(&self.base_url, "places:searchNearby"))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await;
        let response = ensure_success(COLLABORATOR, sent).await?;
        let nearby: NearbyResponse = read_json(COLLABORATOR, response).await?;

        let candidates: Vec<BusinessCandidate> = nearby.places.into_iter().filter_map(Place::into_candidate).collect();
        process_debug!(ProcessId::current(), count = candidates.len(), lat, lng, "Fetched nearby places");
        Ok(candidates)
    }
}
