use crate::error::Result;
use crate::models::{
    CitiesResponse, CountriesResponse, CurrenciesResponse, FindCitiesRequest, FindCountriesRequest,
    FindCurrenciesRequest, FindPlacesNearLocationRequest, FindRegionCitiesRequest, FindRegionsRequest,
    RegionsResponse,
};
use crate::services::geodb_client::GeoDbApiClient;

/// GeoDB API facade
///
/// One method per endpoint. Each renders its request into a call, sends it
/// through the [`GeoDbApiClient`] and returns the typed envelope. Failures
/// surface as [`crate::ApiError`]; nothing is retried or cached.
///
/// Each method is one awaited request. Blocking callers can drive it with
/// `tokio::runtime::Runtime::block_on` or `tokio_test::block_on`.
#[derive(Debug, Clone)]
pub struct GeoDbApi {
    client: GeoDbApiClient,
}

impl GeoDbApi {
    pub fn new(client: GeoDbApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GeoDbApiClient {
        &self.client
    }

    /// Find cities, optionally filtered by name, country, population or location
    pub async fn find_cities(&self, request: &FindCitiesRequest) -> Result<CitiesResponse> {
        tracing::debug!("Finding cities: {:?}", request);
        self.client.invoke(request.to_call()).await
    }

    /// Find places within a radius of a point
    pub async fn find_places_near_location(
        &self,
        request: &FindPlacesNearLocationRequest,
    ) -> Result<CitiesResponse> {
        tracing::debug!("Finding places near {}", request.near_location.location());
        self.client.invoke(request.to_call()).await
    }

    pub async fn find_countries(&self, request: &FindCountriesRequest) -> Result<CountriesResponse> {
        tracing::debug!("Finding countries: {:?}", request);
        self.client.invoke(request.to_call()).await
    }

    pub async fn find_currencies(&self, request: &FindCurrenciesRequest) -> Result<CurrenciesResponse> {
        tracing::debug!("Finding currencies: {:?}", request);
        self.client.invoke(request.to_call()).await
    }

    /// Find the cities of one region of one country
    pub async fn find_region_cities(&self, request: &FindRegionCitiesRequest) -> Result<CitiesResponse> {
        tracing::debug!(
            "Finding cities in region {} of {}",
            request.region_code,
            request.country_id
        );
        self.client.invoke(request.to_call()).await
    }

    pub async fn find_regions(&self, request: &FindRegionsRequest) -> Result<RegionsResponse> {
        tracing::debug!("Finding regions of {}", request.country_code);
        self.client.invoke(request.to_call()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoDbInstanceType;

    #[test]
    fn test_api_creation() {
        let api = GeoDbApi::new(GeoDbApiClient::with_api_key(GeoDbInstanceType::Pro, "test_key").unwrap());
        assert_eq!(api.client().base_url(), "https://wft-geo-db.p.mashape.com");
    }

    #[test]
    fn test_unreachable_host_surfaces_api_error() {
        // Nothing listens on port 9; the connection is refused
        let api = GeoDbApi::new(GeoDbApiClient::with_base_url("http://127.0.0.1:9").unwrap());
        let err = tokio_test::block_on(api.find_countries(&FindCountriesRequest::default())).unwrap_err();

        assert_eq!(err.code(), None);
        assert_eq!(err.response_body(), None);
    }
}
