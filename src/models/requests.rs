use crate::core::distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box, to_iso6709};
use crate::core::query::{ApiCall, CollectionFormat};
use crate::models::enums::{GeoDbSort, IncludeDeletedMode, LocationRadiusUnit, PlaceRequestType};
use std::collections::BTreeSet;

/// Location constraint: everything within `radius` of a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub radius_unit: Option<LocationRadiusUnit>,
}

impl NearLocationRequest {
    pub fn new(latitude: f64, longitude: f64, radius: u32, radius_unit: LocationRadiusUnit) -> Self {
        Self {
            latitude,
            longitude,
            radius,
            radius_unit: Some(radius_unit),
        }
    }

    /// ISO-6709 rendering of the center point
    pub fn location(&self) -> String {
        to_iso6709(self.latitude, self.longitude)
    }

    /// Unit the radius is measured in; GeoDB defaults to miles
    pub fn unit(&self) -> LocationRadiusUnit {
        self.radius_unit.unwrap_or(LocationRadiusUnit::Miles)
    }

    /// Distance from the center to a point, in this request's unit
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        let meters = haversine_distance(self.latitude, self.longitude, latitude, longitude);
        self.unit().from_meters(meters)
    }

    /// Whether a point falls inside the search circle
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let radius_km = f64::from(self.radius) * self.unit().meters() / 1000.0;
        let bbox = calculate_bounding_box(self.latitude, self.longitude, radius_km);
        is_within_bounding_box(latitude, longitude, &bbox)
            && self.distance_to(latitude, longitude) <= f64::from(self.radius)
    }

    fn apply(&self, call: ApiCall) -> ApiCall {
        call.param("location", Some(self.location()))
            .param("radius", Some(self.radius))
            .param("distanceUnit", self.radius_unit)
    }
}

/// `GET /v1/geo/cities`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindCitiesRequest {
    pub ascii_mode: Option<bool>,
    pub country_ids: BTreeSet<String>,
    pub excluded_country_ids: BTreeSet<String>,
    pub include_deleted: Option<IncludeDeletedMode>,
    pub language_code: Option<String>,
    pub limit: Option<u32>,
    pub min_population: Option<u64>,
    pub name_prefix: Option<String>,
    pub near_location: Option<NearLocationRequest>,
    pub offset: Option<u32>,
    pub sort: Option<GeoDbSort>,
    pub types: BTreeSet<PlaceRequestType>,
}

impl FindCitiesRequest {
    pub fn to_call(&self) -> ApiCall {
        let call = ApiCall::get("/v1/geo/cities")
            .param("asciiMode", self.ascii_mode)
            .param("includeDeleted", self.include_deleted)
            .param("languageCode", self.language_code.as_deref())
            .param("limit", self.limit)
            .param("minPopulation", self.min_population)
            .param("namePrefix", self.name_prefix.as_deref())
            .param("offset", self.offset)
            .param("sort", self.sort.as_ref().filter(|s| !s.is_empty()));

        let call = match &self.near_location {
            Some(near) => near.apply(call),
            None => call,
        };

        call.collection("countryIds", &self.country_ids, CollectionFormat::Csv)
            .collection("excludedCountryIds", &self.excluded_country_ids, CollectionFormat::Csv)
            .collection("types", &self.types, CollectionFormat::Csv)
    }
}

/// `GET /v1/geo/places` restricted to a circle around a point
#[derive(Debug, Clone, PartialEq)]
pub struct FindPlacesNearLocationRequest {
    pub ascii_mode: Option<bool>,
    pub country_ids: BTreeSet<String>,
    pub excluded_country_ids: BTreeSet<String>,
    pub include_deleted: Option<IncludeDeletedMode>,
    pub language_code: Option<String>,
    pub limit: Option<u32>,
    pub min_population: Option<u64>,
    pub near_location: NearLocationRequest,
    pub offset: Option<u32>,
    pub sort: Option<GeoDbSort>,
    pub types: BTreeSet<PlaceRequestType>,
}

impl FindPlacesNearLocationRequest {
    pub fn new(near_location: NearLocationRequest) -> Self {
        Self {
            ascii_mode: None,
            country_ids: BTreeSet::new(),
            excluded_country_ids: BTreeSet::new(),
            include_deleted: None,
            language_code: None,
            limit: None,
            min_population: None,
            near_location,
            offset: None,
            sort: None,
            types: BTreeSet::new(),
        }
    }

    pub fn to_call(&self) -> ApiCall {
        let call = ApiCall::get("/v1/geo/places")
            .param("asciiMode", self.ascii_mode)
            .param("includeDeleted", self.include_deleted)
            .param("languageCode", self.language_code.as_deref())
            .param("limit", self.limit)
            .param("minPopulation", self.min_population)
            .param("offset", self.offset)
            .param("sort", self.sort.as_ref().filter(|s| !s.is_empty()));

        self.near_location
            .apply(call)
            .collection("countryIds", &self.country_ids, CollectionFormat::Csv)
            .collection("excludedCountryIds", &self.excluded_country_ids, CollectionFormat::Csv)
            .collection("types", &self.types, CollectionFormat::Csv)
    }
}

/// `GET /v1/geo/countries/{countryId}/regions/{regionCode}/cities`
#[derive(Debug, Clone, PartialEq)]
pub struct FindRegionCitiesRequest {
    pub country_id: String,
    pub region_code: String,
    pub ascii_mode: Option<bool>,
    pub include_deleted: Option<IncludeDeletedMode>,
    pub language_code: Option<String>,
    pub limit: Option<u32>,
    pub min_population: Option<u64>,
    pub offset: Option<u32>,
    pub sort: Option<GeoDbSort>,
}

impl FindRegionCitiesRequest {
    pub fn new(country_id: impl Into<String>, region_code: impl Into<String>) -> Self {
        Self {
            country_id: country_id.into(),
            region_code: region_code.into(),
            ascii_mode: None,
            include_deleted: None,
            language_code: None,
            limit: None,
            min_population: None,
            offset: None,
            sort: None,
        }
    }

    pub fn to_call(&self) -> ApiCall {
        let path = format!(
            "/v1/geo/countries/{}/regions/{}/cities",
            urlencoding::encode(&self.country_id),
            urlencoding::encode(&self.region_code)
        );

        ApiCall::get(path)
            .param("asciiMode", self.ascii_mode)
            .param("includeDeleted", self.include_deleted)
            .param("languageCode", self.language_code.as_deref())
            .param("limit", self.limit)
            .param("minPopulation", self.min_population)
            .param("offset", self.offset)
            .param("sort", self.sort.as_ref().filter(|s| !s.is_empty()))
    }
}

/// `GET /v1/geo/countries/{countryCode}/regions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRegionsRequest {
    pub country_code: String,
    pub limit: Option<u32>,
    pub name_prefix: Option<String>,
    pub offset: Option<u32>,
}

impl FindRegionsRequest {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            limit: None,
            name_prefix: None,
            offset: None,
        }
    }

    pub fn to_call(&self) -> ApiCall {
        let path = format!("/v1/geo/countries/{}/regions", urlencoding::encode(&self.country_code));

        ApiCall::get(path)
            .param("limit", self.limit)
            .param("namePrefix", self.name_prefix.as_deref())
            .param("offset", self.offset)
    }
}

/// `GET /v1/geo/countries`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindCountriesRequest {
    pub ascii_mode: Option<bool>,
    pub currency_code: Option<String>,
    pub language_code: Option<String>,
    pub limit: Option<u32>,
    pub name_prefix: Option<String>,
    pub offset: Option<u32>,
}

impl FindCountriesRequest {
    pub fn to_call(&self) -> ApiCall {
        ApiCall::get("/v1/geo/countries")
            .param("asciiMode", self.ascii_mode)
            .param("currencyCode", self.currency_code.as_deref())
            .param("languageCode", self.language_code.as_deref())
            .param("limit", self.limit)
            .param("namePrefix", self.name_prefix.as_deref())
            .param("offset", self.offset)
    }
}

/// `GET /v1/locale/currencies`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindCurrenciesRequest {
    pub country_code: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl FindCurrenciesRequest {
    pub fn to_call(&self) -> ApiCall {
        ApiCall::get("/v1/locale/currencies")
            .param("countryId", self.country_code.as_deref())
            .param("limit", self.limit)
            .param("offset", self.offset)
    }
}
