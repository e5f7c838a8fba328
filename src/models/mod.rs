// Model exports
pub mod enums;
pub mod requests;
pub mod responses;

pub use enums::{
    GeoDbInstanceType, GeoDbSort, IncludeDeletedMode, LocationRadiusUnit, PlaceRequestType, SortDirection,
    SortProperty, UnknownTag,
};
pub use requests::{
    FindCitiesRequest, FindCountriesRequest, FindCurrenciesRequest, FindPlacesNearLocationRequest,
    FindRegionCitiesRequest, FindRegionsRequest, NearLocationRequest,
};
pub use responses::{
    CitiesResponse, CitySummary, CountriesResponse, CountrySummary, CurrenciesResponse, CurrencyDescriptor,
    Envelope, ErrorDescriptor, Link, RegionSummary, RegionsResponse, ResponseMetadata,
};
