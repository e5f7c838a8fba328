use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Error entry reported by the API inside a response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default)]
    pub current_offset: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Navigation link (`first`, `next`, `prev`, `last`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Response envelope shared by every GeoDB list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_empty",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub data: Vec<T>,
    #[serde(default)]
    pub errors: Option<Vec<ErrorDescriptor>>,
    #[serde(default)]
    pub metadata: Option<ResponseMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

/// Error responses may carry `"data": null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.errors.is_none()
    }

    /// The data, unless the API reported errors alongside it
    pub fn usable_data(&self) -> Option<&[T]> {
        if self.is_success() {
            Some(&self.data)
        } else {
            None
        }
    }

    /// Total number of matches across all pages
    ///
    /// Only `metadata.totalCount` is authoritative; the length of `data` is one page.
    pub fn total_count(&self) -> Option<u64> {
        self.metadata.and_then(|m| m.total_count)
    }

    pub fn current_offset(&self) -> Option<u64> {
        self.metadata.and_then(|m| m.current_offset)
    }

    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links
            .as_deref()?
            .iter()
            .find(|l| l.rel == rel)
            .map(|l| l.href.as_str())
    }
}

/// City or other populated place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub wiki_data_id: Option<String>,
    #[serde(rename = "type", default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub population: Option<u64>,
    /// Distance from the search location, in the request's unit
    #[serde(default)]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency_codes: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub wiki_data_id: Option<String>,
}

impl CountrySummary {
    /// Primary currency, whichever form the API used
    pub fn primary_currency(&self) -> Option<&str> {
        self.currency_code
            .as_deref()
            .or_else(|| self.currency_codes.first().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDescriptor {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub country_codes: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub fips_code: Option<String>,
    #[serde(default)]
    pub iso_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub wiki_data_id: Option<String>,
}

pub type CitiesResponse = Envelope<CitySummary>;
pub type CountriesResponse = Envelope<CountrySummary>;
pub type CurrenciesResponse = Envelope<CurrencyDescriptor>;
pub type RegionsResponse = Envelope<RegionSummary>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_count_comes_from_metadata() {
        let json = r#"{
            "data": [{"id": 3350606, "city": "Hawthorne", "countryCode": "US"}],
            "metadata": {"currentOffset": 0, "totalCount": 42},
            "links": [{"rel": "next", "href": "/v1/geo/cities?offset=1"}]
        }"#;
        let response: CitiesResponse = serde_json::from_str(json).unwrap();

        assert!(response.is_success());
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.total_count(), Some(42));
        assert_eq!(response.current_offset(), Some(0));
        assert_eq!(response.link("next"), Some("/v1/geo/cities?offset=1"));
        assert_eq!(response.link("prev"), None);
    }

    #[test]
    fn test_missing_metadata_has_no_total() {
        let response: RegionsResponse =
            serde_json::from_str(r#"{"data": [{"countryCode": "US", "name": "California"}]}"#).unwrap();
        assert_eq!(response.total_count(), None);
    }

    #[test]
    fn test_errors_make_data_unusable() {
        let json = r#"{
            "data": [],
            "errors": [{"code": "ENTITY_NOT_FOUND", "message": "Country not found"}]
        }"#;
        let response: CountriesResponse = serde_json::from_str(json).unwrap();

        assert!(!response.is_success());
        assert!(response.usable_data().is_none());
        assert_eq!(
            response.errors.as_ref().unwrap()[0].code.as_deref(),
            Some("ENTITY_NOT_FOUND")
        );
    }

    #[test]
    fn test_null_data_with_errors() {
        let json = r#"{
            "data": null,
            "errors": [{"code": "ENTITY_NOT_FOUND", "message": "Region not found"}]
        }"#;
        let response: RegionsResponse = serde_json::from_str(json).unwrap();

        assert!(!response.is_success());
        assert!(response.data.is_empty());
        assert!(response.usable_data().is_none());
    }

    #[test]
    fn test_metadata_without_total_count() {
        let json = r#"{"data": [{"code": "US"}], "metadata": {"currentOffset": 10}}"#;
        let response: CountriesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.current_offset(), Some(10));
        assert_eq!(response.total_count(), None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"data": [{"code": "USD", "symbol": "$", "countryCodes": ["US", "EC"], "extra": 1}]}"#;
        let response: CurrenciesResponse = serde_json::from_str(json).unwrap();

        let usd = &response.usable_data().unwrap()[0];
        assert_eq!(usd.code.as_deref(), Some("USD"));
        assert!(usd.country_codes.contains("EC"));
    }

    #[test]
    fn test_primary_currency() {
        let country: CountrySummary =
            serde_json::from_str(r#"{"code": "US", "currencyCodes": ["USD"], "name": "United States"}"#).unwrap();
        assert_eq!(country.primary_currency(), Some("USD"));
    }
}
