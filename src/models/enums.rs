use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a wire tag does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} tag: {tag}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub tag: String,
}

/// Implements `Display` and `FromStr` on top of an `as_str` mapping table
macro_rules! wire_tags {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownTag { kind: $kind, tag: s.to_string() })
            }
        }
    };
}

/// Whether deleted records are returned, and how far back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeDeletedMode {
    All,
    None,
    SinceLastWeek,
    SinceYesterday,
}

impl IncludeDeletedMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            IncludeDeletedMode::All => "all",
            IncludeDeletedMode::None => "none",
            IncludeDeletedMode::SinceLastWeek => "since_last_week",
            IncludeDeletedMode::SinceYesterday => "since_yesterday",
        }
    }
}

wire_tags!(IncludeDeletedMode, "include-deleted mode", [All, None, SinceLastWeek, SinceYesterday]);

/// GeoDB deployment to talk to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoDbInstanceType {
    #[default]
    Free,
    Pro,
}

impl GeoDbInstanceType {
    /// Base URI of the instance
    pub const fn as_str(self) -> &'static str {
        match self {
            GeoDbInstanceType::Free => "http://geodb-free-service.wirefreethought.com",
            GeoDbInstanceType::Pro => "https://wft-geo-db.p.mashape.com",
        }
    }

    pub const fn instance_uri(self) -> &'static str {
        self.as_str()
    }
}

wire_tags!(GeoDbInstanceType, "instance", [Free, Pro]);

/// Unit of a location search radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationRadiusUnit {
    Miles,
    Kilometers,
}

impl LocationRadiusUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            LocationRadiusUnit::Miles => "MI",
            LocationRadiusUnit::Kilometers => "KM",
        }
    }

    pub const fn meters(self) -> f64 {
        match self {
            LocationRadiusUnit::Miles => 1609.344,
            LocationRadiusUnit::Kilometers => 1000.0,
        }
    }

    /// Convert a distance in meters into this unit
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters()
    }
}

wire_tags!(LocationRadiusUnit, "radius unit", [Miles, Kilometers]);

/// Kind of place a search should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaceRequestType {
    City,
    Adm2,
}

impl PlaceRequestType {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlaceRequestType::City => "CITY",
            PlaceRequestType::Adm2 => "ADM2",
        }
    }
}

wire_tags!(PlaceRequestType, "place type", [City, Adm2]);

/// Field a result set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortProperty {
    CountryCode,
    Elevation,
    Name,
    Population,
}

impl SortProperty {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortProperty::CountryCode => "countryCode",
            SortProperty::Elevation => "elevation",
            SortProperty::Name => "name",
            SortProperty::Population => "population",
        }
    }
}

wire_tags!(SortProperty, "sort property", [CountryCode, Elevation, Name, Population]);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "+",
            SortDirection::Descending => "-",
        }
    }
}

wire_tags!(SortDirection, "sort direction", [Ascending, Descending]);

/// Ordered sort specification, e.g. `-population,+name`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoDbSort {
    fields: Vec<(SortProperty, SortDirection)>,
}

impl GeoDbSort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(property: SortProperty, direction: SortDirection) -> Self {
        Self::new().then_by(property, direction)
    }

    pub fn then_by(mut self, property: SortProperty, direction: SortDirection) -> Self {
        self.fields.push((property, direction));
        self
    }

    pub fn fields(&self) -> &[(SortProperty, SortDirection)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_wire(&self) -> String {
        self.fields
            .iter()
            .map(|(property, direction)| format!("{}{}", direction.as_str(), property.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for GeoDbSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl FromStr for GeoDbSort {
    type Err = UnknownTag;

    /// Parses `-population,name`; a missing prefix means ascending
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sort = GeoDbSort::new();
        for field in s.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let (direction, name) = if let Some(rest) = field.strip_prefix('-') {
                (SortDirection::Descending, rest)
            } else {
                (SortDirection::Ascending, field.strip_prefix('+').unwrap_or(field))
            };
            sort = sort.then_by(name.parse()?, direction);
        }
        Ok(sort)
    }
}
