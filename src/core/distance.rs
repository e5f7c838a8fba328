use geo::{HaversineDistance, Point};

/// Kilometers per degree of latitude, rounded down so boxes err on the large side
const KM_PER_DEGREE: f64 = 111.0;

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Render a coordinate pair in ISO-6709 form, e.g. `+33.831965-118.376601`
///
/// This is the format GeoDB expects in the `location` query parameter.
pub fn to_iso6709(latitude: f64, longitude: f64) -> String {
    format!("{:+}{:+}", latitude, longitude)
}

/// Great-circle distance between two points in meters
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // geo points are (x = longitude, y = latitude)
    Point::new(lon1, lat1).haversine_distance(&Point::new(lon2, lat2))
}

/// Calculate a bounding box around a center point
///
/// Cheaper than Haversine for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lon_delta = radius_km / (KM_PER_DEGREE * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}
