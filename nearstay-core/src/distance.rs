/// Length of one degree of latitude (and, in this approximation, longitude).
pub const KM_PER_DEGREE: f64 = 111.0;

/// Planar proximity check on (lat, lon) pairs at [`KM_PER_DEGREE`].
///
/// Not geodesic: the error grows with latitude and radius.
pub fn within_radius(hotel: (f64, f64), airport: (f64, f64), within_km: f64) -> bool {
    let dlat = hotel.0 - airport.0;
    let dlon = hotel.1 - airport.1;
    let max_degrees = within_km / KM_PER_DEGREE;
    dlat * dlat + dlon * dlon <= max_degrees * max_degrees
}
