// service/dedup.rs
//
// Duplicate detection fingerprints. Two listings are the same physical
// property when their address+spec tuple matches, when their coordinates
// collide, or when they share a photo content-hash. The tuples are folded
// into sha256 fingerprints stored alongside the listing so both the
// pre-insert check and the unique indexes work off a single column.

use num_traits::ToPrimitive;
use sha2::{Digest, Sha256};
use sqlx::types::BigDecimal;

use crate::models::listingmodel::{ListingStatus, PropertyType};

/// Fingerprint of the (address, type, area, land_area) dedup tuple.
/// Absent specs hash a fixed marker so nulls compare equal.
pub fn listing_fingerprint(
    address: &str,
    property_type: PropertyType,
    status: ListingStatus,
    area_sqm: Option<i32>,
    land_area_sqm: Option<i32>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(address.trim().to_lowercase().as_bytes());
    hasher.update(format!("{:?}", property_type).as_bytes());
    hasher.update(status.to_str().as_bytes());
    hasher.update(spec_component(area_sqm).as_bytes());
    hasher.update(spec_component(land_area_sqm).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fingerprint of the (latitude, longitude, type) tuple. Coordinates are
/// rounded to ~100m precision so near-identical pins collide. Hashes the
/// same (property_type, status) pair as the address fingerprint, so the
/// two tuples agree on what counts as the "same kind" of listing.
pub fn coordinates_fingerprint(
    latitude: &BigDecimal,
    longitude: &BigDecimal,
    property_type: PropertyType,
    status: ListingStatus,
) -> String {
    let lat = latitude.to_f64().unwrap_or(0.0);
    let lng = longitude.to_f64().unwrap_or(0.0);

    let rounded_lat = (lat * 1000.0).round() / 1000.0;
    let rounded_lng = (lng * 1000.0).round() / 1000.0;

    let mut hasher = Sha256::new();
    hasher.update(rounded_lat.to_string().as_bytes());
    hasher.update(rounded_lng.to_string().as_bytes());
    hasher.update(format!("{:?}", property_type).as_bytes());
    hasher.update(status.to_str().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn spec_component(value: Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn coord(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_same_tuple_same_fingerprint() {
        let a = listing_fingerprint("12 Palm Street", PropertyType::House, ListingStatus::Sale, Some(120), Some(200));
        let b = listing_fingerprint("  12 Palm Street ", PropertyType::House, ListingStatus::Sale, Some(120), Some(200));
        assert_eq!(a, b);
    }

    #[test]
    fn test_nulls_compare_equal() {
        let a = listing_fingerprint("12 Palm Street", PropertyType::Land, ListingStatus::Sale, None, None);
        let b = listing_fingerprint("12 Palm Street", PropertyType::Land, ListingStatus::Sale, None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_specs_differ() {
        let a = listing_fingerprint("12 Palm Street", PropertyType::House, ListingStatus::Sale, Some(120), None);
        let b = listing_fingerprint("12 Palm Street", PropertyType::House, ListingStatus::Sale, Some(150), None);
        assert_ne!(a, b);

        let sale = listing_fingerprint("12 Palm Street", PropertyType::House, ListingStatus::Sale, Some(120), None);
        let rent = listing_fingerprint("12 Palm Street", PropertyType::House, ListingStatus::Rent, Some(120), None);
        assert_ne!(sale, rent);
    }

    #[test]
    fn test_coordinate_collision_ignores_address() {
        // Different street names, same pin: the coordinate fingerprint is
        // what catches this pair.
        let a = coordinates_fingerprint(&coord("6.524400"), &coord("3.379200"), PropertyType::House, ListingStatus::Sale);
        let b = coordinates_fingerprint(&coord("6.524400"), &coord("3.379200"), PropertyType::House, ListingStatus::Sale);
        assert_eq!(a, b);
    }

    #[test]
    fn test_nearby_coordinates_collide() {
        // ~100m rounding: 6.5244 and 6.5241 round to the same cell
        let a = coordinates_fingerprint(&coord("6.52440"), &coord("3.37920"), PropertyType::House, ListingStatus::Sale);
        let b = coordinates_fingerprint(&coord("6.52441"), &coord("3.37921"), PropertyType::House, ListingStatus::Sale);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distant_coordinates_differ() {
        let a = coordinates_fingerprint(&coord("6.5244"), &coord("3.3792"), PropertyType::House, ListingStatus::Sale);
        let b = coordinates_fingerprint(&coord("6.6018"), &coord("3.3515"), PropertyType::House, ListingStatus::Sale);
        assert_ne!(a, b);
    }

    #[test]
    fn test_coordinate_tuple_tracks_property_kind() {
        // Both tuples key on the same (property_type, status) pair, so a
        // shop and a house at one pin are distinct listings.
        let house = coordinates_fingerprint(&coord("6.5244"), &coord("3.3792"), PropertyType::House, ListingStatus::Sale);
        let shop = coordinates_fingerprint(&coord("6.5244"), &coord("3.3792"), PropertyType::Shop, ListingStatus::Sale);
        let rent = coordinates_fingerprint(&coord("6.5244"), &coord("3.3792"), PropertyType::House, ListingStatus::Rent);
        assert_ne!(house, shop);
        assert_ne!(house, rent);
    }
}
