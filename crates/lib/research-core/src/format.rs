//! Local-result formatting.
//!
//! Pure rendering of POI records plus their description side-table into a
//! single human-readable block. Field defaults follow the tool contract:
//! blank address components are omitted, absent values render as `N/A`, and
//! a missing description entry renders as `No description available`.

use std::collections::HashMap;

use crate::search::{Address, Place, Rating};

/// Renders place records and their descriptions as `---`-separated blocks.
///
/// Record order is preserved from the POI response. An empty place list
/// yields the literal `No local results found`; the gateway's web-search
/// fallback normally makes that unreachable, but it stays the terminal case.
#[must_use]
pub fn format_local_results(
    places: &[Place],
    descriptions: &HashMap<String, String>,
) -> String {
    if places.is_empty() {
        return "No local results found".to_string();
    }

    places
        .iter()
        .map(|place| render_place(place, descriptions))
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn render_place(place: &Place, descriptions: &HashMap<String, String>) -> String {
    let description = descriptions
        .get(&place.id)
        .map_or("No description available", String::as_str);

    format!(
        "Name: {}\nAddress: {}\nPhone: {}\nRating: {}\nPrice Range: {}\nHours: {}\nDescription: {description}\n",
        place.name,
        render_address(&place.address),
        place.phone.as_deref().unwrap_or("N/A"),
        render_rating(place.rating.as_ref()),
        place.price_range.as_deref().unwrap_or("N/A"),
        render_hours(&place.opening_hours),
    )
}

fn render_address(address: &Address) -> String {
    let parts: Vec<&str> = [
        address.street_address.as_deref(),
        address.address_locality.as_deref(),
        address.address_region.as_deref(),
        address.postal_code.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(", ")
    }
}

fn render_rating(rating: Option<&Rating>) -> String {
    let value = rating
        .and_then(|rating| rating.rating_value)
        .map_or_else(|| "N/A".to_string(), |value| value.to_string());
    let count = rating.and_then(|rating| rating.rating_count).unwrap_or(0);
    format!("{value} ({count} reviews)")
}

fn render_hours(hours: &[String]) -> String {
    let joined = hours.join(", ");
    if joined.is_empty() {
        "N/A".to_string()
    } else {
        joined
    }
}
