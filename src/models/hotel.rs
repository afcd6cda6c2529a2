//! Hotel search results

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::place::{PlaceLocation, Photo};
use crate::viewport::GeoPoint;

/// A hotel returned by the hotel-search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub location: Option<PlaceLocation>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub estimated_price: Option<HotelPrice>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Nightly price; the service sends either a number or preformatted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HotelPrice {
    Amount(f64),
    Text(String),
}

impl fmt::Display for HotelPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HotelPrice::Amount(amount) => write!(f, "{amount}"),
            HotelPrice::Text(text) => f.write_str(text),
        }
    }
}

impl HotelPrice {
    /// Numeric value of the price; text counts when it is a plain number
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        let amount = match self {
            HotelPrice::Amount(amount) => Some(*amount),
            HotelPrice::Text(text) => text.trim().parse::<f64>().ok(),
        };
        amount.filter(|amount| amount.is_finite())
    }
}

/// Cheapest first. Prices that are not a number come after every amount,
/// and hotels without a price come last.
#[must_use]
pub fn compare_by_price(a: &Hotel, b: &Hotel) -> Ordering {
    fn rank(hotel: &Hotel) -> (u8, f64) {
        match &hotel.estimated_price {
            Some(price) => price.amount().map_or((1, 0.0), |amount| (0, amount)),
            None => (2, 0.0),
        }
    }
    let (a_rank, a_amount) = rank(a);
    let (b_rank, b_amount) = rank(b);
    a_rank
        .cmp(&b_rank)
        .then_with(|| a_amount.total_cmp(&b_amount))
}

/// Sort hotels cheapest first; ties keep their service order
pub fn sort_by_price(hotels: &mut [Hotel]) {
    hotels.sort_by(compare_by_price);
}

impl Hotel {
    /// Map position of the hotel, if it has valid coordinates
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        self.location.as_ref().and_then(PlaceLocation::point)
    }

    /// "★ 4.5", or "★ N/A" when unrated
    #[must_use]
    pub fn format_rating(&self) -> String {
        match self.rating {
            Some(rating) => format!("★ {rating:.1}"),
            None => "★ N/A".to_string(),
        }
    }

    /// "From $120/night"
    #[must_use]
    pub fn format_price(&self) -> Option<String> {
        self.estimated_price
            .as_ref()
            .map(|price| format!("From ${price}/night"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn priced(name: &str, price: serde_json::Value) -> Hotel {
        serde_json::from_value(json!({"displayName": name, "estimatedPrice": price})).unwrap()
    }

    fn names(hotels: &[Hotel]) -> Vec<&str> {
        hotels
            .iter()
            .map(|hotel| hotel.display_name.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_hotel_from_service_json() {
        let json = r#"{
            "id": "h1",
            "displayName": "Hotel Alpina",
            "location": {"latitude": 46.68, "longitude": 7.86},
            "rating": 4.4,
            "formattedAddress": "Interlaken",
            "estimatedPrice": 180,
            "photos": [{"secure_url": "https://img.example/h1.jpg"}]
        }"#;
        let hotel: Hotel = serde_json::from_str(json).unwrap();
        assert_eq!(hotel.point(), Some(GeoPoint::new(46.68, 7.86)));
        assert_eq!(hotel.format_rating(), "★ 4.4");
        assert_eq!(hotel.format_price().as_deref(), Some("From $180/night"));
    }

    #[test]
    fn test_hotel_with_sparse_fields() {
        let hotel: Hotel =
            serde_json::from_str(r#"{"displayName": "Nowhere Inn", "estimatedPrice": "95-120"}"#)
                .unwrap();
        assert_eq!(hotel.point(), None);
        assert_eq!(hotel.format_rating(), "★ N/A");
        assert_eq!(hotel.format_price().as_deref(), Some("From $95-120/night"));
        assert!(hotel.photos.is_empty());
    }

    #[test]
    fn test_fractional_price_is_not_rounded() {
        let hotel = priced("Pensione", json!(179.99));
        assert_eq!(hotel.format_price().as_deref(), Some("From $179.99/night"));
    }

    #[rstest]
    #[case(json!(180), Some(180.0))]
    #[case(json!(" 95.5 "), Some(95.5))]
    #[case(json!("95-120"), None)]
    #[case(json!("NaN"), None)]
    fn test_price_amount(#[case] price: serde_json::Value, #[case] expected: Option<f64>) {
        let hotel = priced("Any", price);
        assert_eq!(hotel.estimated_price.unwrap().amount(), expected);
    }

    #[rstest]
    #[case(
        vec![("a", json!(300)), ("b", json!(120)), ("c", json!(210.5))],
        vec!["b", "c", "a"]
    )]
    #[case(
        vec![
            ("text", json!("ask at desk")),
            ("cheap", json!(80)),
            ("none", json!(null)),
            ("mid", json!("150")),
        ],
        vec!["cheap", "mid", "text", "none"]
    )]
    #[case(
        vec![
            ("none", json!(null)),
            ("range", json!("95-120")),
            ("other", json!("call")),
            ("pricey", json!(400)),
        ],
        vec!["pricey", "range", "other", "none"]
    )]
    fn test_sort_by_price(
        #[case] hotels: Vec<(&str, serde_json::Value)>,
        #[case] expected: Vec<&str>,
    ) {
        let mut hotels: Vec<Hotel> = hotels
            .into_iter()
            .map(|(name, price)| priced(name, price))
            .collect();
        sort_by_price(&mut hotels);
        assert_eq!(names(&hotels), expected);
    }
}
