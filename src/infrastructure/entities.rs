//! Site entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hours {
    pub weekdays: String,
    pub saturday: String,
    pub sunday: String,
}

impl Hours {
    pub fn fields(&self) -> [&str; 3] {
        [&self.weekdays, &self.saturday, &self.sunday]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: String,
    pub city_state_zip: String,
    pub phone: String,
    pub map_url: String,
    pub schedule_url: String,
    pub coordinates: Coordinate,
    pub features: Vec<String>,
    pub hours: Hours,
}

impl Location {
    /// `tel:` link for the phone number, digits only.
    pub fn tel_href(&self) -> String {
        tel_href(&self.phone)
    }
}

pub fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("tel:{digits}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewSource {
    #[serde(rename = "Google Maps")]
    GoogleMaps,
    Facebook,
    Yelp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub name: String,
    pub rating: u8,
    pub text: String,
    pub location: String,
    pub source: ReviewSource,
}

impl Review {
    pub const MAX_RATING: u8 = 5;

    /// One flag per star slot, `true` for filled.
    pub fn stars(&self) -> [bool; Self::MAX_RATING as usize] {
        std::array::from_fn(|i| i < self.rating as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    fn new(text: impl Into<String>, is_bot: bool) -> Self {
        ChatMessage {
            id: Uuid::new_v4(),
            text: text.into(),
            is_bot,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: 1,
            name: "Kay Porter".to_string(),
            rating,
            text: "Fast".to_string(),
            location: "Gilmer Location".to_string(),
            source: ReviewSource::GoogleMaps,
        }
    }

    #[test]
    fn test_tel_href_strips_non_digits() {
        assert_eq!(tel_href("(903) 843-4494"), "tel:9038434494");
        assert_eq!(tel_href("903.704.0269"), "tel:9037040269");
    }

    #[test]
    fn test_stars_fill_up_to_rating() {
        assert_eq!(review(3).stars(), [true, true, true, false, false]);
        assert_eq!(review(5).stars(), [true; 5]);
    }

    #[test]
    fn test_review_source_uses_display_names() {
        let json = serde_json::to_string(&ReviewSource::GoogleMaps).unwrap();
        assert_eq!(json, "\"Google Maps\"");

        let source: ReviewSource = serde_json::from_str("\"Yelp\"").unwrap();
        assert_eq!(source, ReviewSource::Yelp);
    }

    #[test]
    fn test_chat_message_constructors_set_author() {
        let user = ChatMessage::user("hello");
        let bot = ChatMessage::bot("hi");

        assert!(!user.is_bot);
        assert!(bot.is_bot);
        assert_ne!(user.id, bot.id);
    }
}
