use serde::{Deserialize, Serialize};

use crate::format;

/// Image shown for events that ship without one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// ISO-8601 calendar date, e.g. `2025-03-15`.
    pub date: String,
    /// Display string, conventionally `"<start> - <end>"`.
    pub time: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "fullDescription")]
    pub full_description: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub organizer: String,
    pub price: String,
}

impl Event {
    pub fn image_or_placeholder(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }

    pub fn detail_path(&self) -> String {
        format!("/events/{}", self.id)
    }

    pub fn short_date(&self) -> String {
        format::short_date(&self.date)
    }

    pub fn long_date(&self) -> String {
        format::long_date(&self.date)
    }

    pub fn start_time(&self) -> &str {
        format::start_time(&self.time)
    }
}

/// A hero carousel slide. The list is fixed at compile time and has no
/// relation to the event dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub id: u32,
    pub image: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_text: &'static str,
    pub gradient: &'static str,
}

pub const DEFAULT_SLIDES: [Slide; 3] = [
    Slide {
        id: 1,
        image: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQQthofrT_DWAMeUMJg9HWUwARLjBP7BODjAQ&s",
        title: "DISCOVER YOUR",
        subtitle: "NEXT ADVENTURE",
        button_text: "Explore Events Now",
        gradient: "gradient-dusk",
    },
    Slide {
        id: 2,
        image: "https://internet2.edu/wp-content/uploads/2024/09/internet2-events-hero.jpg",
        title: "CREATE AMAZING",
        subtitle: "MEMORIES",
        button_text: "Find Your Event",
        gradient: "gradient-night",
    },
    Slide {
        id: 3,
        image: "https://foundryco.com/wp-content/uploads/2022/11/foundry-event-frontify-e1719433886312.jpeg?w=1200&h=787&crop=1",
        title: "CONNECT WITH",
        subtitle: "LIKE-MINDED PEOPLE",
        button_text: "Join Community",
        gradient: "gradient-lagoon",
    },
];
