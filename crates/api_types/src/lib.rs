//! Wire types shared between the HTTP server, its clients and the
//! external-service connectors.

use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Signup {
        pub username: String,
        pub password: String,
        pub name: Option<String>,
        pub email: Option<String>,
    }
}

pub mod trip {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripNew {
        pub destination: String,
        pub start_date: String,
        pub end_date: String,
        pub budget: i64,
        pub max_travelers: i32,
        pub interests: Vec<String>,
        pub description: String,
        pub image_url: Option<String>,
    }

    /// Query string for the trip listing.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TripListQuery {
        pub status: Option<String>,
        pub limit: Option<u64>,
    }

    /// Query string for trip search. `interests` is a comma-separated list.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TripSearchQuery {
        pub destination: Option<String>,
        pub max_budget: Option<i64>,
        pub interests: Option<String>,
    }
}

pub mod request {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequestNew {
        pub trip_id: String,
        pub message: Option<String>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Decision {
        Accepted,
        Rejected,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequestRespond {
        pub response: Decision,
    }
}

pub mod message {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MessageNew {
        pub content: String,
    }
}

pub mod budget {
    use super::*;

    /// One planned amount per spending category.
    #[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
    pub struct CategoryAmounts {
        pub travel: i64,
        pub food: i64,
        pub stay: i64,
        pub activities: i64,
        pub misc: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub trip_id: String,
        pub categories: CategoryAmounts,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub category: String,
        pub amount: i64,
        pub description: String,
        pub date: String,
    }
}

pub mod profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileUpsert {
        pub name: String,
        pub bio: Option<String>,
        pub interests: Vec<String>,
        pub avatar: Option<String>,
    }
}

pub mod place {
    use super::*;

    /// A catalog row as imported from the curated CSV dataset. Every
    /// descriptive column is optional.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PlaceNew {
        pub state: String,
        pub state_code: String,
        pub place_name: String,
        pub category: String,
        pub description: Option<String>,
        pub timings: Option<String>,
        pub entry_fee: Option<String>,
        pub best_time: Option<String>,
        pub nearest_railway: Option<String>,
        pub nearest_bus: Option<String>,
        pub nearest_airport: Option<String>,
        pub metro_station: Option<String>,
        pub accessibility: Option<String>,
        pub guided_tours: Option<String>,
        pub parking: Option<String>,
        pub nearby_amenities: Option<String>,
        pub official_website: Option<String>,
        pub wikipedia: Option<String>,
        pub special_notes: Option<String>,
        pub image_url: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PlaceSearchQuery {
        pub q: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PlaceBudgetQuery {
        pub min_budget: Option<i64>,
        pub max_budget: Option<i64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct FeaturedQuery {
        pub limit: Option<u64>,
    }
}

pub mod itinerary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItineraryRequest {
        pub destination: String,
        pub start_date: String,
        pub end_date: String,
        pub budget: i64,
        pub travelers: u32,
        pub interests: Vec<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ItineraryDay {
        pub day: u32,
        pub title: String,
        pub activities: Vec<String>,
        pub estimated_cost: i64,
        pub tips: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Itinerary {
        pub days: Vec<ItineraryDay>,
        pub total_estimated_cost: i64,
        pub general_tips: Vec<String>,
    }
}

pub mod assist {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatRequest {
        pub message: String,
        pub context: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        pub reply: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DestinationQuery {
        pub destination: String,
    }
}

pub mod destination {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetEstimate {
        pub budget: i64,
        pub mid_range: i64,
        pub luxury: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DestinationInfo {
        pub best_time: String,
        pub attractions: Vec<String>,
        pub budget_estimate: BudgetEstimate,
        pub cuisine: Vec<String>,
        pub transportation: String,
    }
}

pub mod photo {
    use super::*;

    /// A photo in the shape clients render, whichever provider supplied it.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PhotoView {
        pub id: String,
        pub url: String,
        pub thumb_url: String,
        pub alt: String,
        pub photographer: String,
        pub photographer_url: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PlacePhotoQuery {
        pub name: String,
        pub count: Option<u8>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DestinationPhotoQuery {
        pub destination: String,
        pub category: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TravelPhotoQuery {
        pub count: Option<u8>,
    }
}

pub mod weather {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WeatherReading {
        pub location: String,
        pub temperature: i32,
        pub condition: String,
        pub description: String,
        pub humidity: u32,
        pub wind_speed: u32,
        pub pressure: u32,
        pub visibility: u32,
        pub uv_index: u32,
        pub icon: String,
        pub timestamp: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WeatherQuery {
        pub location: String,
    }
}
