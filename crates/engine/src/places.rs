//! Tourist-place catalog imported from the curated CSV dataset.
//!
//! Every descriptive column is optional: the source data is patchy and rows
//! are stored as-is. Entry fees are free-form strings ("₹500", "Free") and
//! only parsed opportunistically for budget filtering.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
}

/// Arguments for adding a catalog row. The engine assigns the id and
/// timestamp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPlace {
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

/// How many catalog rows fall into a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// How many catalog rows a state holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePlaceCount {
    pub name: String,
    pub code: String,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
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
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Place> for ActiveModel {
    fn from(place: &Place) -> Self {
        Self {
            id: ActiveValue::Set(place.id.to_string()),
            state: ActiveValue::Set(place.state.clone()),
            state_code: ActiveValue::Set(place.state_code.clone()),
            place_name: ActiveValue::Set(place.place_name.clone()),
            category: ActiveValue::Set(place.category.clone()),
            description: ActiveValue::Set(place.description.clone()),
            timings: ActiveValue::Set(place.timings.clone()),
            entry_fee: ActiveValue::Set(place.entry_fee.clone()),
            best_time: ActiveValue::Set(place.best_time.clone()),
            nearest_railway: ActiveValue::Set(place.nearest_railway.clone()),
            nearest_bus: ActiveValue::Set(place.nearest_bus.clone()),
            nearest_airport: ActiveValue::Set(place.nearest_airport.clone()),
            metro_station: ActiveValue::Set(place.metro_station.clone()),
            accessibility: ActiveValue::Set(place.accessibility.clone()),
            guided_tours: ActiveValue::Set(place.guided_tours.clone()),
            parking: ActiveValue::Set(place.parking.clone()),
            nearby_amenities: ActiveValue::Set(place.nearby_amenities.clone()),
            official_website: ActiveValue::Set(place.official_website.clone()),
            wikipedia: ActiveValue::Set(place.wikipedia.clone()),
            special_notes: ActiveValue::Set(place.special_notes.clone()),
            image_url: ActiveValue::Set(place.image_url.clone()),
            created_at: ActiveValue::Set(place.created_at),
        }
    }
}

impl TryFrom<Model> for Place {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("place not exists".to_string()))?,
            state: model.state,
            state_code: model.state_code,
            place_name: model.place_name,
            category: model.category,
            description: model.description,
            timings: model.timings,
            entry_fee: model.entry_fee,
            best_time: model.best_time,
            nearest_railway: model.nearest_railway,
            nearest_bus: model.nearest_bus,
            nearest_airport: model.nearest_airport,
            metro_station: model.metro_station,
            accessibility: model.accessibility,
            guided_tours: model.guided_tours,
            parking: model.parking,
            nearby_amenities: model.nearby_amenities,
            official_website: model.official_website,
            wikipedia: model.wikipedia,
            special_notes: model.special_notes,
            image_url: model.image_url,
            created_at: model.created_at,
        })
    }
}
