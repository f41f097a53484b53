//! The tourist-place catalog and the state map.
//!
//! Catalog queries are public and several of them scan the whole table;
//! the dataset is a few thousand curated rows, small enough that full
//! scans stay cheap.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CategoryCount, NewPlace, Place, ResultEngine, StatePlaceCount, places, states,
    states::State,
};

use super::{Engine, with_tx};

const FEATURED_LIMIT: u64 = 12;
const POPULAR_CATEGORIES_LIMIT: usize = 10;

impl Engine {
    /// Add a catalog row.
    pub async fn create_place(&self, args: NewPlace) -> ResultEngine<Place> {
        let place = Place {
            id: Uuid::new_v4(),
            state: args.state,
            state_code: args.state_code,
            place_name: args.place_name,
            category: args.category,
            description: args.description,
            timings: args.timings,
            entry_fee: args.entry_fee,
            best_time: args.best_time,
            nearest_railway: args.nearest_railway,
            nearest_bus: args.nearest_bus,
            nearest_airport: args.nearest_airport,
            metro_station: args.metro_station,
            accessibility: args.accessibility,
            guided_tours: args.guided_tours,
            parking: args.parking,
            nearby_amenities: args.nearby_amenities,
            official_website: args.official_website,
            wikipedia: args.wikipedia,
            special_notes: args.special_notes,
            image_url: args.image_url,
            created_at: Utc::now(),
        };
        let entry: places::ActiveModel = (&place).into();
        with_tx!(self, |db_tx| {
            entry.insert(&db_tx).await?;
            Ok(place)
        })
    }

    pub async fn places_by_state(&self, state_code: &str) -> ResultEngine<Vec<Place>> {
        with_tx!(self, |db_tx| {
            places::Entity::find()
                .filter(places::Column::StateCode.eq(state_code.to_string()))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Place::try_from)
                .collect()
        })
    }

    pub async fn places_by_category(&self, category: &str) -> ResultEngine<Vec<Place>> {
        with_tx!(self, |db_tx| {
            places::Entity::find()
                .filter(places::Column::Category.eq(category.to_string()))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Place::try_from)
                .collect()
        })
    }

    /// Case-insensitive substring match across name, state, category,
    /// description and special notes.
    pub async fn search_places(&self, term: &str) -> ResultEngine<Vec<Place>> {
        let needle = term.to_lowercase();
        with_tx!(self, |db_tx| {
            let rows = places::Entity::find().all(&db_tx).await?;
            rows.into_iter()
                .filter(|p| {
                    p.place_name.to_lowercase().contains(&needle)
                        || p.state.to_lowercase().contains(&needle)
                        || p.category.to_lowercase().contains(&needle)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&needle))
                        || p.special_notes
                            .as_deref()
                            .is_some_and(|n| n.to_lowercase().contains(&needle))
                })
                .map(Place::try_from)
                .collect()
        })
    }

    pub async fn place_by_id(&self, place_id: &str) -> ResultEngine<Option<Place>> {
        with_tx!(self, |db_tx| {
            places::Entity::find_by_id(place_id.to_string())
                .one(&db_tx)
                .await?
                .map(Place::try_from)
                .transpose()
        })
    }

    /// The newest catalog rows, for the landing page.
    pub async fn featured_places(&self, limit: Option<u64>) -> ResultEngine<Vec<Place>> {
        with_tx!(self, |db_tx| {
            places::Entity::find()
                .order_by_desc(places::Column::CreatedAt)
                .limit(limit.unwrap_or(FEATURED_LIMIT))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Place::try_from)
                .collect()
        })
    }

    /// Filter by entry fee. Fees are free-form text; rows whose fee has no
    /// leading number (or no fee at all) always pass.
    pub async fn places_by_budget(
        &self,
        min_budget: Option<i64>,
        max_budget: Option<i64>,
    ) -> ResultEngine<Vec<Place>> {
        let min = min_budget.unwrap_or(0);
        with_tx!(self, |db_tx| {
            let rows = places::Entity::find().all(&db_tx).await?;
            rows.into_iter()
                .filter(|p| match p.entry_fee.as_deref().and_then(parse_entry_fee) {
                    Some(fee) => fee >= min && max_budget.is_none_or(|max| fee <= max),
                    None => true,
                })
                .map(Place::try_from)
                .collect()
        })
    }

    /// The ten largest categories, by row count.
    pub async fn popular_categories(&self) -> ResultEngine<Vec<CategoryCount>> {
        with_tx!(self, |db_tx| {
            let rows = places::Entity::find().all(&db_tx).await?;
            let mut counts: HashMap<String, u64> = HashMap::new();
            for row in rows {
                *counts.entry(row.category).or_insert(0) += 1;
            }
            let mut out: Vec<CategoryCount> = counts
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect();
            out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
            out.truncate(POPULAR_CATEGORIES_LIMIT);
            Ok(out)
        })
    }

    /// Every state that has catalog rows, busiest first.
    pub async fn states_with_places(&self) -> ResultEngine<Vec<StatePlaceCount>> {
        with_tx!(self, |db_tx| {
            let rows = places::Entity::find().all(&db_tx).await?;
            let mut counts: HashMap<String, StatePlaceCount> = HashMap::new();
            for row in rows {
                counts
                    .entry(row.state_code.clone())
                    .or_insert_with(|| StatePlaceCount {
                        name: row.state.clone(),
                        code: row.state_code.clone(),
                        count: 0,
                    })
                    .count += 1;
            }
            let mut out: Vec<StatePlaceCount> = counts.into_values().collect();
            out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));
            Ok(out)
        })
    }

    pub async fn all_states(&self) -> ResultEngine<Vec<State>> {
        with_tx!(self, |db_tx| {
            states::Entity::find()
                .all(&db_tx)
                .await?
                .into_iter()
                .map(State::try_from)
                .collect()
        })
    }

    pub async fn state_by_code(&self, code: &str) -> ResultEngine<Option<State>> {
        with_tx!(self, |db_tx| {
            states::Entity::find()
                .filter(states::Column::Code.eq(code.to_string()))
                .one(&db_tx)
                .await?
                .map(State::try_from)
                .transpose()
        })
    }

    /// Load the built-in state catalog. A no-op when any state rows
    /// already exist, so it is safe to run at every startup.
    pub async fn seed_states(&self) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let existing = states::Entity::find().one(&db_tx).await?;
            if existing.is_some() {
                return Ok(0);
            }
            let catalog = builtin_states();
            let seeded = catalog.len() as u64;
            for state in catalog {
                let entry: states::ActiveModel = (&state).into();
                entry.insert(&db_tx).await?;
            }
            Ok(seeded)
        })
    }
}

/// Extract the leading rupee amount from a free-form entry-fee string.
fn parse_entry_fee(raw: &str) -> Option<i64> {
    let digits: String = raw
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn builtin_states() -> Vec<State> {
    let mk = |code: &str,
              name: &str,
              description: &str,
              attractions: &[&str],
              best_time: &str,
              image_url: &str| State {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        attractions: attractions.iter().map(ToString::to_string).collect(),
        best_time: best_time.to_string(),
        image_url: Some(image_url.to_string()),
    };

    vec![
        mk(
            "MH",
            "Maharashtra",
            "Home to Mumbai, the financial capital of India. Known for Bollywood, beaches, and historic caves.",
            &["Gateway of India", "Ajanta Caves", "Lonavala", "Mahabaleshwar"],
            "October to March",
            "https://images.unsplash.com/photo-1570168007204-dfb528c6958f?w=800",
        ),
        mk(
            "DL",
            "Delhi",
            "The capital territory of India, rich in history and culture with magnificent monuments.",
            &["Red Fort", "India Gate", "Qutub Minar", "Lotus Temple"],
            "October to March",
            "https://images.unsplash.com/photo-1587474260584-136574528ed5?w=800",
        ),
        mk(
            "KA",
            "Karnataka",
            "Known for its palaces, gardens, and IT hub Bangalore. Rich cultural heritage and natural beauty.",
            &["Mysore Palace", "Hampi", "Coorg", "Bangalore"],
            "October to February",
            "https://images.unsplash.com/photo-1582510003544-4d00b7f74220?w=800",
        ),
        mk(
            "RJ",
            "Rajasthan",
            "Land of kings with magnificent forts, palaces, and desert landscapes.",
            &["Jaipur", "Udaipur", "Jaisalmer", "Jodhpur"],
            "October to March",
            "https://images.unsplash.com/photo-1477587458883-47145ed94245?w=800",
        ),
        mk(
            "GOA",
            "Goa",
            "India's beach paradise with Portuguese heritage, vibrant nightlife, and pristine beaches.",
            &["Baga Beach", "Old Goa Churches", "Dudhsagar Falls", "Anjuna Beach"],
            "November to February",
            "https://images.unsplash.com/photo-1512343879784-a960bf40e7f2?w=800",
        ),
        mk(
            "KL",
            "Kerala",
            "God's Own Country with backwaters, hill stations, and spice plantations.",
            &["Alleppey Backwaters", "Munnar", "Kochi", "Thekkady"],
            "September to March",
            "https://images.unsplash.com/photo-1602216056096-3b40cc0c9944?w=800",
        ),
        mk(
            "UP",
            "Uttar Pradesh",
            "Home to the iconic Taj Mahal and rich Mughal heritage.",
            &["Taj Mahal", "Varanasi", "Lucknow", "Mathura"],
            "October to March",
            "https://images.unsplash.com/photo-1564507592333-c60657eea523?w=800",
        ),
        mk(
            "HP",
            "Himachal Pradesh",
            "Mountain state with hill stations, adventure sports, and scenic beauty.",
            &["Shimla", "Manali", "Dharamshala", "Spiti Valley"],
            "March to June, September to November",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::parse_entry_fee;

    #[test]
    fn entry_fee_parses_leading_amounts() {
        assert_eq!(parse_entry_fee("₹500"), Some(500));
        assert_eq!(parse_entry_fee("500 per head"), Some(500));
        assert_eq!(parse_entry_fee("Rs. 50 (adults)"), Some(50));
        assert_eq!(parse_entry_fee("Free"), None);
        assert_eq!(parse_entry_fee(""), None);
    }
}
