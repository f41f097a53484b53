//! User profiles: display name, bio, interest tags, verification flag.
//!
//! One profile per user, created or updated through a single idempotent
//! upsert keyed by `user_id`.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub verified: bool,
    pub avatar: Option<String>,
}

/// A profile joined with the account's email, as exposed to the profile page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub email: Option<String>,
}

/// Aggregate counters shown on the profile page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub trips_created: u64,
    pub trips_joined: u64,
    pub total_budget_managed: i64,
    pub completed_trips: u64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub name: String,
    pub bio: Option<String>,
    /// JSON-encoded array of interest tags.
    pub interests: String,
    pub verified: bool,
    pub avatar: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Profile> for ActiveModel {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: ActiveValue::Set(profile.user_id.clone()),
            name: ActiveValue::Set(profile.name.clone()),
            bio: ActiveValue::Set(profile.bio.clone()),
            interests: ActiveValue::Set(encode_tags(&profile.interests)),
            verified: ActiveValue::Set(profile.verified),
            avatar: ActiveValue::Set(profile.avatar.clone()),
        }
    }
}

impl TryFrom<Model> for Profile {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: model.user_id,
            name: model.name,
            bio: model.bio,
            interests: decode_tags(&model.interests)?,
            verified: model.verified,
            avatar: model.avatar,
        })
    }
}

pub(crate) fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_tags(raw: &str) -> ResultEngine<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|err| EngineError::InvalidValue(format!("invalid tag list: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        let tags = vec!["trekking".to_string(), "food".to_string()];
        assert_eq!(decode_tags(&encode_tags(&tags)).unwrap(), tags);
        assert!(decode_tags("[]").unwrap().is_empty());
        assert!(decode_tags("not json").is_err());
    }
}
