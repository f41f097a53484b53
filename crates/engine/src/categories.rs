//! The five fixed budget categories shared by budgets and expenses.

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Travel,
    Food,
    Stay,
    Activities,
    Misc,
}

impl ExpenseCategory {
    pub const ALL: [Self; 5] = [
        Self::Travel,
        Self::Food,
        Self::Stay,
        Self::Activities,
        Self::Misc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Food => "food",
            Self::Stay => "stay",
            Self::Activities => "activities",
            Self::Misc => "misc",
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "travel" => Ok(Self::Travel),
            "food" => Ok(Self::Food),
            "stay" => Ok(Self::Stay),
            "activities" => Ok(Self::Activities),
            "misc" => Ok(Self::Misc),
            other => Err(EngineError::InvalidValue(format!(
                "invalid expense category: {other}"
            ))),
        }
    }
}

/// One amount per category. Used both for planned allocations and for the
/// spent-per-category aggregation in budget summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    pub travel: i64,
    pub food: i64,
    pub stay: i64,
    pub activities: i64,
    pub misc: i64,
}

impl CategorySet {
    pub fn total(&self) -> i64 {
        self.travel + self.food + self.stay + self.activities + self.misc
    }

    pub fn get(&self, category: ExpenseCategory) -> i64 {
        match category {
            ExpenseCategory::Travel => self.travel,
            ExpenseCategory::Food => self.food,
            ExpenseCategory::Stay => self.stay,
            ExpenseCategory::Activities => self.activities,
            ExpenseCategory::Misc => self.misc,
        }
    }

    pub fn add(&mut self, category: ExpenseCategory, amount: i64) {
        match category {
            ExpenseCategory::Travel => self.travel += amount,
            ExpenseCategory::Food => self.food += amount,
            ExpenseCategory::Stay => self.stay += amount,
            ExpenseCategory::Activities => self.activities += amount,
            ExpenseCategory::Misc => self.misc += amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_all_five_buckets() {
        let set = CategorySet {
            travel: 1000,
            food: 2000,
            stay: 3000,
            activities: 500,
            misc: 500,
        };
        assert_eq!(set.total(), 7000);
    }

    #[test]
    fn add_targets_the_right_bucket() {
        let mut set = CategorySet::default();
        set.add(ExpenseCategory::Food, 600);
        set.add(ExpenseCategory::Food, 150);
        set.add(ExpenseCategory::Misc, 10);
        assert_eq!(set.food, 750);
        assert_eq!(set.misc, 10);
        assert_eq!(set.travel, 0);
        assert_eq!(set.total(), 760);
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in ExpenseCategory::ALL {
            assert_eq!(
                ExpenseCategory::try_from(category.as_str()).unwrap(),
                category
            );
        }
        assert!(ExpenseCategory::try_from("fuel").is_err());
    }
}
