use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use super::ApiError;
use crate::event::MealId;

/// One upstream endpoint plus its parameters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ServerRoute {
    Categories,
    MealsInCategory { category: String },
    MealDetails { meal_id: MealId },
}

impl ServerRoute {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Categories => "categories.php",
            Self::MealsInCategory { .. } => "filter.php",
            Self::MealDetails { .. } => "lookup.php",
        }
    }

    pub fn query(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::Categories => None,
            Self::MealsInCategory { category } => Some(("c", category.as_str())),
            Self::MealDetails { meal_id } => Some(("i", meal_id.as_str())),
        }
    }

    /// Resolves the route against `base`, which must end in `/`.
    pub fn url(&self, base: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(base)
            .and_then(|base| base.join(self.path()))
            .map_err(|e| ApiError::Transport {
                url: format!("{base}{}", self.path()),
                message: e.to_string(),
            })?;

        if let Some((key, value)) = self.query() {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }
}

impl fmt::Display for ServerRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.query() {
            Some((key, value)) => write!(f, "{}?{key}={value}", self.path()),
            None => f.write_str(self.path()),
        }
    }
}
