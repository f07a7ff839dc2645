use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{FetchStatus, MealListState};
use crate::api::MealCategory;
use crate::capabilities::{Effect, Fetch};
use crate::event::{CategoryId, CategoryListEvent};

/// Root screen: every category the service knows about.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CategoryListState {
    pub categories: Vec<MealCategory>,
    pub status: FetchStatus,
    pub meal_list: Option<MealListState>,
}

impl CategoryListState {
    pub fn category(&self, id: &CategoryId) -> Option<&MealCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn update(&mut self, event: CategoryListEvent) -> Vec<Effect> {
        match event {
            CategoryListEvent::Activate => {
                if self.status.start() {
                    return vec![Effect::Fetch(Fetch::Categories)];
                }
                debug!("categories already loaded or loading");
            }

            CategoryListEvent::CategoriesFetched(Ok(categories)) => {
                self.status.succeed();
                self.categories = categories;
            }

            CategoryListEvent::CategoriesFetched(Err(e)) => {
                warn!(error = %e, "categories fetch failed");
                self.status.fail(e.to_string());
            }

            CategoryListEvent::CategorySelected { category_id } => {
                match self.category(&category_id).cloned() {
                    Some(category) => {
                        info!(category = %category.name, "pushing meal list");
                        self.meal_list = Some(MealListState::new(category));
                    }
                    None => warn!(%category_id, "selected category is not listed"),
                }
            }

            CategoryListEvent::DismissMealList => {
                if self.meal_list.take().is_some() {
                    info!("popped meal list");
                }
            }
        }
        Vec::new()
    }
}
