use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{FetchStatus, MealDetailsState};
use crate::api::{Meal, MealCategory};
use crate::capabilities::{Effect, Fetch};
use crate::event::{MealId, MealListEvent};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MealRow {
    pub meal: Meal,
    /// A details lookup for this row is outstanding.
    pub in_flight: bool,
}

/// Meals of one category. Pushed onto the stack by the category list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MealListState {
    pub category: MealCategory,
    pub rows: Vec<MealRow>,
    pub status: FetchStatus,
    pub details: Option<MealDetailsState>,
}

impl MealListState {
    pub fn new(category: MealCategory) -> Self {
        Self {
            category,
            rows: Vec::new(),
            status: FetchStatus::default(),
            details: None,
        }
    }

    pub fn title(&self) -> String {
        format!("{}s", self.category.name)
    }

    pub fn row(&self, meal_id: &MealId) -> Option<&MealRow> {
        self.rows.iter().find(|row| &row.meal.id == meal_id)
    }

    pub fn update(&mut self, event: MealListEvent) -> Vec<Effect> {
        match event {
            MealListEvent::Activate => {
                if self.status.start() {
                    return vec![Effect::Fetch(Fetch::Meals {
                        category: self.category.clone(),
                    })];
                }
                debug!(category = %self.category.name, "meals already loaded or loading");
            }

            MealListEvent::MealsFetched { result, .. } => match result {
                Ok(meals) => {
                    self.status.succeed();
                    self.rows = meals
                        .into_iter()
                        .map(|meal| MealRow {
                            meal,
                            in_flight: false,
                        })
                        .collect();
                }
                Err(e) => {
                    warn!(category = %self.category.name, error = %e, "meals fetch failed");
                    self.status.fail(e.to_string());
                }
            },

            MealListEvent::MealSelected { meal_id } => {
                let Some(row) = self.rows.iter_mut().find(|row| row.meal.id == meal_id) else {
                    warn!(%meal_id, "selected meal is not listed");
                    return Vec::new();
                };
                if row.in_flight {
                    debug!(%meal_id, "details already requested");
                    return Vec::new();
                }
                row.in_flight = true;
                return vec![Effect::Fetch(Fetch::MealDetails {
                    category_id: self.category.id.clone(),
                    meal_id,
                })];
            }

            MealListEvent::DetailsFetched {
                meal_id, result, ..
            } => {
                if let Some(row) = self.rows.iter_mut().find(|row| row.meal.id == meal_id) {
                    row.in_flight = false;
                }
                match result {
                    Ok(records) => match records.into_iter().next() {
                        Some(first) => {
                            info!(%meal_id, "presenting meal details");
                            self.details = Some(MealDetailsState::new(first));
                        }
                        None => debug!(%meal_id, "lookup returned no records"),
                    },
                    Err(e) => {
                        warn!(%meal_id, error = %e, "details fetch failed");
                        self.status.record_error(e.to_string());
                    }
                }
            }

            MealListEvent::DismissDetails => {
                if self.details.take().is_some() {
                    info!(category = %self.category.name, "dismissed meal details");
                }
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MealDetails};
    use crate::event::CategoryId;

    fn seafood() -> MealCategory {
        MealCategory {
            id: CategoryId::new("8"),
            name: "Seafood".into(),
            thumbnail_url: String::new(),
            description: String::new(),
        }
    }

    fn meal(id: &str, name: &str) -> Meal {
        Meal {
            id: MealId::new(id),
            name: name.into(),
            thumbnail_url: String::new(),
        }
    }

    fn details(id: &str) -> MealDetails {
        MealDetails {
            id: MealId::new(id),
            name: "Baked salmon with fennel & tomatoes".into(),
            instructions: "Heat oven to 180C.".into(),
            thumbnail_url: String::new(),
            ingredient_measures: Vec::new(),
        }
    }

    fn loaded() -> MealListState {
        let mut state = MealListState::new(seafood());
        state.update(MealListEvent::Activate);
        state.update(MealListEvent::MealsFetched {
            category_id: CategoryId::new("8"),
            result: Ok(vec![meal("52959", "Baked salmon"), meal("52819", "Cajun spiced fish tacos")]),
        });
        state
    }

    #[test]
    fn title_pluralizes_category_name() {
        assert_eq!(MealListState::new(seafood()).title(), "Seafoods");
    }

    #[test]
    fn activate_fetches_meals_once() {
        let mut state = MealListState::new(seafood());

        let effects = state.update(MealListEvent::Activate);
        assert_eq!(
            effects,
            vec![Effect::Fetch(Fetch::Meals { category: seafood() })]
        );
        assert!(state.update(MealListEvent::Activate).is_empty());
    }

    #[test]
    fn selecting_a_meal_marks_only_that_row() {
        let mut state = loaded();

        let effects = state.update(MealListEvent::MealSelected {
            meal_id: MealId::new("52959"),
        });

        assert_eq!(effects.len(), 1);
        assert!(state.row(&MealId::new("52959")).unwrap().in_flight);
        assert!(!state.row(&MealId::new("52819")).unwrap().in_flight);
    }

    #[test]
    fn reselecting_an_in_flight_row_is_ignored() {
        let mut state = loaded();
        let select = MealListEvent::MealSelected {
            meal_id: MealId::new("52959"),
        };

        assert_eq!(state.update(select.clone()).len(), 1);
        assert!(state.update(select).is_empty());
    }

    #[test]
    fn unknown_meal_selection_is_ignored() {
        let mut state = loaded();
        let before = state.clone();

        let effects = state.update(MealListEvent::MealSelected {
            meal_id: MealId::new("1"),
        });

        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn first_record_is_presented_and_extras_discarded() {
        let mut state = loaded();
        state.update(MealListEvent::MealSelected {
            meal_id: MealId::new("52959"),
        });

        state.update(MealListEvent::DetailsFetched {
            category_id: CategoryId::new("8"),
            meal_id: MealId::new("52959"),
            result: Ok(vec![details("52959"), details("52819")]),
        });

        assert!(!state.row(&MealId::new("52959")).unwrap().in_flight);
        assert_eq!(
            state.details.as_ref().map(|d| d.meal.id.clone()),
            Some(MealId::new("52959"))
        );
    }

    #[test]
    fn empty_lookup_leaves_navigation_unchanged() {
        let mut state = loaded();
        state.update(MealListEvent::MealSelected {
            meal_id: MealId::new("52959"),
        });

        state.update(MealListEvent::DetailsFetched {
            category_id: CategoryId::new("8"),
            meal_id: MealId::new("52959"),
            result: Ok(vec![]),
        });

        assert!(state.details.is_none());
        assert!(!state.row(&MealId::new("52959")).unwrap().in_flight);
        assert_eq!(state.status.error(), None);
    }

    #[test]
    fn details_failure_surfaces_on_the_list() {
        let mut state = loaded();
        state.update(MealListEvent::MealSelected {
            meal_id: MealId::new("52959"),
        });

        state.update(MealListEvent::DetailsFetched {
            category_id: CategoryId::new("8"),
            meal_id: MealId::new("52959"),
            result: Err(ApiError::Server {
                status: 503,
                url: "lookup.php?i=52959".into(),
            }),
        });

        assert!(state.details.is_none());
        assert!(!state.row(&MealId::new("52959")).unwrap().in_flight);
        assert_eq!(
            state.status.error(),
            Some("The recipe service responded with status 503")
        );
        assert_eq!(state.rows.len(), 2);
    }

    #[test]
    fn dismissing_details_pops_the_sheet() {
        let mut state = loaded();
        state.details = Some(MealDetailsState::new(details("52959")));

        state.update(MealListEvent::DismissDetails);
        assert!(state.details.is_none());

        state.update(MealListEvent::DismissDetails);
        assert!(state.details.is_none());
    }
}
