use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{ApiError, Meal, MealCategory, MealDetails};
use crate::screens::meal_details::Tab;

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(CategoryId);
typed_id!(MealId);

pub type FetchResult<T> = Result<Vec<T>, ApiError>;

// --- Events: one closed set per screen, routed by the app ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    CategoryList(CategoryListEvent),
    MealList(MealListEvent),
    MealDetails(MealDetailsEvent),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum CategoryListEvent {
    Activate,
    CategorySelected { category_id: CategoryId },
    DismissMealList,

    CategoriesFetched(FetchResult<MealCategory>),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum MealListEvent {
    Activate,
    MealSelected { meal_id: MealId },
    DismissDetails,

    MealsFetched {
        category_id: CategoryId,
        result: FetchResult<Meal>,
    },
    DetailsFetched {
        category_id: CategoryId,
        meal_id: MealId,
        result: FetchResult<MealDetails>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum MealDetailsEvent {
    Activate,
    TabSelected(Tab),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::CategoryList(e) => match e {
                CategoryListEvent::Activate => "category_list.activate",
                CategoryListEvent::CategorySelected { .. } => "category_list.category_selected",
                CategoryListEvent::DismissMealList => "category_list.dismiss_meal_list",
                CategoryListEvent::CategoriesFetched(_) => "category_list.categories_fetched",
            },
            Event::MealList(e) => match e {
                MealListEvent::Activate => "meal_list.activate",
                MealListEvent::MealSelected { .. } => "meal_list.meal_selected",
                MealListEvent::DismissDetails => "meal_list.dismiss_details",
                MealListEvent::MealsFetched { .. } => "meal_list.meals_fetched",
                MealListEvent::DetailsFetched { .. } => "meal_list.details_fetched",
            },
            Event::MealDetails(e) => match e {
                MealDetailsEvent::Activate => "meal_details.activate",
                MealDetailsEvent::TabSelected(_) => "meal_details.tab_selected",
            },
        }
    }

    /// Completion events are produced by the runtime, never by the shell.
    pub fn is_fetch_response(&self) -> bool {
        matches!(
            self,
            Event::CategoryList(CategoryListEvent::CategoriesFetched(_))
                | Event::MealList(
                    MealListEvent::MealsFetched { .. } | MealListEvent::DetailsFetched { .. }
                )
        )
    }
}
