use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::api::MealDetails;
use crate::capabilities::Effect;
use crate::event::MealDetailsEvent;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Instructions,
    Ingredients,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Instructions, Tab::Ingredients];
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tab::Instructions => "Instructions",
            Tab::Ingredients => "Ingredients",
        })
    }
}

/// Read-only view of one recipe. Presented as a sheet over the meal list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MealDetailsState {
    pub meal: MealDetails,
    pub tab: Tab,
}

impl MealDetailsState {
    pub fn new(meal: MealDetails) -> Self {
        Self {
            meal,
            tab: Tab::default(),
        }
    }

    pub fn update(&mut self, event: MealDetailsEvent) -> Vec<Effect> {
        match event {
            MealDetailsEvent::Activate => {
                debug!(
                    meal_id = %self.meal.id,
                    name = %self.meal.name,
                    ingredients = self.meal.ingredient_measures.len(),
                    "showing meal details"
                );
            }
            MealDetailsEvent::TabSelected(tab) => {
                self.tab = tab;
            }
        }
        Vec::new()
    }
}
