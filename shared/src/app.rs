//! Navigation composer: the root of the state tree and the event router.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capabilities::Effect;
use crate::event::{CategoryId, Event, MealListEvent};
use crate::screens::CategoryListState;
use crate::view::{CategoryListView, MealDetailsView, MealListView, ViewModel};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    CategoryList,
    MealList,
    MealDetails,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    Root,
    Push,
    Sheet,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    pub screen: Screen,
    pub presentation: Presentation,
}

impl Destination {
    const fn new(screen: Screen, presentation: Presentation) -> Self {
        Self {
            screen,
            presentation,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub category_list: CategoryListState,
}

impl Model {
    /// The drill-down stack, derived from which children are presented.
    pub fn navigation_path(&self) -> Vec<Destination> {
        let mut path = vec![Destination::new(Screen::CategoryList, Presentation::Root)];
        if let Some(meal_list) = &self.category_list.meal_list {
            path.push(Destination::new(Screen::MealList, Presentation::Push));
            if meal_list.details.is_some() {
                path.push(Destination::new(Screen::MealDetails, Presentation::Sheet));
            }
        }
        path
    }

    pub fn active_screen(&self) -> Screen {
        self.navigation_path()
            .last()
            .map_or(Screen::CategoryList, |d| d.screen)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct App;

impl App {
    pub fn update(&self, event: Event, model: &mut Model) -> Vec<Effect> {
        let event_name = event.name();
        debug!(event = event_name, "processing event");

        let mut effects = match event {
            Event::CategoryList(event) => model.category_list.update(event),

            Event::MealList(event) => {
                let Some(meal_list) = model.category_list.meal_list.as_mut() else {
                    debug!(event = event_name, "no meal list presented; dropping");
                    return Vec::new();
                };
                if let Some(category_id) = response_owner(&event) {
                    if category_id != &meal_list.category.id {
                        debug!(
                            event = event_name,
                            %category_id,
                            presented = %meal_list.category.id,
                            "response for another category; dropping"
                        );
                        return Vec::new();
                    }
                }
                meal_list.update(event)
            }

            Event::MealDetails(event) => {
                let Some(details) = model
                    .category_list
                    .meal_list
                    .as_mut()
                    .and_then(|list| list.details.as_mut())
                else {
                    debug!(event = event_name, "no meal details presented; dropping");
                    return Vec::new();
                };
                details.update(event)
            }
        };

        effects.push(Effect::Render);
        effects
    }

    pub fn view(&self, model: &Model) -> ViewModel {
        let meal_list = model.category_list.meal_list.as_ref();
        let meal_details = meal_list.and_then(|list| list.details.as_ref());

        ViewModel {
            navigation: model.navigation_path(),
            category_list: CategoryListView::from(&model.category_list),
            meal_list: meal_list.map(MealListView::from),
            meal_details: meal_details.map(MealDetailsView::from),
        }
    }
}

fn response_owner(event: &MealListEvent) -> Option<&CategoryId> {
    match event {
        MealListEvent::MealsFetched { category_id, .. }
        | MealListEvent::DetailsFetched { category_id, .. } => Some(category_id),
        _ => None,
    }
}
