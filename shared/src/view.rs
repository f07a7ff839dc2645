use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::app::Destination;
use crate::event::{CategoryId, MealId};
use crate::screens::{CategoryListState, FetchStatus, MealDetailsState, MealListState, Tab};

/// What a screen body shows, in precedence order: spinner, error, content.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ScreenStatus {
    Loading,
    Error { message: String },
    Ready,
}

impl From<&FetchStatus> for ScreenStatus {
    fn from(status: &FetchStatus) -> Self {
        if status.in_flight() {
            ScreenStatus::Loading
        } else if let Some(message) = status.error() {
            ScreenStatus::Error {
                message: message.to_string(),
            }
        } else {
            ScreenStatus::Ready
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CategoryRowView {
    pub id: CategoryId,
    pub name: String,
    pub thumbnail_url: String,
    pub description: String,
}

/// One letter of the category index with the categories filed under it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IndexSection {
    pub letter: String,
    pub category_ids: Vec<CategoryId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CategoryListView {
    pub status: ScreenStatus,
    pub rows: Vec<CategoryRowView>,
    pub index: Vec<IndexSection>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MealRowView {
    pub id: MealId,
    pub name: String,
    pub thumbnail_url: String,
    pub busy: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MealListView {
    pub title: String,
    pub status: ScreenStatus,
    pub rows: Vec<MealRowView>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MealDetailsView {
    pub title: String,
    pub thumbnail_url: String,
    pub instructions: String,
    /// "{measure} {ingredient}" per line, in recipe order.
    pub ingredients: Vec<String>,
    pub tab: Tab,
    pub tabs: Vec<Tab>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub navigation: Vec<Destination>,
    pub category_list: CategoryListView,
    pub meal_list: Option<MealListView>,
    pub meal_details: Option<MealDetailsView>,
}

impl Default for ViewModel {
    fn default() -> Self {
        crate::App.view(&crate::Model::default())
    }
}

impl From<&CategoryListState> for CategoryListView {
    fn from(state: &CategoryListState) -> Self {
        let index = sort_and_group_alphabetically(
            &state.categories,
            |c| c.name.as_str(),
            |c| c.id.as_str(),
        )
        .into_iter()
        .map(|(letter, categories)| IndexSection {
            letter,
            category_ids: categories.into_iter().map(|c| c.id.clone()).collect(),
        })
        .collect();

        Self {
            status: ScreenStatus::from(&state.status),
            rows: state
                .categories
                .iter()
                .map(|c| CategoryRowView {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    thumbnail_url: c.thumbnail_url.clone(),
                    description: c.description.clone(),
                })
                .collect(),
            index,
        }
    }
}

impl From<&MealListState> for MealListView {
    fn from(state: &MealListState) -> Self {
        Self {
            title: state.title(),
            status: ScreenStatus::from(&state.status),
            rows: state
                .rows
                .iter()
                .map(|row| MealRowView {
                    id: row.meal.id.clone(),
                    name: row.meal.name.clone(),
                    thumbnail_url: row.meal.thumbnail_url.clone(),
                    busy: row.in_flight,
                })
                .collect(),
        }
    }
}

impl From<&MealDetailsState> for MealDetailsView {
    fn from(state: &MealDetailsState) -> Self {
        let meal = &state.meal;
        Self {
            title: meal.name.clone(),
            thumbnail_url: meal.thumbnail_url.clone(),
            instructions: meal.instructions.clone(),
            ingredients: meal
                .ingredient_measures
                .iter()
                .map(|pair| format!("{} {}", pair.measure, pair.ingredient))
                .collect(),
            tab: state.tab,
            tabs: Tab::ALL.to_vec(),
        }
    }
}

/// Sorts by `primary`, then `secondary`, and files each item under the
/// first character of its primary key.
pub fn sort_and_group_alphabetically<'a, T, P, S>(
    items: &'a [T],
    primary: P,
    secondary: S,
) -> BTreeMap<String, Vec<&'a T>>
where
    P: Fn(&'a T) -> &'a str,
    S: Fn(&'a T) -> &'a str,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| {
        primary(*a)
            .cmp(primary(*b))
            .then_with(|| secondary(*a).cmp(secondary(*b)))
    });

    let mut groups: BTreeMap<String, Vec<&T>> = BTreeMap::new();
    for item in sorted {
        let letter: String = primary(item).chars().take(1).collect();
        groups.entry(letter).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_precedence_is_loading_then_error_then_ready() {
        let mut status = FetchStatus::default();
        assert_eq!(ScreenStatus::from(&status), ScreenStatus::Ready);

        status.record_error("boom");
        assert_eq!(
            ScreenStatus::from(&status),
            ScreenStatus::Error {
                message: "boom".into()
            }
        );

        status.start();
        assert_eq!(ScreenStatus::from(&status), ScreenStatus::Loading);
    }

    #[test]
    fn groups_by_first_letter_in_sorted_order() {
        let people = [
            ("Beth", "Zed"),
            ("Adam", "Young"),
            ("Beth", "Avery"),
            ("Carl", "Moss"),
        ];

        let groups = sort_and_group_alphabetically(&people, |p| p.0, |p| p.1);

        let letters: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(letters, ["A", "B", "C"]);
        assert_eq!(groups["B"], vec![&("Beth", "Avery"), &("Beth", "Zed")]);
    }

    #[test]
    fn empty_input_has_no_sections() {
        let empty: [(&str, &str); 0] = [];
        assert!(sort_and_group_alphabetically(&empty, |p| p.0, |p| p.1).is_empty());
    }
}
