use proptest::prelude::*;
use recipes_shared::{
    ApiError, App, CategoryId, CategoryListEvent, Effect, Event, Fetch, IngredientMeasure, Meal,
    MealCategory, MealDetails, MealId, MealListEvent, Model, Phase, Screen,
};

fn category(id: &str, name: &str) -> MealCategory {
    MealCategory {
        id: CategoryId::new(id),
        name: name.to_string(),
        thumbnail_url: format!("https://www.themealdb.com/images/category/{}.png", name.to_lowercase()),
        description: String::new(),
    }
}

fn meal(id: &str, name: &str) -> Meal {
    Meal {
        id: MealId::new(id),
        name: name.to_string(),
        thumbnail_url: String::new(),
    }
}

fn details(id: &str, name: &str) -> MealDetails {
    MealDetails {
        id: MealId::new(id),
        name: name.to_string(),
        instructions: "Cook until golden.".to_string(),
        thumbnail_url: String::new(),
        ingredient_measures: vec![IngredientMeasure {
            index: 0,
            measure: "1 large".to_string(),
            ingredient: "Banana".to_string(),
        }],
    }
}

fn dessert_list(app: &App, model: &mut Model) {
    app.update(Event::CategoryList(CategoryListEvent::Activate), model);
    app.update(
        Event::CategoryList(CategoryListEvent::CategoriesFetched(Ok(vec![category(
            "3", "Dessert",
        )]))),
        model,
    );
    app.update(
        Event::CategoryList(CategoryListEvent::CategorySelected {
            category_id: CategoryId::new("3"),
        }),
        model,
    );
    let effects = app.update(Event::MealList(MealListEvent::Activate), model);
    assert!(effects.iter().any(|e| matches!(e, Effect::Fetch(Fetch::Meals { .. }))));
    app.update(
        Event::MealList(MealListEvent::MealsFetched {
            category_id: CategoryId::new("3"),
            result: Ok(vec![
                meal("52855", "Banana Pancakes"),
                meal("53049", "Apam balik"),
            ]),
        }),
        model,
    );
}

fn select(app: &App, model: &mut Model, id: &str) -> Vec<Effect> {
    app.update(
        Event::MealList(MealListEvent::MealSelected {
            meal_id: MealId::new(id),
        }),
        model,
    )
}

fn row_in_flight(model: &Model, id: &str) -> bool {
    model
        .category_list
        .meal_list
        .as_ref()
        .and_then(|list| list.row(&MealId::new(id)))
        .is_some_and(|row| row.in_flight)
}

#[test]
fn test_category_screen_loads_single_dessert_row() {
    let app = App;
    let mut model = Model::default();

    let effects = app.update(Event::CategoryList(CategoryListEvent::Activate), &mut model);
    assert!(effects.contains(&Effect::Fetch(Fetch::Categories)));

    app.update(
        Event::CategoryList(CategoryListEvent::CategoriesFetched(Ok(vec![category(
            "3", "Dessert",
        )]))),
        &mut model,
    );

    assert_eq!(model.category_list.status.phase(), Phase::Loaded);
    let view = app.view(&model);
    assert_eq!(view.category_list.rows.len(), 1);
    assert_eq!(view.category_list.rows[0].id, CategoryId::new("3"));
    assert_eq!(view.category_list.rows[0].name, "Dessert");
    assert_eq!(view.category_list.index[0].letter, "D");
}

#[test]
fn test_empty_detail_lookup_presents_nothing() {
    let app = App;
    let mut model = Model::default();
    dessert_list(&app, &mut model);

    select(&app, &mut model, "52855");
    app.update(
        Event::MealList(MealListEvent::DetailsFetched {
            category_id: CategoryId::new("3"),
            meal_id: MealId::new("52855"),
            result: Ok(vec![]),
        }),
        &mut model,
    );

    let list = model.category_list.meal_list.as_ref().unwrap();
    assert!(list.details.is_none());
    assert_eq!(model.active_screen(), Screen::MealList);
    assert!(!row_in_flight(&model, "52855"));
}

#[test]
fn test_reverse_order_completions_clear_only_their_own_row() {
    let app = App;
    let mut model = Model::default();
    dessert_list(&app, &mut model);

    assert_eq!(select(&app, &mut model, "52855").len(), 2);
    assert_eq!(select(&app, &mut model, "53049").len(), 2);
    assert!(row_in_flight(&model, "52855"));
    assert!(row_in_flight(&model, "53049"));

    app.update(
        Event::MealList(MealListEvent::DetailsFetched {
            category_id: CategoryId::new("3"),
            meal_id: MealId::new("53049"),
            result: Ok(vec![details("53049", "Apam balik")]),
        }),
        &mut model,
    );
    assert!(row_in_flight(&model, "52855"));
    assert!(!row_in_flight(&model, "53049"));

    app.update(
        Event::MealList(MealListEvent::DetailsFetched {
            category_id: CategoryId::new("3"),
            meal_id: MealId::new("52855"),
            result: Ok(vec![details("52855", "Banana Pancakes")]),
        }),
        &mut model,
    );
    assert!(!row_in_flight(&model, "52855"));
    assert!(!row_in_flight(&model, "53049"));
    assert_eq!(model.active_screen(), Screen::MealDetails);
}

#[test]
fn test_failures_clear_in_flight_for_screen_and_row() {
    let app = App;
    let mut model = Model::default();
    dessert_list(&app, &mut model);

    select(&app, &mut model, "52855");
    app.update(
        Event::MealList(MealListEvent::DetailsFetched {
            category_id: CategoryId::new("3"),
            meal_id: MealId::new("52855"),
            result: Err(ApiError::Decode {
                message: "missing field `strInstructions`".to_string(),
            }),
        }),
        &mut model,
    );
    assert!(!row_in_flight(&model, "52855"));

    app.update(Event::CategoryList(CategoryListEvent::DismissMealList), &mut model);
    app.update(
        Event::CategoryList(CategoryListEvent::CategorySelected {
            category_id: CategoryId::new("3"),
        }),
        &mut model,
    );
    app.update(Event::MealList(MealListEvent::Activate), &mut model);
    app.update(
        Event::MealList(MealListEvent::MealsFetched {
            category_id: CategoryId::new("3"),
            result: Err(ApiError::Transport {
                url: "https://www.themealdb.com/api/json/v1/1/filter.php?c=Dessert".to_string(),
                message: "dns error".to_string(),
            }),
        }),
        &mut model,
    );

    let list = model.category_list.meal_list.as_ref().unwrap();
    assert!(!list.status.in_flight());
    assert_eq!(list.status.phase(), Phase::Failed);
    assert_eq!(model.category_list.status.phase(), Phase::Loaded);
}

fn unique_categories() -> impl Strategy<Value = Vec<MealCategory>> {
    proptest::collection::btree_map(1u32..10_000, "[A-Z][a-z]{2,12}", 0..30).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, name)| category(&id.to_string(), &name))
            .collect()
    })
}

proptest! {
    #[test]
    fn test_categories_match_the_fetched_list(categories in unique_categories()) {
        let app = App;
        let mut model = Model::default();
        app.update(Event::CategoryList(CategoryListEvent::Activate), &mut model);

        let fetched = Event::CategoryList(CategoryListEvent::CategoriesFetched(Ok(categories.clone())));
        app.update(fetched.clone(), &mut model);
        prop_assert_eq!(&model.category_list.categories, &categories);

        let once = model.clone();
        app.update(fetched, &mut model);
        prop_assert_eq!(model, once);
    }
}
