// lib.rs - Recipe browser core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod api;
pub mod app;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod logging;
pub mod runtime;
pub mod screens;
pub mod view;

pub use api::{ApiClient, ApiError, IngredientMeasure, Meal, MealCategory, MealDetails};
pub use app::{App, Destination, Model, Presentation, Screen};
pub use capabilities::{Effect, Fetch};
pub use config::GatewayConfig;
pub use event::{
    CategoryId, CategoryListEvent, Event, MealDetailsEvent, MealId, MealListEvent,
};
pub use runtime::Runtime;
pub use screens::{CategoryListState, FetchStatus, MealDetailsState, MealListState, Phase, Tab};
pub use view::ViewModel;
