//! Per-screen state machines.
//!
//! Each screen owns its state and handles its own slice of [`crate::Event`].
//! Handlers mutate state and return the effects they need; they never
//! perform I/O.

pub mod category_list;
pub mod meal_details;
pub mod meal_list;

use serde::{Deserialize, Serialize};

pub use self::category_list::CategoryListState;
pub use self::meal_details::{MealDetailsState, Tab};
pub use self::meal_list::{MealListState, MealRow};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Lifecycle of a screen's primary fetch.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchStatus {
    in_flight: bool,
    loaded: bool,
    error: Option<String>,
}

impl FetchStatus {
    /// Marks a fetch as started and returns `true` if one should be issued.
    ///
    /// Nothing starts while a fetch is in flight, or once content has loaded
    /// without error. A previous error is cleared.
    pub fn start(&mut self) -> bool {
        if self.in_flight || (self.loaded && self.error.is_none()) {
            return false;
        }
        self.in_flight = true;
        self.error = None;
        true
    }

    pub fn succeed(&mut self) {
        self.in_flight = false;
        self.loaded = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.in_flight = false;
        self.error = Some(message.into());
    }

    /// Records an error from a secondary fetch without touching the
    /// in-flight flag of the primary one.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.loaded {
            Phase::Loaded
        } else {
            Phase::Idle
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
