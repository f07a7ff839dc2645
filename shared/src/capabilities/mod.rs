mod http;

pub use self::http::{
    HttpError, HttpHeaders, HttpRequest, HttpResponse, HttpResult, HttpTransport,
    ReqwestTransport, ValidatedUrl, MAX_RESPONSE_BODY_SIZE,
};

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, MealCategory, ServerRoute};
use crate::event::{CategoryId, CategoryListEvent, Event, MealId, MealListEvent};

/// Side effects requested by [`crate::App::update`].
///
/// The core never performs I/O itself. The shell (or [`crate::Runtime`])
/// carries out each effect and feeds the outcome back in as an [`Event`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Effect {
    Render,
    Fetch(Fetch),
}

/// One gateway call, tagged with what the reply must be routed back to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Fetch {
    Categories,
    Meals {
        category: MealCategory,
    },
    MealDetails {
        category_id: CategoryId,
        meal_id: MealId,
    },
}

impl Fetch {
    pub fn route(&self) -> ServerRoute {
        match self {
            Fetch::Categories => ServerRoute::Categories,
            Fetch::Meals { category } => ServerRoute::MealsInCategory {
                category: category.name.clone(),
            },
            Fetch::MealDetails { meal_id, .. } => ServerRoute::MealDetails {
                meal_id: meal_id.clone(),
            },
        }
    }

    /// Runs the call and wraps the outcome in the matching completion event.
    pub async fn perform(self, api: &ApiClient) -> Event {
        match self {
            Fetch::Categories => Event::CategoryList(CategoryListEvent::CategoriesFetched(
                api.fetch_categories().await,
            )),
            Fetch::Meals { category } => {
                let result = api.fetch_meals(&category).await;
                Event::MealList(MealListEvent::MealsFetched {
                    category_id: category.id,
                    result,
                })
            }
            Fetch::MealDetails {
                category_id,
                meal_id,
            } => {
                let result = api.fetch_meal_details(&meal_id).await;
                Event::MealList(MealListEvent::DetailsFetched {
                    category_id,
                    meal_id,
                    result,
                })
            }
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    //! Canned transport for driving the gateway without a network.

    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tokio::sync::Notify;

    #[derive(Clone)]
    struct Stub {
        outcome: Result<(u16, Vec<u8>), HttpError>,
        gate: Option<Arc<Notify>>,
    }

    /// Answers requests by exact URL match. Unknown URLs get a 404.
    #[derive(Default)]
    pub struct StubTransport {
        stubs: Mutex<HashMap<String, Stub>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond_json(&self, url: impl Into<String>, status: u16, body: serde_json::Value) {
            self.insert(url.into(), Ok((status, body.to_string().into_bytes())), None);
        }

        /// Like [`Self::respond_json`], but the reply is held until `gate`
        /// is notified.
        pub fn respond_json_after(
            &self,
            url: impl Into<String>,
            status: u16,
            body: serde_json::Value,
            gate: Arc<Notify>,
        ) {
            self.insert(
                url.into(),
                Ok((status, body.to_string().into_bytes())),
                Some(gate),
            );
        }

        pub fn fail(&self, url: impl Into<String>, error: HttpError) {
            self.insert(url.into(), Err(error), None);
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            lock(&self.requests).clone()
        }

        fn insert(
            &self,
            url: String,
            outcome: Result<(u16, Vec<u8>), HttpError>,
            gate: Option<Arc<Notify>>,
        ) {
            lock(&self.stubs).insert(url, Stub { outcome, gate });
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn execute(&self, request: HttpRequest) -> HttpResult {
            let stub = lock(&self.stubs).get(request.url().as_str()).cloned();
            let request_id = request.request_id().to_string();
            lock(&self.requests).push(request);

            let Some(stub) = stub else {
                return Ok(HttpResponse::new(
                    404,
                    HttpHeaders::new(),
                    Vec::new(),
                    request_id,
                    0,
                ));
            };

            if let Some(gate) = stub.gate {
                gate.notified().await;
            }

            stub.outcome.map(|(status, body)| {
                HttpResponse::new(status, HttpHeaders::new(), body, request_id, 0)
            })
        }
    }
}
