//! API gateway for TheMealDB.
//!
//! Stateless and cheap to clone: every screen fetch runs on its own task
//! with its own handle to the same transport.

mod error;
mod models;
mod route;

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{instrument, warn};

pub use self::error::ApiError;
pub use self::models::{IngredientMeasure, Meal, MealCategory, MealDetails, MAX_INGREDIENT_FIELDS};
pub use self::route::ServerRoute;

use self::models::{CategoriesEnvelope, MealsEnvelope};
use crate::capabilities::{HttpRequest, HttpTransport, ReqwestTransport, ValidatedUrl};
use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    config: Arc<GatewayConfig>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: GatewayConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Gateway over the network with platform-default session settings.
    pub fn live(config: GatewayConfig) -> Self {
        Self::new(Arc::new(ReqwestTransport::new()), config)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Performs one GET for `route` and decodes the full body as `T`.
    #[instrument(skip_all, fields(route = %route))]
    pub async fn request<T: DeserializeOwned>(&self, route: &ServerRoute) -> Result<T, ApiError> {
        let url = route.url(self.config.base_url())?;
        let request = HttpRequest::get(ValidatedUrl::from_url(&url)?)
            .with_header("Accept", "application/json")?
            .with_max_response_size(self.config.max_response_size);

        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(error = %e, "request failed");
            ApiError::from(e)
        })?;

        if !response.is_success() {
            warn!(status = response.status(), "unexpected status");
            return Err(ApiError::Server {
                status: response.status(),
                url: url.to_string(),
            });
        }

        response.json().map_err(|e| {
            warn!(error = %e, "response did not match the expected shape");
            ApiError::from(e)
        })
    }

    pub async fn fetch_categories(&self) -> Result<Vec<MealCategory>, ApiError> {
        let envelope: CategoriesEnvelope = self.request(&ServerRoute::Categories).await?;
        Ok(envelope.categories.unwrap_or_default())
    }

    pub async fn fetch_meals(&self, category: &MealCategory) -> Result<Vec<Meal>, ApiError> {
        let route = ServerRoute::MealsInCategory {
            category: category.name.clone(),
        };
        let envelope: MealsEnvelope<Meal> = self.request(&route).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    pub async fn fetch_meal_details(
        &self,
        meal_id: &crate::event::MealId,
    ) -> Result<Vec<MealDetails>, ApiError> {
        let route = ServerRoute::MealDetails {
            meal_id: meal_id.clone(),
        };
        let envelope: MealsEnvelope<MealDetails> = self.request(&route).await?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::testing::StubTransport;
    use crate::capabilities::HttpError;
    use crate::event::{CategoryId, MealId};
    use serde_json::json;

    const BASE: &str = "https://www.themealdb.com/api/json/v1/1/";

    fn client(stub: &Arc<StubTransport>) -> ApiClient {
        ApiClient::new(stub.clone(), GatewayConfig::default())
    }

    fn dessert() -> MealCategory {
        MealCategory {
            id: CategoryId::new("3"),
            name: "Dessert".into(),
            thumbnail_url: "https://www.themealdb.com/images/category/dessert.png".into(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn fetches_categories_in_response_order() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(
            format!("{BASE}categories.php"),
            200,
            json!({"categories": [
                {"idCategory": "1", "strCategory": "Beef", "strCategoryThumb": "", "strCategoryDescription": ""},
                {"idCategory": "3", "strCategory": "Dessert", "strCategoryThumb": "", "strCategoryDescription": ""}
            ]}),
        );

        let categories = client(&stub).fetch_categories().await.unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Beef", "Dessert"]);
    }

    #[tokio::test]
    async fn sends_accept_header_and_category_query() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(
            format!("{BASE}filter.php?c=Dessert"),
            200,
            json!({"meals": [{"idMeal": "53049", "strMeal": "Apam balik", "strMealThumb": ""}]}),
        );

        let meals = client(&stub).fetch_meals(&dessert()).await.unwrap();
        assert_eq!(meals[0].id, MealId::new("53049"));

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].headers().get("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn unknown_meal_yields_no_details() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(format!("{BASE}lookup.php?i=0"), 200, json!({"meals": null}));

        let details = client(&stub)
            .fetch_meal_details(&MealId::new("0"))
            .await
            .unwrap();
        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_a_server_error() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(format!("{BASE}categories.php"), 500, json!({}));

        let error = client(&stub).fetch_categories().await.unwrap_err();
        assert!(matches!(error, ApiError::Server { status: 500, .. }));
    }

    #[tokio::test]
    async fn mismatched_payload_is_a_decode_error() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(
            format!("{BASE}categories.php"),
            200,
            json!({"categories": [{"idCategory": 3}]}),
        );

        let error = client(&stub).fetch_categories().await.unwrap_err();
        assert!(error.is_decode());
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        let stub = Arc::new(StubTransport::new());
        stub.fail(
            format!("{BASE}categories.php"),
            HttpError::ConnectionError {
                host: "www.themealdb.com".into(),
                message: "offline".into(),
            },
        );

        let error = client(&stub).fetch_categories().await.unwrap_err();
        assert!(error.is_transport());
    }
}
