use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::models::ProductDraft;

const REQUIRED_FIELDS: &str = "Required fields: name, description, price, category";

/// Write-payload extractor for the create and update routes. Rejects the
/// request with a 400 before the handler runs when a required field is
/// missing or of the wrong type.
pub struct ValidProduct(pub ProductDraft);

#[async_trait]
impl<S> FromRequest<S> for ValidProduct
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|_| AppError::Validation(REQUIRED_FIELDS.to_string()))?;
        parse_product_body(&body).map(ValidProduct)
    }
}

/// Presence/type checks over the raw JSON body. `name`, `description` and
/// `category` must be non-empty strings; `price` must be a JSON number
/// (numeric strings don't count). `inStock` is the one lenient field:
/// absent or non-boolean coerces to `true`.
pub fn parse_product_body(body: &Value) -> Result<ProductDraft, AppError> {
    let name = non_empty_string(body, "name");
    let description = non_empty_string(body, "description");
    let category = non_empty_string(body, "category");
    let price = body.get("price").and_then(Value::as_f64);

    match (name, description, price, category) {
        (Some(name), Some(description), Some(price), Some(category)) => Ok(ProductDraft {
            name,
            description,
            price,
            category,
            in_stock: body.get("inStock").and_then(Value::as_bool).unwrap_or(true),
        }),
        _ => Err(AppError::Validation(REQUIRED_FIELDS.to_string())),
    }
}

fn non_empty_string(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
