//! 产品请求体校验
//!
//! 按固定顺序检查字段，只报告第一个不满足的规则。

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use super::model::ProductInput;
use crate::core::{extract::JsonBody, ApiError};

fn required_text<'a>(body: &'a Value, field: &str, message: &str) -> Result<&'a str, ApiError> {
    match body.get(field).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ApiError::validation(message)),
    }
}

/// 校验候选产品字段
///
/// 1. `name` 非空字符串
/// 2. `description` 非空字符串
/// 3. `price` 为数字且大于 0
/// 4. `category` 非空字符串
/// 5. `inStock` 为布尔值
pub fn validate_product(body: &Value) -> Result<ProductInput, ApiError> {
    let name = required_text(body, "name", "Name is required and cannot be blank")?;
    let description = required_text(
        body,
        "description",
        "Description is required and cannot be blank",
    )?;

    let price = match body.get("price").and_then(Value::as_f64) {
        Some(price) if price > 0.0 => price,
        _ => {
            return Err(ApiError::validation(
                "Price is required and must be a positive number",
            ))
        }
    };

    let category = required_text(body, "category", "Category is required and cannot be blank")?;

    let in_stock = body
        .get("inStock")
        .and_then(Value::as_bool)
        .ok_or_else(|| ApiError::validation("inStock must be a boolean value"))?;

    Ok(ProductInput {
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        in_stock,
    })
}

/// 已解析并通过校验的产品请求体
#[derive(Debug, Clone)]
pub struct ValidatedProduct(pub ProductInput);

#[async_trait]
impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(body) = JsonBody::from_request(req, state).await?;
        validate_product(&body).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "name": "  Desk Lamp ",
            "description": "LED lamp",
            "price": 25.5,
            "category": "home",
            "inStock": true
        })
    }

    fn message_of(body: &Value) -> String {
        validate_product(body).unwrap_err().message()
    }

    #[test]
    fn test_valid_body_keeps_untrimmed_text() {
        let input = validate_product(&valid_body()).unwrap();
        assert_eq!(input.name, "  Desk Lamp ");
        assert_eq!(input.price, 25.5);
        assert!(input.in_stock);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut body = valid_body();
        body["name"] = json!("   ");
        assert_eq!(message_of(&body), "Name is required and cannot be blank");
    }

    #[test]
    fn test_non_string_description_rejected() {
        let mut body = valid_body();
        body["description"] = json!(42);
        assert_eq!(message_of(&body), "Description is required and cannot be blank");
    }

    #[test]
    fn test_price_must_be_positive_number() {
        for price in [json!(0), json!(-3), json!("10"), Value::Null] {
            let mut body = valid_body();
            body["price"] = price;
            assert_eq!(
                message_of(&body),
                "Price is required and must be a positive number"
            );
        }
    }

    #[test]
    fn test_in_stock_must_be_boolean() {
        let mut body = valid_body();
        body["inStock"] = json!("true");
        assert_eq!(message_of(&body), "inStock must be a boolean value");
    }

    #[test]
    fn test_only_first_failure_reported() {
        let body = json!({ "price": -1 });
        assert_eq!(message_of(&body), "Name is required and cannot be blank");

        let body = json!({ "name": "x", "description": "y", "category": "" });
        assert_eq!(
            message_of(&body),
            "Price is required and must be a positive number"
        );
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = validate_product(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.name(), "ValidationError");
    }
}
