//! 产品处理器

use axum::{extract::State, http::StatusCode, response::Json};

use super::{
    model::{DeleteResponse, Product},
    query::{self, ListParams, ProductPage, ProductStats, SearchParams, SearchResults},
    store::ProductStore,
    validation::ValidatedProduct,
};
use crate::core::{
    extract::{ApiPath, ApiQuery},
    ApiError,
};

/// 原样保留的查询参数键值对，允许同名键重复
type QueryPairs = Vec<(String, String)>;

#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
}

impl AppState {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }
}

/// 列表，支持 category / search / page / limit
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(pairs): ApiQuery<QueryPairs>,
) -> Result<Json<ProductPage>, ApiError> {
    let params = ListParams::from_pairs(&pairs);
    let products = state.store.list();
    Ok(Json(query::list_products(&products, &params)))
}

pub async fn search_products(
    State(state): State<AppState>,
    ApiQuery(pairs): ApiQuery<QueryPairs>,
) -> Result<Json<SearchResults>, ApiError> {
    let params = SearchParams::from_pairs(&pairs);
    let products = state.store.list();
    let results = query::search_products(&products, params.q.as_deref())?;
    Ok(Json(results))
}

pub async fn product_stats(State(state): State<AppState>) -> Result<Json<ProductStats>, ApiError> {
    let products = state.store.list();
    Ok(Json(query::compute_stats(&products)))
}

pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.store.find_by_id(&id)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedProduct(input): ValidatedProduct,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.store.create(input);
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ValidatedProduct(input): ValidatedProduct,
) -> Result<Json<Product>, ApiError> {
    let product = state.store.update(&id, input)?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let product = state.store.delete(&id)?;
    Ok(Json(DeleteResponse {
        message: "Product deleted successfully".to_string(),
        product,
    }))
}
