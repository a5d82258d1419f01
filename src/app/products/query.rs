//! 产品查询：过滤、搜索、分页和统计
//!
//! 这里的函数都只读取一份产品快照，不接触存储本身。

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use super::model::Product;
use crate::core::ApiError;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// `GET /api/products` 的查询参数
///
/// `page` 和 `limit` 以字符串接收：缺省、非数字或非正数时回退到默认值，
/// 而不是拒绝请求。`limit` 没有上限。
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

/// 同名参数重复出现时取第一个
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

impl ListParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            category: first_value(pairs, "category"),
            search: first_value(pairs, "search"),
            page: first_value(pairs, "page"),
            limit: first_value(pairs, "limit"),
        }
    }

    pub fn page(&self) -> usize {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> usize {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

/// `GET /api/products/search` 的查询参数
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            q: first_value(pairs, "q"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<Product>,
    pub count: usize,
}

/// 分类计数，按分类首次出现的顺序序列化为 JSON 对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts(Vec<(String, usize)>);

impl CategoryCounts {
    fn add(&mut self, category: &str) {
        match self.0.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.0.push((category.to_string(), 1)),
        }
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    pub categories: CategoryCounts,
    pub average_price: f64,
    pub price_range: PriceRange,
}

fn matches_term(product: &Product, term_lower: &str) -> bool {
    product.name.to_lowercase().contains(term_lower)
        || product.description.to_lowercase().contains(term_lower)
}

/// 依次应用分类过滤、关键字过滤和分页
pub fn list_products(products: &[Product], params: &ListParams) -> ProductPage {
    let category = non_empty(params.category.as_deref()).map(str::to_lowercase);
    let search = non_empty(params.search.as_deref()).map(str::to_lowercase);

    let filtered: Vec<&Product> = products
        .iter()
        .filter(|p| {
            category
                .as_deref()
                .map_or(true, |c| p.category.to_lowercase() == c)
        })
        .filter(|p| search.as_deref().map_or(true, |term| matches_term(p, term)))
        .collect();

    let page = params.page();
    let limit = params.limit();
    let start = (page - 1).saturating_mul(limit);

    let total_items = filtered.len();
    let page_items = filtered
        .into_iter()
        .skip(start)
        .take(limit)
        .cloned()
        .collect();

    ProductPage {
        products: page_items,
        pagination: Pagination {
            current_page: page,
            total_pages: total_items.div_ceil(limit),
            total_items,
            items_per_page: limit,
        },
    }
}

/// 按名称或描述做不区分大小写的子串匹配，`q` 必填
pub fn search_products(products: &[Product], q: Option<&str>) -> Result<SearchResults, ApiError> {
    let query = non_empty(q)
        .ok_or_else(|| ApiError::validation("Search query parameter 'q' is required"))?;
    let term = query.to_lowercase();

    let results: Vec<Product> = products
        .iter()
        .filter(|p| matches_term(p, &term))
        .cloned()
        .collect();

    Ok(SearchResults {
        query: query.to_string(),
        count: results.len(),
        results,
    })
}

/// 基于完整列表（不做过滤）计算统计数据；空列表时数值均为 0
pub fn compute_stats(products: &[Product]) -> ProductStats {
    let mut stats = ProductStats {
        total_products: products.len(),
        in_stock: products.iter().filter(|p| p.in_stock).count(),
        out_of_stock: products.iter().filter(|p| !p.in_stock).count(),
        ..ProductStats::default()
    };

    if products.is_empty() {
        return stats;
    }

    for product in products {
        stats.categories.add(&product.category);
    }

    let sum: f64 = products.iter().map(|p| p.price).sum();
    stats.average_price = sum / products.len() as f64;
    stats.price_range = PriceRange {
        min: products.iter().map(|p| p.price).fold(f64::INFINITY, f64::min),
        max: products
            .iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max),
    };

    stats
}
