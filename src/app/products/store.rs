//! 产品内存存储
//!
//! 按插入顺序保存产品列表。内部状态由 `RwLock` 保护，调用方只能通过
//! 这里定义的操作读写，之后可以替换为持久化实现而不影响处理器。

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use uuid::Uuid;

use super::model::{seed_products, Product, ProductInput};
use crate::core::ApiError;

#[derive(Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

fn not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("Product with ID {} not found", id))
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带三条示例数据的存储
    pub fn seeded() -> Self {
        Self::with_products(seed_products())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    // 每次操作都在持锁期间完成，列表在两次操作之间始终一致，可以直接忽略 poison
    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前所有产品的快照
    pub fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Result<Product, ApiError> {
        self.read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub fn create(&self, input: ProductInput) -> Product {
        let mut products = self.write();

        let mut id = Uuid::new_v4().to_string();
        while products.iter().any(|p| p.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let product = Product::from_input(id, input);
        products.push(product.clone());
        debug!(id = %product.id, total = products.len(), "产品已创建");

        product
    }

    /// 替换全部可变字段，保留原 id
    pub fn update(&self, id: &str, input: ProductInput) -> Result<Product, ApiError> {
        let mut products = self.write();

        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        *slot = Product::from_input(slot.id.clone(), input);
        debug!(id = %slot.id, "产品已更新");

        Ok(slot.clone())
    }

    pub fn delete(&self, id: &str) -> Result<Product, ApiError> {
        let mut products = self.write();

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        let removed = products.remove(index);
        debug!(id = %removed.id, total = products.len(), "产品已删除");

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: format!("  {}  ", name),
            description: " A thing ".to_string(),
            price: 9.99,
            category: " misc ".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_seeded_store_has_three_products_in_order() {
        let store = ProductStore::seeded();
        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_create_trims_and_appends() {
        let store = ProductStore::seeded();
        let created = store.create(input("Widget"));

        assert!(!created.id.is_empty());
        assert_eq!(created.name, "Widget");
        assert_eq!(created.description, "A thing");
        assert_eq!(created.category, "misc");
        assert_eq!(store.len(), 4);
        assert_eq!(store.list().last(), Some(&created));
    }

    #[test]
    fn test_created_ids_are_unique() {
        let store = ProductStore::new();
        let a = store.create(input("a"));
        let b = store.create(input("b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_preserves_id() {
        let store = ProductStore::seeded();
        let updated = store.update("2", input("Phone")).unwrap();

        assert_eq!(updated.id, "2");
        assert_eq!(updated.name, "Phone");
        assert_eq!(store.find_by_id("2").unwrap(), updated);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = ProductStore::seeded();
        let err = store.update("nope", input("x")).unwrap_err();
        assert_eq!(err, ApiError::not_found("Product with ID nope not found"));
    }

    #[test]
    fn test_delete_removes_once() {
        let store = ProductStore::seeded();
        let removed = store.delete("1").unwrap();

        assert_eq!(removed.name, "Laptop");
        assert_eq!(store.len(), 2);
        assert!(store.find_by_id("1").is_err());
        assert!(store.delete("1").is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let store = ProductStore::new();
        let handle = store.clone();
        handle.create(input("shared"));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }
}
