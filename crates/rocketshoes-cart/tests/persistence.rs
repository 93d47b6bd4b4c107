//! Cart persistence through a file-backed store.

use async_trait::async_trait;
use rocketshoes_cache::{Cache, FileStore, KeyValueStore};
use rocketshoes_cart::{
    CartStore, Notice, Notifier, StoreConfig, TracingNotifier, UpdateProductAmount,
};
use rocketshoes_commerce::{Product, ProductId, Stock};
use rocketshoes_data::{CatalogApi, FetchError};
use serde_json::json;
use std::sync::{Arc, Mutex};

struct ShoeCatalog;

#[async_trait]
impl CatalogApi for ShoeCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        Ok(Stock::new(product_id, 10))
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        let payload = json!({
            "id": product_id.get(),
            "title": format!("Tênis {product_id}"),
            "price": 100.0 + product_id.get() as f64,
            "image": format!("https://cdn/tenis{product_id}.jpg"),
            "brand": "Rocket",
        });
        serde_json::from_value(payload).map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

#[derive(Default)]
struct Notices(Mutex<Vec<Notice>>);

impl Notifier for Notices {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

fn open(dir: &std::path::Path, notices: Arc<Notices>) -> CartStore<ShoeCatalog, Arc<Notices>> {
    let cache = Cache::new(FileStore::open(dir).unwrap());
    CartStore::open(ShoeCatalog, cache, notices, StoreConfig::default())
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let notices = Arc::new(Notices::default());

    let original = {
        let store = open(dir.path(), notices.clone());
        store.add_product(ProductId::new(3)).await.unwrap();
        store.add_product(ProductId::new(1)).await.unwrap();
        store.add_product(ProductId::new(2)).await.unwrap();
        store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 4,
            })
            .await
            .unwrap();
        store.remove_product(ProductId::new(2)).unwrap();
        store.cart()
    };

    let store = open(dir.path(), notices.clone());
    let restored = store.cart();

    assert_eq!(restored, original);
    let ids: Vec<u64> = restored.items().iter().map(|i| i.id.get()).collect();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(restored.amount_of(ProductId::new(1)), 4);
    assert!(notices.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_persisted_layout_is_product_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(dir.path(), Arc::new(Notices::default()));
    store.add_product(ProductId::new(7)).await.unwrap();

    let raw = FileStore::open(dir.path())
        .unwrap()
        .get("@RocketShoes:cart")
        .unwrap()
        .expect("cart written");
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();

    assert_eq!(
        value,
        json!([{
            "id": 7,
            "title": "Tênis 7",
            "price": 107.0,
            "image": "https://cdn/tenis7.jpg",
            "brand": "Rocket",
            "amount": 1,
        }])
    );
}

#[tokio::test]
async fn test_corrupt_file_fails_closed_then_recovers() {
    let dir = tempfile::tempdir().unwrap();
    FileStore::open(dir.path())
        .unwrap()
        .set("@RocketShoes:cart", b"not json at all")
        .unwrap();

    let cache = Cache::new(FileStore::open(dir.path()).unwrap());
    let store = CartStore::open(ShoeCatalog, cache, TracingNotifier, StoreConfig::default());
    assert!(store.cart().is_empty());

    store.add_product(ProductId::new(1)).await.unwrap();
    assert!(store.remove_product(ProductId::new(5)).is_err());

    let reopened = open(dir.path(), Arc::new(Notices::default()));
    assert_eq!(reopened.cart().len(), 1);
}
