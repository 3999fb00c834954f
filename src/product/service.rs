use super::model::{NewProduct, ProductRequest, ProductResponse};
use super::observer::{ProductObserver, TracingObserver};
use super::repository::ProductRepository;
use crate::error::Result;
use std::sync::Arc;

/// Maps product requests onto storage and stored products onto responses.
///
/// Storage failures are returned exactly as the repository produced them.
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    observer: Arc<dyn ProductObserver>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            repository,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProductObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn create_product(&self, request: ProductRequest) -> Result<()> {
        let product = self.repository.save(NewProduct::from(request)).await?;
        self.observer.product_saved(&product);
        Ok(())
    }

    pub async fn get_all_products(&self) -> Result<Vec<ProductResponse>> {
        let products = self.repository.find_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorefrontError;
    use crate::infrastructure::MemoryDatabase;
    use crate::product::model::Product;
    use crate::product::observer::NoopObserver;
    use crate::product::repository::MemoryProductRepository;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn request(name: &str, price: i64) -> ProductRequest {
        ProductRequest {
            name: name.to_string(),
            description: name.to_string(),
            price: Decimal::from(price),
        }
    }

    fn memory_service() -> ProductService {
        let repo = MemoryProductRepository::new(MemoryDatabase::open());
        ProductService::new(Arc::new(repo)).with_observer(Arc::new(NoopObserver))
    }

    #[derive(Default)]
    struct RecordingObserver {
        saved: Mutex<Vec<String>>,
    }

    impl ProductObserver for RecordingObserver {
        fn product_saved(&self, product: &Product) {
            self.saved.lock().unwrap().push(product.id.clone());
        }
    }

    /// Accepts reads but refuses every write.
    struct ReadOnlyRepository {
        inner: MemoryProductRepository,
    }

    #[async_trait]
    impl ProductRepository for ReadOnlyRepository {
        async fn save(&self, _product: NewProduct) -> Result<Product> {
            Err(StorefrontError::storage("connection refused"))
        }

        async fn find_all(&self) -> Result<Vec<Product>> {
            self.inner.find_all().await
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let service = memory_service();
        assert!(service.get_all_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_list_iphone() {
        let service = memory_service();
        service
            .create_product(request("iPhone 13", 1200))
            .await
            .unwrap();

        let products = service.get_all_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "iPhone 13");
        assert_eq!(products[0].description, "iPhone 13");
        assert_eq!(products[0].price, Decimal::from(1200));
        assert!(!products[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_each_create_adds_exactly_one_fresh_product() {
        let service = memory_service();
        let mut seen_ids = HashSet::new();

        for (i, name) in ["keyboard", "mouse", "monitor"].iter().enumerate() {
            service.create_product(request(name, 50)).await.unwrap();

            let products = service.get_all_products().await.unwrap();
            assert_eq!(products.len(), i + 1);

            let fresh: Vec<_> = products
                .iter()
                .filter(|p| !seen_ids.contains(&p.id))
                .collect();
            assert_eq!(fresh.len(), 1);
            assert_eq!(fresh[0].name, *name);
            assert_eq!(fresh[0].price, Decimal::from(50));
            seen_ids.insert(fresh[0].id.clone());
        }
    }

    #[tokio::test]
    async fn test_two_creates_yield_distinct_ids() {
        let service = memory_service();
        service.create_product(request("first", 1)).await.unwrap();
        service.create_product(request("second", 2)).await.unwrap();

        let products = service.get_all_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_ne!(products[0].id, products[1].id);

        // No ordering guarantee; match by name.
        for (name, price) in [("first", 1), ("second", 2)] {
            let product = products.iter().find(|p| p.name == name).unwrap();
            assert_eq!(product.description, name);
            assert_eq!(product.price, Decimal::from(price));
        }
    }

    #[tokio::test]
    async fn test_observer_sees_assigned_id() {
        let observer = Arc::new(RecordingObserver::default());
        let repo = MemoryProductRepository::new(MemoryDatabase::open());
        let service = ProductService::new(Arc::new(repo)).with_observer(observer.clone());

        service.create_product(request("lamp", 30)).await.unwrap();

        let listed = service.get_all_products().await.unwrap();
        let saved = observer.saved.lock().unwrap();
        assert_eq!(*saved, vec![listed[0].id.clone()]);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_without_ghost_record() {
        let observer = Arc::new(RecordingObserver::default());
        let repo = ReadOnlyRepository {
            inner: MemoryProductRepository::new(MemoryDatabase::open()),
        };
        let service = ProductService::new(Arc::new(repo)).with_observer(observer.clone());

        let err = service
            .create_product(request("ghost", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Storage(ref msg) if msg == "connection refused"));

        assert!(service.get_all_products().await.unwrap().is_empty());
        assert!(observer.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_propagates() {
        let db = MemoryDatabase::open();
        let service = ProductService::new(Arc::new(MemoryProductRepository::new(db.clone())));
        db.disconnect();

        assert!(service.get_all_products().await.unwrap_err().is_storage());
    }

    // Known limitation: requests are not validated.
    #[tokio::test]
    async fn test_unvalidated_input_is_stored_as_given() {
        let service = memory_service();
        service
            .create_product(ProductRequest {
                name: String::new(),
                description: String::new(),
                price: Decimal::from(-5),
            })
            .await
            .unwrap();

        let products = service.get_all_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert!(products[0].name.is_empty());
        assert_eq!(products[0].price, Decimal::from(-5));
    }
}
