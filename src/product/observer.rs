use super::model::Product;

/// Notified after a product has been persisted.
///
/// Hooks only observe; they cannot change what the service returns.
pub trait ProductObserver: Send + Sync {
    fn product_saved(&self, product: &Product);
}

/// Logs every saved product at INFO.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl ProductObserver for TracingObserver {
    fn product_saved(&self, product: &Product) {
        tracing::info!(product_id = %product.id, "Product {} is saved", product.id);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ProductObserver for NoopObserver {
    fn product_saved(&self, _product: &Product) {}
}
