//! Domain service for the product catalog.

use thiserror::Error;

use crate::db::ProductFields;
use crate::entities::products;

/// Errors specific to catalog operations. Every failure here is a
/// storage failure; the service applies no field validation by design.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    Storage(String),
}

impl From<anyhow::Error> for ProductError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Domain service trait for product CRUD.
#[async_trait::async_trait]
pub trait ProductService: Send + Sync {
    /// All products, newest first. Full table scan, no pagination.
    async fn list(&self) -> Result<Vec<products::Model>, ProductError>;

    /// Inserts a product and returns the generated id. `image_path` is
    /// the stored upload path, or `None` when no file was supplied
    /// (persisted as an empty string).
    async fn create(
        &self,
        fields: ProductFields,
        image_path: Option<String>,
    ) -> Result<i32, ProductError>;

    /// Overwrites all scalar fields. With `Some`, the image path is
    /// replaced as well; with `None` the stored image is left untouched.
    /// Updating an unknown id succeeds without error.
    async fn update(
        &self,
        id: i32,
        fields: ProductFields,
        image_path: Option<String>,
    ) -> Result<(), ProductError>;

    /// Removes a product. Deleting an unknown id succeeds without error.
    async fn delete(&self, id: i32) -> Result<(), ProductError>;
}
