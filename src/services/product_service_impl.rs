//! `SeaORM` implementation of the `ProductService` trait.

use async_trait::async_trait;

use crate::db::{ProductFields, Store};
use crate::entities::products;
use crate::services::product_service::{ProductError, ProductService};

pub struct SeaOrmProductService {
    store: Store,
}

impl SeaOrmProductService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductService for SeaOrmProductService {
    async fn list(&self) -> Result<Vec<products::Model>, ProductError> {
        let rows = self.store.list_products().await?;
        Ok(rows)
    }

    async fn create(
        &self,
        fields: ProductFields,
        image_path: Option<String>,
    ) -> Result<i32, ProductError> {
        let image = image_path.unwrap_or_default();
        let id = self.store.create_product(&fields, &image).await?;
        Ok(id)
    }

    async fn update(
        &self,
        id: i32,
        fields: ProductFields,
        image_path: Option<String>,
    ) -> Result<(), ProductError> {
        self.store
            .update_product(id, &fields, image_path.as_deref())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ProductError> {
        self.store.delete_product(id).await?;
        Ok(())
    }
}
