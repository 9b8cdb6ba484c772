use serde::Serialize;

use crate::db::UserRow;
use crate::entities::products;
use crate::services::AccountInfo;

#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: i32,
    pub brand: String,
    pub name: String,
    pub origin: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub tar: String,
    pub price: String,
    pub stock: i32,
    pub image: String,
}

impl From<products::Model> for ProductDto {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            brand: model.brand,
            name: model.name,
            origin: model.origin,
            product_type: model.product_type,
            tar: model.tar,
            price: model.price,
            stock: model.stock,
            image: model.image,
        }
    }
}

/// Public user listing row; the password never reaches this layer.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            role: row.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i32,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub message: String,
    pub user: AccountInfo,
}
