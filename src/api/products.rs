use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, CreatedResponse, MessageResponse, ProductDto};
use crate::db::ProductFields;

pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let rows = state
        .products
        .list()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(rows.into_iter().map(ProductDto::from).collect()))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<CreatedResponse>, ApiError> {
    let (fields, image_path) = read_product_form(&state, multipart).await?;

    let id = state
        .products
        .create(fields, image_path)
        .await
        .map_err(|e| ApiError::WriteFailed(e.to_string()))?;

    Ok(Json(CreatedResponse {
        message: "created".to_string(),
        id,
    }))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let (fields, image_path) = read_product_form(&state, multipart).await?;

    state
        .products
        .update(id, fields, image_path)
        .await
        .map_err(|e| ApiError::WriteFailed(e.to_string()))?;

    Ok(Json(MessageResponse {
        message: "updated".to_string(),
    }))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .products
        .delete(id)
        .await
        .map_err(|e| ApiError::WriteFailed(e.to_string()))?;

    Ok(Json(MessageResponse {
        message: "deleted".to_string(),
    }))
}

/// Reads the multipart product form. Text fields land in
/// [`ProductFields`] as-is (missing ones stay empty, an unparseable
/// stock becomes 0); a non-empty `image` file part is persisted through
/// the upload service and its public path returned. No file part means
/// `None`, which callers treat as "image absent", not as an error.
async fn read_product_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(ProductFields, Option<String>), ApiError> {
    let mut fields = ProductFields::default();
    let mut image_path = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let original_filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(format!("Failed to read image part: {e}")))?;

            if original_filename.is_empty() && data.is_empty() {
                continue;
            }

            let path = state
                .uploads
                .save_upload(&name, &original_filename, &data)
                .await
                .map_err(|e| ApiError::WriteFailed(e.to_string()))?;
            image_path = Some(path);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::validation(format!("Failed to read field {name}: {e}")))?;

        match name.as_str() {
            "brand" => fields.brand = value,
            "name" => fields.name = value,
            "origin" => fields.origin = value,
            "type" => fields.product_type = value,
            "tar" => fields.tar = value,
            "price" => fields.price = value,
            "stock" => fields.stock = value.parse().unwrap_or_default(),
            _ => {}
        }
    }

    Ok((fields, image_path))
}
