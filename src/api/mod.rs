use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, ProductService, SeaOrmAccountService, SeaOrmProductService, UploadService,
};

mod accounts;
mod error;
mod products;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub products: Arc<dyn ProductService>,

    pub accounts: Arc<dyn AccountService>,

    pub uploads: Arc<UploadService>,
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let products =
        Arc::new(SeaOrmProductService::new(store.clone())) as Arc<dyn ProductService>;
    let accounts =
        Arc::new(SeaOrmAccountService::new(store.clone())) as Arc<dyn AccountService>;
    let uploads = Arc::new(UploadService::new(config.uploads.clone()));

    Ok(Arc::new(AppState {
        config,
        store,
        products,
        accounts,
        uploads,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let uploads_path = state.config.uploads.uploads_path.clone();
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/products", get(products::list_products))
        .route("/products", post(products::create_product))
        .route("/products/{id}", put(products::update_product))
        .route("/products/{id}", delete(products::delete_product))
        .route("/users", get(accounts::list_users))
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/change-password", post(accounts::change_password))
        .route("/health", get(system::get_health))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service("/uploads", tower_http::services::ServeDir::new(uploads_path))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
