pub mod account_service;
pub use account_service::{AccountError, AccountInfo, AccountService};

pub mod account_service_impl;
pub use account_service_impl::SeaOrmAccountService;

pub mod product_service;
pub use product_service::{ProductError, ProductService};

pub mod product_service_impl;
pub use product_service_impl::SeaOrmProductService;

pub mod upload;
pub use upload::UploadService;
