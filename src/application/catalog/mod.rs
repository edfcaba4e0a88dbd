mod catalog_service;
mod errors;
mod seed;

pub use catalog_service::{
    ServiceDependencies, check_out_book, get_book, list_books, register_book, remove_book,
    return_book, update_book,
};
pub use errors::{CatalogApplicationError, Result};
pub use seed::seed_catalog;
