//! pixwall domain logic.
//!
//! Everything here is HTTP-agnostic: directory catalogs, the favorites
//! store, the paginator that combines the two, and the gallery session
//! state machine that consumers drive. The `pixwall-api` crate wires these
//! into an axum server.

pub mod catalog;
pub mod error;
pub mod favorites;
pub mod gallery;
pub mod mediapath;
pub mod ordering;
pub mod paginator;
pub mod session;

pub use catalog::{MediaCatalog, MediaEntry, MediaKind};
pub use error::CoreError;
pub use favorites::{FavoritesRecord, FavoritesStore};
pub use paginator::{CatalogPaginator, GalleryEntry, MediaLibrary, PageQuery, PageResult};
