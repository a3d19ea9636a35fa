//! Filesystem image persistence and the seeded pose template catalog.

pub mod images;
pub mod templates;

pub use images::FsImageStorage;
pub use templates::SeededTemplateCatalog;
