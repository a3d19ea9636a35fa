pub mod exports;
pub mod images;
pub mod poses;
pub mod templates;
pub mod transformations;
