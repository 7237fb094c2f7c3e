pub mod import;
pub mod product;
