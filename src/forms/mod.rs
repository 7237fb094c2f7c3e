pub mod import;
pub mod products;
