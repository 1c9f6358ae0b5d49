pub mod models;
pub mod reference;
pub mod store;
