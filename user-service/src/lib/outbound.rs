pub mod repositories;
pub mod token_store;
