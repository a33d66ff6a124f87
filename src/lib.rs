pub mod cli;
pub mod config;
pub mod controller;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod notice;
pub mod store;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::DirectoryController;
pub use store::ContactStore;
