pub mod config;
pub mod generator;
pub mod objects;
pub mod provider;
pub mod store;
