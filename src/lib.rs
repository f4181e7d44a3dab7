pub mod audit;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod reports;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;
