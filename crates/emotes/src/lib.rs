//! Emotes service: CRUD over chat emotes stored in DynamoDB.

pub mod app;
pub mod config;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod state;
pub mod storage;
