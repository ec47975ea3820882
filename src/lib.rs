pub mod api;
pub mod app;
pub mod config;
pub mod data_models;
pub mod render;
pub mod view;
