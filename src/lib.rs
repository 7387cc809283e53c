pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod interpret;
pub mod models;
pub mod render;
pub mod screen;
pub mod selection;
