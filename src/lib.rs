pub mod booking;
pub mod commands;
pub mod config;
pub mod database;
pub mod models;
pub mod services;
