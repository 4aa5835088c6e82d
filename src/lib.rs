// src/lib.rs

//! Novel Reader API Client Library

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod image;
pub mod models;
