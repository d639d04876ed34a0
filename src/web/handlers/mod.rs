//! HTTP request handlers organized by domain

pub mod auth;
pub mod channels;
pub mod devices;
pub mod health;
pub mod playlist;
