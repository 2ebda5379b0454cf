//! HTTP front end: public portfolio pages plus the CV PDF endpoint.

pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod state;
