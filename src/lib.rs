//! Prenoms server library.
//!
//! Lets future parents pick a baby name together: users propose names,
//! invite each other to games and vote until a shortlist everyone agrees on
//! emerges. Identity comes from a header set by a trusted reverse proxy.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
