//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the per-entity API domains
//! (products, orders, users, activity log), excluding core authentication
//! routes which are handled separately.

pub mod activity;
pub mod common;
pub mod orders;
pub mod products;
pub mod users;
