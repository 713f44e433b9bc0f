//! Product catalog proxy: list, read, write, search, variations, and the
//! taxonomy lookups (categories, tags, attributes).

pub mod handlers;
pub mod models;
pub mod routes;
