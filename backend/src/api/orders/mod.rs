//! Order proxy: paged listing, single-order reads, writes, and search.

pub mod handlers;
pub mod routes;
