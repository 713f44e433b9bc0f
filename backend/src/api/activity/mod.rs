//! Read side of the activity/audit log.

pub mod handlers;
pub mod routes;
