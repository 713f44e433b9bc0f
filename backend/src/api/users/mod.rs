//! Admin-user management: registration plus authenticated user CRUD.

pub mod handlers;
pub mod routes;
