//! Data-access layer for the local document store.

pub mod activity_repository;
pub mod note_repository;
pub mod user_repository;
