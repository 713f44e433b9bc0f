//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations and orchestrate interactions between different parts of the
//! application, such as talking to the commerce API or sending mail.

pub mod activity_service;
pub mod commerce;
pub mod email_service;
pub mod user_service;
