//! Authentication module for managing admin sessions and access control.
//!
//! This module provides the public interface for session-related
//! functionality: login, token refresh, logout, password reset, and the
//! authorization middleware protecting resource routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod session_store;
