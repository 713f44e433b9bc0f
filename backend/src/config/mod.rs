//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, JWT secrets, commerce API credentials, and
//! SMTP settings.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub refresh_expires_in_days: u64,
    pub server_port: u16,
    pub commerce: CommerceConfig,
    pub email: EmailConfig,
}

/// Connection settings for the external commerce REST API.
#[derive(Debug, Clone)]
pub struct CommerceConfig {
    pub site_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

/// SMTP transport and addressing settings for notification mail.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub notify_address: String,
    /// Public URL of the portal frontend, used in password-reset links.
    pub portal_base_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "900".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let refresh_expires_in_days = env::var("REFRESH_EXPIRES_IN_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("REFRESH_EXPIRES_IN_DAYS must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let commerce = CommerceConfig {
            site_url: env::var("STORE_SITE_URL").context("STORE_SITE_URL not set")?,
            consumer_key: env::var("STORE_CONSUMER_KEY").context("STORE_CONSUMER_KEY not set")?,
            consumer_secret: env::var("STORE_CONSUMER_SECRET")
                .context("STORE_CONSUMER_SECRET not set")?,
        };

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid number")?;

        let email = EmailConfig {
            smtp_host: env::var("SMTP_HOST").context("SMTP_HOST not set")?,
            smtp_port,
            smtp_username: env::var("SMTP_USERNAME").context("SMTP_USERNAME not set")?,
            smtp_password: env::var("SMTP_PASSWORD").context("SMTP_PASSWORD not set")?,
            from_address: env::var("MAIL_FROM").context("MAIL_FROM not set")?,
            notify_address: env::var("MAIL_TO").context("MAIL_TO not set")?,
            portal_base_url: env::var("PORTAL_BASE_URL")
                .unwrap_or_else(|_| "https://storeportal.cleanair.com".to_string()),
        };

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            refresh_expires_in_days,
            server_port,
            commerce,
            email,
        })
    }
}
