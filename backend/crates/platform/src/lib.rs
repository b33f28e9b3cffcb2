//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Runtime environment mode (development / production)
//! - Password hashing (Argon2id with per-call random salt)
//! - CORS origin negotiation middleware

pub mod config;
pub mod cors;
pub mod password;
