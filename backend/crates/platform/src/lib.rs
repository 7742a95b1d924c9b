//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Client identification (origin address, client agent)
//! - Cryptographic utilities (CSPRNG bytes, opaque tokens)

pub mod client;
pub mod crypto;
pub mod password;
