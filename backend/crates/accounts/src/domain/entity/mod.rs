//! Entity Module

pub mod ban;
pub mod login_attempt;
pub mod user;
