//! GramWatch Instagram - platform collaborator
//!
//! Blocking web-API client implementing the core's `PlatformSession` and
//! `ProfileHandle` traits: csrf-bootstrapped login, profile resolution,
//! and paginated GraphQL follow-edge retrieval materialized into identity
//! sets.

pub mod graphql;
pub mod session;

pub use session::{InstagramClient, InstagramProfile};
