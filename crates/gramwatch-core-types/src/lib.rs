//! Core types shared across GramWatch facilities
//!
//! This crate provides foundational types used by the monitoring core,
//! the persistence layer, and the platform collaborators:
//!
//! - **Identity**: opaque, case-sensitive username handle
//! - **RelationKind**: followers (inbound) vs followees (outbound)
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction

pub mod identity;
pub mod relation;
pub mod sensitive;

pub use identity::Identity;
pub use relation::RelationKind;
pub use sensitive::Sensitive;
