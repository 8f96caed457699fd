//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, validation and letter calls into use cases.
//! - Keep the CLI decoupled from storage and template details.

pub mod donor_service;
