//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into intent-level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod habit_service;
