//! Use-case service layer.
//!
//! # Responsibility
//! - Orchestrate tree operations and persistence into one command API.
//! - Keep the presentation layer decoupled from storage details.

pub mod chart_service;
