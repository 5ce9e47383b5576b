//! Tekhub Core
//!
//! Core types and client-side state logic for the Tekton Hub catalog and the
//! dashboard webhooks extension.
//!
//! This crate contains:
//! - Domain types: catalog resources, categories, webhooks, notifications
//! - DTOs: wire records exchanged with the REST backends, validated on the way in
//! - Catalog: filter, search and sort derivation of the displayed resource list
//! - Store: application state mutated through typed actions
//! - Webhook: create-form and table state machines

pub mod catalog;
pub mod domain;
pub mod dto;
pub mod error;
pub mod store;
pub mod webhook;
