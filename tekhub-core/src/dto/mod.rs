//! Data Transfer Objects for the REST backends
//!
//! This module contains the wire shapes exchanged with the Hub catalog API and
//! the dashboard webhooks API. Records coming in are converted into domain
//! types with `TryFrom`, which is where malformed payloads are rejected.

pub mod auth;
pub mod category;
pub mod envelope;
pub mod rating;
pub mod resource;
pub mod upload;
pub mod webhook;
