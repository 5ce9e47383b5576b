//! Core domain types
//!
//! These types represent the catalog and webhook entities after they have
//! been validated at the REST boundary. Client, store and CLI code only ever
//! see these, never raw wire records.

pub mod category;
pub mod notification;
pub mod resource;
pub mod webhook;
