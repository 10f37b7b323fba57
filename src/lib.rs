//! Management-screen list controller for the clinic admin platform.
//!
//! With only the `data` feature the crate exposes the domain model, forms and
//! pagination math. The `client` feature adds the controller, the HTTP
//! collection and the screen services used by the `clinic-admin` binary.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod pagination;

#[cfg(feature = "client")]
pub mod controller;
#[cfg(feature = "client")]
mod error_conversions;
#[cfg(feature = "client")]
pub mod export;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod remote;
#[cfg(feature = "client")]
pub mod services;
