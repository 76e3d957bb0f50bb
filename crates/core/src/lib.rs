//! Domain logic for the Troupe staffing backend.
//!
//! This crate has no database or HTTP dependencies. Callers load rows from
//! the store and pass plain values in; every function here is deterministic.

pub mod access;
pub mod capabilities;
pub mod dashboard;
pub mod duration;
pub mod error;
pub mod playlist;
pub mod principal;
pub mod status;
pub mod types;
pub mod validation;
pub mod visibility;
