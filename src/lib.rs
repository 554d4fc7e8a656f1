//! Showroom - storefront core for a car dealership.
//!
//! Two parts: a configuration engine that prices a base vehicle plus
//! selected options, and a realtime notification client that turns
//! inventory and user events into on-screen notices and local broadcasts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
