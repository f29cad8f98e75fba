//! HTTP surface for placesim.

pub mod rest;

pub use rest::RestApi;
