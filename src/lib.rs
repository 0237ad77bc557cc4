//! Leafsense — plant-leaf disease classification backend.
//!
//! A stateless HTTP service: upload a leaf photo, get a diagnosis plus
//! localized treatment and prevention guidance. Each request runs the same
//! single-pass pipeline — image gates, one classifier forward pass,
//! recommendation lookup, optional translation, best-effort reporting.

pub mod api;
pub mod classify;
pub mod config;
pub mod gate;
pub mod notify;
pub mod predict;
pub mod recommend;
pub mod state;
pub mod translate;
