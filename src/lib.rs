//! NavSense - Lead-generation service for simulated website analyses
//!
//! A visitor submits a website URL, receives a simulated navigation clarity
//! and accessibility analysis, and unlocks the full report by leaving their
//! contact details.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
