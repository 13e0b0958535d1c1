//! Client-side core of the AceIt exam-preparation tracker.
//!
//! The interesting parts are the typed plan model (normalized once at the
//! service boundary), the Monday-aligned week grid, the slot layout
//! geometry, and the completion workflow state machine. The binary in
//! `main.rs` is a thin terminal front end over these.

pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod grid;
pub mod models;
pub mod render;
pub mod service;
pub mod stats;
pub mod timer;
pub mod workflow;
