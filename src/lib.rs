//! vidgen library crate.
//!
//! This module exposes the internal components for integration testing.

// Allow dead_code during development
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod api;
pub mod app;
pub mod config;
pub mod event_loop;
pub mod input;
pub mod request;
pub mod terminal;
pub mod video_config;
