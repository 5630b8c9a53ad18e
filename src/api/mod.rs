//! Backend API integration module.
//!
//! This module provides the HTTP client for the video generation backend:
//! submitting generation requests, checking server health, and downloading
//! rendered videos to disk.

mod client;

pub use client::{
    ApiError, GeneratorClient, HealthResponse, JobResponse, DEFAULT_ERROR_MESSAGE,
    DEFAULT_SERVER_URL, SERVER_URL_ENV,
};
