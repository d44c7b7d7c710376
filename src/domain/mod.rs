//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`error`] - Store and service error taxonomy
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. [`crate::application::services::LinkService::redirect`] resolves the code
//! 2. A [`click_event::ClickEvent`] is pushed to a bounded channel (non-blocking)
//! 3. [`click_worker::run_click_worker`] applies the increment with retry
//! 4. The counter is updated via [`repositories::LinkRepository::increment_clicks`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod error;
pub mod repositories;
