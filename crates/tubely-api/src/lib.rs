//! Tubely API Library
//!
//! HTTP handlers, authentication, the upload-and-publish services and
//! application setup.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

pub mod auth;
pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::publish::{ThumbnailPublisher, VideoPublisher};
