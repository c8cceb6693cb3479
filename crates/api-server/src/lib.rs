#![warn(clippy::unwrap_used)]

pub mod auth;
pub mod campaign_rest;
pub mod contact_rest;
pub mod draft_rest;
pub mod error;
pub mod followup_rest;
pub mod rest;
pub mod server;
pub mod swagger;
pub mod template_rest;

pub use server::ApiServer;
pub use swagger::ApiDoc;
