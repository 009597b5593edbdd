//! # Subscription bridge server
//! This crate hosts the HTTP server of the subscription bridge. It is responsible for:
//! * Running the storefront's OAuth handshake and remembering which storefronts have installed the app.
//! * Authenticating storefront requests by their query-string signature.
//! * Forwarding subscription operations to the subscription backend, and returning its responses unmodified.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/`, `/auth`, `/auth/callback`: The app landing page and the OAuth handshake.
//! * `/subscriptions/*`: Signed subscription operations. See [routes](routes/index.html).
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod middleware;
pub mod oauth_routes;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
