//! HTTP surface for Simple Blog authentication
//!
//! Exposes registration, login, token rotation and logout over actix-web,
//! plus the bearer-token middleware downstream services mount in front of
//! their own handlers.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
