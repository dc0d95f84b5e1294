// handlers/mod.rs - 3-Tier Handler Architecture
//
// Authorization rides in the request body, so the tiers differ only in
// which store predicate the actor must satisfy:
// Public (no actor) → Protected (valid actor) → Elevated (admin actor)

use std::sync::Arc;

use axum::http::{header, HeaderMap};

use crate::config::RoutingConfig;
use crate::store::UserStore;

pub mod elevated; // Admin actor required: add, getall, getid, update
pub mod fallback; // Unmatched path and wrong method
pub mod protected; // Any valid actor: logged, login, logout
pub mod public; // No actor: time, numeric id lookup

pub use elevated::*;
pub use fallback::{id_method_not_allowed, method_not_allowed, not_found};
pub use protected::*;
pub use public::*;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub strict_method_status: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, routing: &RoutingConfig) -> Self {
        Self {
            store,
            strict_method_status: routing.strict_method_status,
        }
    }
}

/// Host header of the request, for diagnostics only
pub(crate) fn request_host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
}
