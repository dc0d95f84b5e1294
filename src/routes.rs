// routes.rs - static dispatch table
//
// Three outcomes per request: exact (method, path) match runs the handler,
// a known path with another method runs method_not_allowed, and anything
// else runs not_found. HEAD is a distinct method here: GET routes do not
// answer it.

use axum::{
    handler::Handler,
    routing::{get, post, put, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::handlers::{self, AppState};

/// Build the full application router. Built once at startup and shared
/// read-only by every connection.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .merge(elevated_routes())
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(server.write_timeout()))
                .layer(RequestBodyTimeoutLayer::new(server.read_timeout())),
        )
        .with_state(state)
}

/// Attach the wrong-method fallback to a route's method set
fn known_path(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handlers::method_not_allowed)
}

/// GET without axum's implicit HEAD
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    known_path(get(handler).head(handlers::method_not_allowed))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/time", get_only(handlers::current_time))
        .route(
            "/username/:id",
            get(handlers::user_get_by_id)
                .head(handlers::id_method_not_allowed)
                .fallback(handlers::id_method_not_allowed),
        )
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/logged", get_only(handlers::user_list_logged))
        .route("/login", known_path(post(handlers::session_login)))
        .route("/logout", known_path(post(handlers::session_logout)))
}

fn elevated_routes() -> Router<AppState> {
    Router::new()
        .route("/add", known_path(post(handlers::user_add)))
        .route("/getall", get_only(handlers::user_list_all))
        .route("/getid/:username", get_only(handlers::user_get_by_username))
        .route("/update", known_path(put(handlers::user_update)))
}
