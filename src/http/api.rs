//! JSON endpoints served next to the application shell.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::routing::{Mode, RouteParams};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub instance_id: String,
    pub mode: Mode,
    pub base: String,
    pub mount_target: Option<String>,
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub path: String,
    pub name: String,
    pub component: String,
    /// Href for static routes; `None` when the path needs parameters.
    pub href: Option<String>,
}

/// Connectivity sanity check used by the Ping view.
pub async fn ping() -> Json<&'static str> {
    Json("pong!")
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let root = &state.root;
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        instance_id: root.instance_id().to_string(),
        mode: root.router().mode(),
        base: root.router().base().to_string(),
        mount_target: root.mount_target().map(str::to_string),
        theme: root.theme().name().to_string(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let router = state.root.router();
    let params = RouteParams::new();
    let routes = router
        .table()
        .iter()
        .map(|route| RouteSummary {
            path: route.path().to_string(),
            name: route.name().to_string(),
            component: route.component().name().to_string(),
            href: router.href_for(route.name(), &params).ok(),
        })
        .collect();
    Json(routes)
}
