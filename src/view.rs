//! Hand-off to the view layer.
//!
//! Views live outside this crate; a rendered navigation only names the view and the
//! parameters it was reached with.

use std::collections::BTreeMap;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use weekmenu_navigation::MatchedRoute;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDescriptor {
    pub view: &'static str,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl From<MatchedRoute> for ViewDescriptor {
    fn from(route: MatchedRoute) -> Self {
        Self {
            view: route.name,
            path: route.path,
            params: route.params,
        }
    }
}

impl IntoResponse for ViewDescriptor {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
