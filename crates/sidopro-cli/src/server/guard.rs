use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use log::debug;
use sidopro_core::{
    guard::{cookie_value, evaluate, GuardDecision, ROLE_COOKIE},
    ui::SessionContext,
    Role,
};

use super::AppState;

fn request_role(state: &AppState, request: &Request) -> Role {
    let cookie = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| cookie_value(header, ROLE_COOKIE));

    state.resolver.resolve(cookie)
}

/// Redirects requests whose role may not see the requested path.
///
/// Requests that pass carry the resolved role as a [`SessionContext`]
/// extension.
pub async fn role_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let role = request_role(&state, &request);

    match evaluate(request.uri().path(), role) {
        GuardDecision::Pass => {
            request
                .extensions_mut()
                .insert(Arc::new(SessionContext::new(role)));
            next.run(request).await
        }
        GuardDecision::Redirect(target) => {
            debug!(
                "Redirecting {} ({}) to {target}",
                request.uri().path(),
                role.as_str()
            );
            Redirect::temporary(target).into_response()
        }
    }
}
