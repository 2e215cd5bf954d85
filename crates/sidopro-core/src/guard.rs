//! Role-based route guard.
//!
//! [`evaluate`] is a pure decision over the request path and the role
//! resolved from the `role` cookie. Redirect targets never carry the
//! original query string.

use crate::models::Role;

/// Name of the cookie carrying the role claim.
pub const ROLE_COOKIE: &str = "role";

/// Login route of the admin area; reachable without a role.
pub const ADMIN_LOGIN_PATH: &str = "/admin";

/// Landing page for requests bounced out of the petugas dashboard.
pub const HOME_PATH: &str = "/";

const DASHBOARD_PATH: &str = "/dashboard";

/// Outcome of evaluating a request against the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(&'static str),
}

/// Decides whether `role` may access `path`.
///
/// ```rust
/// use sidopro_core::{guard::{evaluate, GuardDecision}, models::Role};
///
/// assert_eq!(evaluate("/admin/settings", Role::Viewer), GuardDecision::Redirect("/admin"));
/// assert_eq!(evaluate("/admin", Role::Viewer), GuardDecision::Pass);
/// assert_eq!(evaluate("/dashboard/reports", Role::Admin), GuardDecision::Redirect("/"));
/// ```
pub fn evaluate(path: &str, role: Role) -> GuardDecision {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if is_below(path, ADMIN_LOGIN_PATH) && role != Role::Admin {
        return GuardDecision::Redirect(ADMIN_LOGIN_PATH);
    }

    if (path == DASHBOARD_PATH || is_below(path, DASHBOARD_PATH)) && role != Role::Petugas {
        return GuardDecision::Redirect(HOME_PATH);
    }

    GuardDecision::Pass
}

/// True for paths strictly below `prefix` (`/admin/x` but not `/admin`
/// or `/administrator`).
fn is_below(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Extracts a cookie value from a `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}
