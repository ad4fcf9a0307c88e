//! # Access Gate
//!
//! Role gate for the routing surface. Three role-scoped trees
//! (`/cliente/*`, `/empresa/*`, `/admin/*`) plus a handful of public entry
//! points; everything else falls through to the sign-in redirect.
//!
//! The gate is a pure function from (path, session state) to a decision —
//! it renders nothing and mutates nothing. While the session is still being
//! resolved the decision is [`GateOutcome::Pending`], which callers show as
//! a placeholder.

use crate::auth::Session;
use crate::model::Role;

/// Session resolution state as seen by the router.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Session not resolved yet; render a placeholder.
    Loading,
    /// Resolved: nobody is signed in.
    Anonymous,
    /// Resolved: a session is active.
    Authenticated(Session),
}

/// The gate's decision for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Still resolving the session.
    Pending,
    /// Not signed in (or unknown path): go to the sign-in entry point.
    RedirectToSignIn,
    /// Signed in, but the role is not allowed here: go to the landing page.
    RedirectToLanding,
    /// Render the requested screen.
    Allow,
}

/// Path entry points that need no session.
const PUBLIC_PATHS: &[&str] = &["/", "/login", "/registro", "/registro-empresa", "/recuperar"];

/// Role-scoped route trees.
const GUARDED_TREES: &[(&str, &[Role])] = &[
    ("/cliente", &[Role::Client]),
    ("/empresa", &[Role::Company]),
    ("/admin", &[Role::Admin]),
];

fn in_tree(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

/// The roles allowed under `path`, or `None` when the path is public or
/// unknown.
pub fn required_roles(path: &str) -> Option<&'static [Role]> {
    GUARDED_TREES
        .iter()
        .find(|(prefix, _)| in_tree(path, prefix))
        .map(|(_, roles)| *roles)
}

/// The landing tree for a role, used after sign-in and on unauthorized
/// access.
pub fn landing(role: Role) -> &'static str {
    match role {
        Role::Client => "/cliente",
        Role::Company => "/empresa",
        Role::Admin => "/admin",
    }
}

/// Decide what to do with a navigation to `path` under `state`.
pub fn resolve(path: &str, state: &SessionState) -> GateOutcome {
    if PUBLIC_PATHS.contains(&path) {
        return GateOutcome::Allow;
    }
    let Some(allowed) = required_roles(path) else {
        // Catch-all: unknown paths go to the sign-in entry point.
        return GateOutcome::RedirectToSignIn;
    };
    match state {
        SessionState::Loading => GateOutcome::Pending,
        SessionState::Anonymous => GateOutcome::RedirectToSignIn,
        SessionState::Authenticated(session) => {
            if allowed.contains(&session.role) {
                GateOutcome::Allow
            } else {
                GateOutcome::RedirectToLanding
            }
        }
    }
}
