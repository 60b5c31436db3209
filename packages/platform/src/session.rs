//! Role-based access decisions for the current session user.

use crate::entity::{Role, User};

/// Transient storage key holding the logged-in user as JSON.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Outcome of a gate check for a role-restricted view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// The caller may proceed.
    Granted,
    /// Nobody is logged in; send the caller to the login view.
    RedirectLogin,
    /// Logged in with the wrong role; send the caller to their own
    /// home view instead.
    RedirectHome(Role),
}

/// Decide whether `user` may enter a view restricted to `allowed` roles.
///
/// Pure function of its inputs; rendering and navigation stay with the
/// caller.
pub fn authorize(user: Option<&User>, allowed: &[Role]) -> Access {
    match user {
        None => Access::RedirectLogin,
        Some(user) if allowed.contains(&user.role) => Access::Granted,
        Some(user) => Access::RedirectHome(user.role),
    }
}
