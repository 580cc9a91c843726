//! Cache key builders.
//!
//! Keys are kept in the plain `auth_<token>` shape so that other clients of
//! the same Redis instance can read sessions.

/// Cache key holding the user id a session token resolves to.
pub fn session(token: &str) -> String {
    format!("auth_{token}")
}
