// Registration, login and session handling.
// Sessions are signed tokens; admin access is an email allowlist from config.

pub mod handlers;
pub mod password;
pub mod session;
pub mod store;
