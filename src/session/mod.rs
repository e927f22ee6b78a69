//! Who is logged in, and what follows from it.
pub mod guard;
pub mod session_store;

pub use guard::{RouteDecision, RouteGuard};
pub use session_store::{
    Credentials, Session, SessionState, SessionStore, SessionValidator, PROFILE_KEY, TOKEN_KEY,
};
