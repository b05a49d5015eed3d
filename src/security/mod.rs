/// Password hashing and session tokens
pub mod password;
pub mod session;

pub use password::{hash_password, verify_password};
pub use session::{clear_session_cookie, issue_session, session_cookie, validate_session, SessionClaims};
