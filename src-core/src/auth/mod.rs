// FICHIER : src-core/src/auth/mod.rs

pub mod cookies;
pub mod guard;
pub mod service;
pub mod session;

pub use cookies::CookieJar;
pub use guard::{guard, require_session, RouteAccess};
pub use service::AuthService;
pub use session::{SessionStore, Theme};
