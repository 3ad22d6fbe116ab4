//! Demo domain records used by the CLI and the backend tests.

mod audit;
mod product;
mod user;

pub use audit::AuditEvent;
pub use product::Product;
pub use user::User;
