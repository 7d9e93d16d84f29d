//! Authentication command handlers and principal resolution.

mod change_password;
mod login;
mod register;
mod resolve_principal;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use login::{AuthPayload, LoginCommand, LoginHandler};
pub use register::{RegisterCommand, RegisterHandler};
pub use resolve_principal::{bearer_token, PrincipalResolver};
