//! User query and command handlers.

mod delete_user;
mod get_me;
mod list_users;
mod update_user;

pub use delete_user::DeleteUserHandler;
pub use get_me::GetMeHandler;
pub use list_users::ListUsersHandler;
pub use update_user::{UpdateUserCommand, UpdateUserHandler};
