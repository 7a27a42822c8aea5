//! Command handlers for CLI operations

mod init;
mod users;

pub use init::{cmd_init, cmd_migrate};
pub use users::{cmd_create_user, cmd_list_users, cmd_rotate_key};
