pub mod accounts;
pub mod session;

pub use accounts::{
    change_password, create_admin, delete_admin, get_admin, get_me, list_admins,
    reset_password, update_admin,
};
pub use session::{login, logout, refresh};
