mod login;
mod password;
mod session;

#[cfg(test)]
mod tests;

pub use login::login_handler;
pub use password::change_password_handler;
pub use session::{logout_handler, me_handler};
