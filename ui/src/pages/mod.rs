//! One module per route.

mod forget_password_page;
mod library_page;
mod login_page;
mod register_page;

pub use forget_password_page::forget_password_page;
pub use library_page::library_page;
pub use login_page::login_page;
pub use register_page::register_page;
