mod login_form;

pub use login_form::login_form;
