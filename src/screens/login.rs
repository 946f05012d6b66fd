use crate::screens::navigation::{NavRequest, ScreenRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub fn label(self) -> &'static str {
        match self {
            LoginField::Email => "Email",
            LoginField::Password => "Password",
        }
    }
}

/// Row layout of the login screen: two fields plus the sign-in entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRow {
    Field(LoginField),
    SignIn,
}

pub const LOGIN_ROW_COUNT: usize = 3;

/// Stub login gate: no credential check against any backend, just a
/// non-empty guard before the storefront opens.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub selected: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> LoginRow {
        match self.selected {
            0 => LoginRow::Field(LoginField::Email),
            1 => LoginRow::Field(LoginField::Password),
            _ => LoginRow::SignIn,
        }
    }

    pub fn move_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_next(&mut self) {
        self.selected = std::cmp::min(self.selected + 1, LOGIN_ROW_COUNT - 1);
    }

    pub fn update_field(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    pub fn submit(&self) -> Result<NavRequest, String> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err("fill in both email and password".to_string());
        }
        Ok(NavRequest::Replace(ScreenRequest::List))
    }
}
