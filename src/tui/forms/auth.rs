//! Sign-in / sign-up form

use super::cycle;
use crate::session::SecretString;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

/// Focusable rows of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    /// The Sign In / Sign Up tab row
    Mode,
    Email,
    Password,
    Confirm,
    /// The "continue as guest" button
    Guest,
}

#[derive(Debug, Clone)]
pub struct SignInForm {
    pub mode: AuthMode,
    pub email: TextInput,
    pub password: TextInput,
    pub confirm: TextInput,
    pub focus: AuthField,
    pub error: Option<String>,
}

impl Default for SignInForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInForm {
    pub fn new() -> Self {
        let mut form = Self {
            mode: AuthMode::SignIn,
            email: TextInput::new().label("Email").placeholder("you@example.com"),
            password: TextInput::new().label("Password").masked(),
            confirm: TextInput::new().label("Confirm Password").masked(),
            focus: AuthField::Email,
            error: None,
        };
        form.sync_focus();
        form
    }

    /// Rows in tab order for the current mode
    pub fn fields(&self) -> Vec<AuthField> {
        match self.mode {
            AuthMode::SignIn => vec![
                AuthField::Mode,
                AuthField::Email,
                AuthField::Password,
                AuthField::Guest,
            ],
            AuthMode::SignUp => vec![
                AuthField::Mode,
                AuthField::Email,
                AuthField::Password,
                AuthField::Confirm,
                AuthField::Guest,
            ],
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle(&self.fields(), self.focus, true);
        self.sync_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = cycle(&self.fields(), self.focus, false);
        self.sync_focus();
    }

    /// Switch between signing in and creating an account
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.confirm.clear();
        self.error = None;
        if !self.fields().contains(&self.focus) {
            self.focus = AuthField::Password;
        }
        self.sync_focus();
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            AuthField::Email => Some(&mut self.email),
            AuthField::Password => Some(&mut self.password),
            AuthField::Confirm => Some(&mut self.confirm),
            AuthField::Mode | AuthField::Guest => None,
        }
    }

    pub fn email(&self) -> String {
        self.email.value().trim().to_string()
    }

    pub fn password(&self) -> SecretString {
        SecretString::new(self.password.value())
    }

    pub fn confirmation(&self) -> SecretString {
        SecretString::new(self.confirm.value())
    }

    /// Drop typed passwords once they have been used
    pub fn clear_secrets(&mut self) {
        self.password.clear();
        self.confirm.clear();
    }

    fn sync_focus(&mut self) {
        self.email.focused = self.focus == AuthField::Email;
        self.password.focused = self.focus == AuthField::Password;
        self.confirm.focused = self.focus == AuthField::Confirm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_only_in_sign_up() {
        let mut form = SignInForm::new();
        assert!(!form.fields().contains(&AuthField::Confirm));

        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::SignUp);
        assert!(form.fields().contains(&AuthField::Confirm));
    }

    #[test]
    fn test_toggle_moves_focus_off_hidden_field() {
        let mut form = SignInForm::new();
        form.toggle_mode();
        form.focus = AuthField::Confirm;
        form.confirm.set_value("secret1");
        form.error = Some("Passwords do not match".into());

        form.toggle_mode();
        assert_eq!(form.focus, AuthField::Password);
        assert!(form.confirm.value().is_empty());
        assert!(form.error.is_none());
    }

    #[test]
    fn test_tab_order() {
        let mut form = SignInForm::new();
        form.focus_next();
        assert_eq!(form.focus, AuthField::Password);
        assert!(form.password.focused);
        form.focus_next();
        assert_eq!(form.focus, AuthField::Guest);
        assert!(form.focused_input_mut().is_none());
        form.focus_next();
        assert_eq!(form.focus, AuthField::Mode);
    }
}
