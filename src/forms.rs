//! Login and registration forms

use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::{RegisterRequest, Role};

/// One editable line
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    pub masked: bool,
}

impl TextField {
    fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn edit(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(ch) => self.value.push(ch),
            KeyCode::Backspace => {
                self.value.pop();
            }
            _ => return false,
        }
        true
    }
}

/// What a key did to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Edited,
    Submit,
    /// Switch between the login and registration screens
    SwitchForm,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
    pub focus: usize,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: TextField::default(),
            password: TextField::masked(),
            focus: 0,
        }
    }
}

impl LoginForm {
    pub const FIELDS: usize = 2;

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Enter => FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % Self::FIELDS;
                FormEvent::Edited
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + Self::FIELDS - 1) % Self::FIELDS;
                FormEvent::Edited
            }
            KeyCode::F(2) => FormEvent::SwitchForm,
            code => {
                let field = match self.focus {
                    0 => &mut self.username,
                    _ => &mut self.password,
                };
                if field.edit(code) {
                    FormEvent::Edited
                } else {
                    FormEvent::Ignored
                }
            }
        }
    }

    /// Trimmed username and raw password, if both are filled in
    pub fn credentials(&self) -> Result<(String, String), &'static str> {
        let username = self.username.value.trim();
        if username.is_empty() || self.password.value.is_empty() {
            return Err("Username and password are required");
        }
        Ok((username.to_string(), self.password.value.clone()))
    }

    /// Keep the username, drop the password
    pub fn reset_password(&mut self) {
        self.password.value.clear();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: TextField,
    pub password: TextField,
    pub confirm: TextField,
    pub role: Role,
    pub focus: usize,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            username: TextField::default(),
            password: TextField::masked(),
            confirm: TextField::masked(),
            role: Role::Staff,
            focus: 0,
        }
    }
}

impl RegisterForm {
    /// username, password, confirm, role
    pub const FIELDS: usize = 4;
    pub const ROLE_FIELD: usize = 3;

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Enter => FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % Self::FIELDS;
                FormEvent::Edited
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + Self::FIELDS - 1) % Self::FIELDS;
                FormEvent::Edited
            }
            KeyCode::F(2) => FormEvent::SwitchForm,
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.focus == Self::ROLE_FIELD =>
            {
                self.cycle_role(key.code != KeyCode::Left);
                FormEvent::Edited
            }
            code => {
                let field = match self.focus {
                    0 => &mut self.username,
                    1 => &mut self.password,
                    2 => &mut self.confirm,
                    _ => return FormEvent::Ignored,
                };
                if field.edit(code) {
                    FormEvent::Edited
                } else {
                    FormEvent::Ignored
                }
            }
        }
    }

    pub fn cycle_role(&mut self, forward: bool) {
        let len = Role::ALL.len();
        let index = Role::ALL
            .iter()
            .position(|role| *role == self.role)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.role = Role::ALL[next];
    }

    /// Local checks before anything is sent
    pub fn validate(&self) -> Result<RegisterRequest, &'static str> {
        let username = self.username.value.trim();
        if username.is_empty() || self.password.value.is_empty() {
            return Err("Username and password are required");
        }
        if self.password.value != self.confirm.value {
            return Err("Passwords do not match");
        }
        Ok(RegisterRequest {
            username: username.to_string(),
            password: self.password.value.clone(),
            role: self.role,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
