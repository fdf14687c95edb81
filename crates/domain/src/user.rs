use derive_more::{Deref, Display};

use crate::{Name, NameError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

impl User {
    /// Identity of the user in workout sessions and plans.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.username
    }
}

/// Bearer access token issued by the API.
#[derive(Deref, Display, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: Name,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, CredentialsError> {
        let username = Name::new(username)?;

        if password.trim().is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: password.to_string(),
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CredentialsError {
    #[error("Username: {0}")]
    Username(#[from] NameError),
    #[error("Password must not be empty")]
    EmptyPassword,
}

/// Authentication state of the current page session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Auth {
    pub user: Option<User>,
    pub token: Option<Token>,
}

impl Auth {
    #[must_use]
    pub fn new(user: User, token: Token) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// User and token required for any request that changes data.
    pub fn require(&self) -> Result<(&User, &Token), NotLoggedIn> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) => Ok((user, token)),
            _ => Err(NotLoggedIn),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("not logged in")]
pub struct NotLoggedIn;
