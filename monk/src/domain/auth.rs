//! Credentials and secrets.
//!
//! Passwords are held in zeroizing buffers and compared byte for byte. Email
//! lookups are exact; no case folding or trimming is applied.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

use super::user::User;

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login inputs are unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank.
    EmptyEmail,
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Account secret stored alongside a registered user.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a raw secret.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Byte-for-byte comparison against a candidate secret.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes() == candidate.as_bytes()
    }

    /// Borrow the raw secret.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Identity plus its secret, as held by the account registry.
///
/// Only the registry sees this type; everything downstream receives the bare
/// [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub user: User,
    pub password: Password,
}

impl RegisteredAccount {
    /// Strip the secret.
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Validated login credentials used by the session service.
///
/// ## Invariants
/// - `email` is non-blank and kept exactly as provided.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use monk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "secret1").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        if email.trim().is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string used for the registry lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("ada@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn email_is_not_normalised() {
        let creds = LoginCredentials::try_from_parts(" Ada@Example.com", "secret1")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), " Ada@Example.com");
    }

    #[rstest]
    #[case("secret1", true)]
    #[case("secret1 ", false)]
    #[case("Secret1", false)]
    fn password_matches_exact_bytes(#[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(Password::new("secret1").matches(candidate), expected);
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let rendered = format!("{:?}", Password::new("hunter22"));
        assert!(!rendered.contains("hunter22"));
    }
}
