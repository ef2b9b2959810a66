//! Authentication primitives: credentials, caller identity, session tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{MAX_EMAIL_LENGTH, Role, UserId};

/// Longest accepted password, in bytes. bcrypt ignores anything past this.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email exceeded [`MAX_EMAIL_LENGTH`] characters once trimmed.
    EmailTooLong,
    /// Password was empty.
    EmptyPassword,
    /// Password exceeded [`MAX_PASSWORD_BYTES`] bytes.
    PasswordTooLong,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong => {
                write!(f, "email must be at most {MAX_EMAIL_LENGTH} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong => {
                write!(f, "password must be at most {MAX_PASSWORD_BYTES} bytes")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Email/password pair submitted to registration or login.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming. It holds at
///   most [`MAX_EMAIL_LENGTH`] characters.
/// - `password` must be non-empty but keeps caller-provided whitespace. It
///   holds at most [`MAX_PASSWORD_BYTES`] bytes.
///
/// # Examples
/// ```
/// use tasklist_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" alice@example.com ", "pw123").unwrap();
/// assert_eq!(creds.email(), "alice@example.com");
/// assert_eq!(creds.password(), "pw123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if normalized.chars().count() > MAX_EMAIL_LENGTH {
            return Err(CredentialsValidationError::EmailTooLong);
        }

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(CredentialsValidationError::PasswordTooLong);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed email used for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as the caller supplied it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    user_id: UserId,
    role: Role,
}

impl Caller {
    /// Build a caller identity.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Authenticated account id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Role claimed by the token.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the caller bypasses ownership checks.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Opaque signed session token as handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper, returning the encoded token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")
    }
}
