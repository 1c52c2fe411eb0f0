//! User account schemas

use chrono::{DateTime, Utc};
use common::{ValidationError, ValidationResult, Violations};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::{
    payload::{self, Object},
    schema::{Schema, impl_try_from_value},
    validation::{
        PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH,
        validate_email, validate_name, validate_password, validate_username,
    },
};

/// Write-only password, redacted from `Debug` and never serialized
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Strength rules over the raw payload, run before any field is typed
///
/// A failure here short-circuits the whole schema.
fn check_password_strength(object: &Object) -> ValidationResult<()> {
    let password = match object.get("password") {
        None | Some(Value::Null) => "",
        Some(Value::String(password)) => password.as_str(),
        Some(_) => {
            return Err(ValidationError::field(
                "password",
                "Input should be a valid string",
            ));
        }
    };

    validate_password(password).map_err(|message| ValidationError::field("password", message))
}

fn password_field(object: &Object) -> Result<Password, String> {
    let password = payload::required_str(object, "password")?;
    payload::length_between(password, PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH)?;
    Ok(Password(password.to_string()))
}

/// Fields shared by every user schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBase {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

impl UserBase {
    pub(crate) fn collect(object: &Object, violations: &mut Violations) -> Option<Self> {
        let first_name = violations.check(
            "first_name",
            payload::required_str(object, "first_name").and_then(validate_name),
        );
        let last_name = violations.check(
            "last_name",
            payload::required_str(object, "last_name").and_then(validate_name),
        );
        let email = violations.check(
            "email",
            payload::required_str(object, "email").and_then(validate_email),
        );
        let username = violations.check(
            "username",
            payload::required_str(object, "username").and_then(validate_username),
        );

        Some(Self {
            first_name: first_name?,
            last_name: last_name?,
            email: email?,
            username: username?,
        })
    }
}

impl Schema for UserBase {
    const NAME: &'static str = "UserBase";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        let mut violations = Violations::new();
        let base = Self::collect(object, &mut violations);
        base.ok_or_else(|| violations.into())
    }
}

/// Account creation payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCreate {
    #[serde(flatten)]
    pub base: UserBase,
    #[serde(skip_serializing)]
    pub password: Password,
}

impl Schema for UserCreate {
    const NAME: &'static str = "UserCreate";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        check_password_strength(object)?;

        let mut violations = Violations::new();
        let base = UserBase::collect(object, &mut violations);
        let password = violations.check("password", password_field(object));

        match (base, password) {
            (Some(base), Some(password)) => Ok(Self { base, password }),
            _ => Err(violations.into()),
        }
    }
}

/// User as returned to clients; there is no password field to leak
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRead {
    pub id: Uuid,
    #[serde(flatten)]
    pub base: UserBase,
    pub is_active: bool,
    pub is_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schema for UserRead {
    const NAME: &'static str = "UserRead";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        let mut violations = Violations::new();

        let base = UserBase::collect(object, &mut violations);
        let id = violations.check("id", payload::required(object, "id").and_then(payload::uuid));
        let is_active = violations.check(
            "is_active",
            payload::required(object, "is_active").and_then(payload::boolean),
        );
        let is_verified = violations.check(
            "is_verified",
            payload::required(object, "is_verified").and_then(payload::boolean),
        );
        let last_login = violations.check(
            "last_login",
            payload::optional(object, "last_login")
                .map(payload::timestamp)
                .transpose(),
        );
        let created_at = violations.check(
            "created_at",
            payload::required(object, "created_at").and_then(payload::timestamp),
        );
        let updated_at = violations.check(
            "updated_at",
            payload::required(object, "updated_at").and_then(payload::timestamp),
        );

        match (base, id, is_active, is_verified, last_login, created_at, updated_at) {
            (
                Some(base),
                Some(id),
                Some(is_active),
                Some(is_verified),
                Some(last_login),
                Some(created_at),
                Some(updated_at),
            ) => Ok(Self {
                id,
                base,
                is_active,
                is_verified,
                last_login,
                created_at,
                updated_at,
            }),
            _ => Err(violations.into()),
        }
    }
}

/// Login credentials; `username` may also hold an email address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLogin {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Password,
}

impl Schema for UserLogin {
    const NAME: &'static str = "UserLogin";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        check_password_strength(object)?;

        let mut violations = Violations::new();
        let username = violations.check(
            "username",
            payload::required_str(object, "username").and_then(|username| {
                payload::length_between(username, USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH)
                    .map(|_| username.to_string())
            }),
        );
        let password = violations.check("password", password_field(object));

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(violations.into()),
        }
    }
}

/// Bearer token issued after a successful login
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl Token {
    pub fn bearer(access_token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

impl_try_from_value!(UserBase, UserCreate, UserRead, UserLogin);
