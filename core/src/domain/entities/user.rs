//! User entity representing a registered account on the blog platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Role carried by a user and embedded in every access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular reader/commenter; serialized as `"user"`
    #[default]
    #[serde(rename = "user")]
    Standard,
    /// Platform administrator
    Admin,
    /// Allowed to publish posts
    Author,
}

impl UserRole {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Standard => "user",
            UserRole::Admin => "admin",
            UserRole::Author => "author",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::Standard),
            "admin" => Ok(UserRole::Admin),
            "author" => Ok(UserRole::Author),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Display handle, unique across all users
    pub username: String,

    /// bcrypt hash of the password; never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Authorization role
    pub role: UserRole,

    /// Whether the email address has been confirmed
    pub is_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new standard, unverified user from an already-hashed password
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        let username = username.into();
        let password_hash = password_hash.into();

        if email.trim().is_empty() {
            return Err(ValidationError::RequiredField { field: "email".to_string() });
        }
        if username.trim().is_empty() {
            return Err(ValidationError::RequiredField { field: "username".to_string() });
        }
        if password_hash.is_empty() {
            return Err(ValidationError::RequiredField { field: "password".to_string() });
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash,
            role: UserRole::default(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the stored password hash
    pub fn change_password(&mut self, new_password_hash: impl Into<String>) -> Result<(), ValidationError> {
        let new_password_hash = new_password_hash.into();
        if new_password_hash.is_empty() {
            return Err(ValidationError::RequiredField { field: "password".to_string() });
        }
        self.password_hash = new_password_hash;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks the email address as confirmed
    pub fn verify_email(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn promote_to_admin(&mut self) {
        self.set_role(UserRole::Admin);
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
