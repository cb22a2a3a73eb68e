//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    /// Patronymic
    pub lastname: String,
    pub login: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub department_id: Option<i32>,
    pub specialization_id: Option<i32>,
}

impl User {
    /// Parsed role; unknown role strings are treated as students
    pub fn role(&self) -> Role {
        match self.role.parse() {
            Ok(role) => role,
            Err(_) => {
                warn!(user_id = self.id, role = %self.role, "Unknown stored role, treating user as student");
                Role::Student
            }
        }
    }
}

/// User as returned to clients, without the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub lastname: String,
    pub login: String,
    pub email: String,
    pub role: Role,
    pub department_id: Option<i32>,
    pub specialization_id: Option<i32>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        let role = user.role();
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            lastname: user.lastname,
            login: user.login,
            email: user.email,
            role,
            department_id: user.department_id,
            specialization_id: user.specialization_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_STUDENT")]
    Student,
    #[serde(rename = "ROLE_TEACHER")]
    Teacher,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "ROLE_STUDENT",
            Role::Teacher => "ROLE_TEACHER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_STUDENT" => Ok(Role::Student),
            "ROLE_TEACHER" => Ok(Role::Teacher),
            "ROLE_ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Registration and profile update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub surname: String,
    pub lastname: String,
    pub login: String,
    pub email: String,
    pub password: String,
    /// Ignored on profile update
    pub role: Option<Role>,
    pub department_id: Option<i32>,
    pub specialization_id: Option<i32>,
}

/// Row-level insert; `password` is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub lastname: String,
    pub login: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department_id: Option<i32>,
    pub specialization_id: Option<i32>,
}
