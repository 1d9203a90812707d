//! DTOs for the user endpoints.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{NewUser, User, UserChanges};
use crate::error::AppError;

/// At least one non-whitespace character.
static NON_BLANK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S").unwrap());

/// Request body for `POST /api/users` and `PUT /api/users/{id}`.
///
/// Every field is optional at the serde level so that missing fields are
/// reported as validation errors rather than deserialization failures.
/// `id` is ignored on create and must match the path id on update.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<i32>,

    #[serde(default)]
    #[validate(
        required(message = "First name is required"),
        length(min = 1, max = 100, message = "First name must be 1-100 characters"),
        regex(path = *NON_BLANK_REGEX, message = "First name must not be blank")
    )]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Last name is required"),
        length(min = 1, max = 100, message = "Last name must be 1-100 characters"),
        regex(path = *NON_BLANK_REGEX, message = "Last name must not be blank")
    )]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email format"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: Option<String>,

    /// Accepts `YYYY-MM-DD` or an ISO-8601 date-time (date part kept).
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    #[validate(required(message = "Date of birth is required"))]
    pub date_of_birth: Option<NaiveDate>,
}

impl UserPayload {
    /// Validates the payload and converts it into creation input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages.
    pub fn into_new_user(self) -> Result<NewUser, AppError> {
        let (first_name, last_name, email, date_of_birth) = self.into_fields()?;

        Ok(NewUser {
            first_name,
            last_name,
            email,
            date_of_birth,
        })
    }

    /// Validates the payload and converts it into replacement values.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages.
    pub fn into_changes(self) -> Result<UserChanges, AppError> {
        let (first_name, last_name, email, date_of_birth) = self.into_fields()?;

        Ok(UserChanges {
            first_name,
            last_name,
            email,
            date_of_birth,
        })
    }

    /// Checks that the body id equals the id addressed by the path.
    ///
    /// A missing body id never matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on mismatch.
    pub fn ensure_id(&self, path_id: i32) -> Result<(), AppError> {
        if self.id == Some(path_id) {
            return Ok(());
        }

        Err(AppError::bad_request(
            "User id mismatch",
            json!({ "path_id": path_id, "body_id": self.id }),
        ))
    }

    fn into_fields(self) -> Result<(String, String, String, NaiveDate), AppError> {
        self.validate()?;

        let (Some(first_name), Some(last_name), Some(email), Some(date_of_birth)) =
            (self.first_name, self.last_name, self.email, self.date_of_birth)
        else {
            return Err(AppError::bad_request(
                "Validation failed",
                json!({ "reason": "missing required field" }),
            ));
        };

        Ok((first_name, last_name, email, date_of_birth))
    }
}

/// JSON representation of a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            date_of_birth: user.date_of_birth,
        }
    }
}

/// Paginated list of users for `GET /api/users`.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    #[serde(rename = "TotalUsers")]
    pub total_users: i64,
    #[serde(rename = "CurrentPage")]
    pub current_page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    #[serde(rename = "Users")]
    pub users: Vec<UserResponse>,
}

/// Deserializer for dates sent either as a plain date or as a date-time.
mod flexible_date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            None => Ok(None),
            Some(s) => parse(&s).map(Some).map_err(serde::de::Error::custom),
        }
    }

    pub(super) fn parse(s: &str) -> Result<NaiveDate, String> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(dt.date());
        }

        Err(format!("invalid date '{s}', expected YYYY-MM-DD"))
    }
}
