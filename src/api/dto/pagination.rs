//! Listing query parameters: search filter and pagination.

use serde::Deserialize;
use serde_with::{DisplayFromStr, NoneAsEmptyString, serde_as};

/// Page used when `page` is absent.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when `pageSize` is absent.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Largest accepted `pageSize`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for `GET /api/users`.
///
/// Uses `serde_with` to parse numbers from query strings and to treat an
/// empty `search=` as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl UserListParams {
    /// Requested page, defaulting to 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size, defaulting to 10.
    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// # Validation
    ///
    /// - `page` must be >= 1
    /// - `pageSize` must be between 1 and [`MAX_PAGE_SIZE`]
    ///
    /// # Returns
    ///
    /// `(offset, limit)` tuple, where `offset = (page - 1) * pageSize`.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let page_size = self.page_size();

        if page < 1 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| "Page is out of range".to_string())?;

        Ok((offset, page_size))
    }
}
