//! Response envelope and pagination contract
//!
//! Every backend response is wrapped in an [`ApiResponse`]. The
//! [`RequestClient`](crate::api::RequestClient) is the only place that
//! unwraps it; services and callers only ever see the payload.

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};

/// Page size used when a caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Envelope every backend call returns.
///
/// `success` is authoritative for branching. `code` is kept for diagnostics
/// and classified with [`CodeClass::of`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Status/classification code
    pub code: i64,
    /// Payload; absent or `null` for operations without a result
    #[serde(default)]
    pub data: Option<T>,
    /// Human-readable message, possibly empty
    #[serde(default)]
    pub message: String,
    /// Whether the backend considers the call successful
    pub success: bool,
}

/// Classification of an envelope `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass {
    /// `0` or `200..=299`
    Success,
    /// `400..=499`
    ClientError,
    /// `500..=599`
    ServerError,
    /// Anything else (application-specific codes)
    Other,
}

impl CodeClass {
    /// Classify an envelope code
    ///
    /// # Examples
    ///
    /// ```
    /// use datadash::api::CodeClass;
    ///
    /// assert_eq!(CodeClass::of(0), CodeClass::Success);
    /// assert_eq!(CodeClass::of(201), CodeClass::Success);
    /// assert_eq!(CodeClass::of(404), CodeClass::ClientError);
    /// assert_eq!(CodeClass::of(503), CodeClass::ServerError);
    /// assert_eq!(CodeClass::of(1001), CodeClass::Other);
    /// ```
    pub fn of(code: i64) -> Self {
        match code {
            0 | 200..=299 => CodeClass::Success,
            400..=499 => CodeClass::ClientError,
            500..=599 => CodeClass::ServerError,
            _ => CodeClass::Other,
        }
    }

    /// Whether this class counts as success
    pub fn is_success(self) -> bool {
        self == CodeClass::Success
    }
}

impl<T> ApiResponse<T> {
    /// Build a successful envelope around `data`
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            data: Some(data),
            message: String::new(),
            success: true,
        }
    }

    /// Build a failed envelope
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            message: message.into(),
            success: false,
        }
    }

    /// Whether `success` agrees with the classification of `code`
    pub fn is_consistent(&self) -> bool {
        CodeClass::of(self.code).is_success() == self.success
    }

    /// Convert into the payload, or the envelope error when `success` is false
    ///
    /// A disagreement between `success` and `code` is logged but does not
    /// change the outcome.
    ///
    /// # Errors
    ///
    /// Returns `DashError::Envelope` when `success` is false.
    pub fn into_result(self) -> Result<Option<T>> {
        if !self.is_consistent() {
            tracing::warn!(
                code = self.code,
                success = self.success,
                "Envelope code disagrees with success flag"
            );
        }

        if self.success {
            Ok(self.data)
        } else {
            Err(DashError::Envelope {
                code: self.code,
                message: self.message,
            }
            .into())
        }
    }
}

/// One page of a larger collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items of this page, in server order
    pub list: Vec<T>,
    /// Total item count across all pages
    pub total: u64,
    /// 1-based page index
    pub page: u32,
    /// Page size used to produce `list`
    pub page_size: u32,
}

impl<T> PaginatedResponse<T> {
    /// Check `list.len() <= page_size` and `total >= list.len()`
    pub fn is_consistent(&self) -> bool {
        self.list.len() <= self.page_size as usize && self.total >= self.list.len() as u64
    }

    /// Whether pages exist after this one
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }

    /// Number of pages needed to hold `total` items
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        let size = u64::from(self.page_size);
        self.total / size + u64::from(self.total % size != 0)
    }
}

/// Filters accepted by dataset listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFilters {
    /// Free-text match on name and description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Creator username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// 1-based page index, defaults to 1
    pub page: Option<u32>,
    /// Page size, defaults to [`DEFAULT_PAGE_SIZE`]
    pub page_size: Option<u32>,
    /// Additional filters
    #[serde(flatten)]
    pub filters: DatasetFilters,
}

impl PageParams {
    /// Parameters for page `page` with the default size
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the keyword filter
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.filters.keyword = Some(keyword.into());
        self
    }

    /// Set the creator filter
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.filters.creator = Some(creator.into());
        self
    }

    /// Render as query pairs with defaults filled in
    ///
    /// # Examples
    ///
    /// ```
    /// use datadash::api::PageParams;
    ///
    /// let query = PageParams::default().to_query();
    /// assert_eq!(
    ///     query,
    ///     vec![
    ///         ("page".to_string(), "1".to_string()),
    ///         ("pageSize".to_string(), "10".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.unwrap_or(1).max(1).to_string()),
            (
                "pageSize".to_string(),
                self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).to_string(),
            ),
        ];
        if let Some(keyword) = &self.filters.keyword {
            query.push(("keyword".to_string(), keyword.clone()));
        }
        if let Some(creator) = &self.filters.creator {
            query.push(("creator".to_string(), creator.clone()));
        }
        query
    }
}
