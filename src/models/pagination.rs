//! Page-index pagination shared by the booking and request listings
//!
//! `from` is a zero-based page number, not a row offset: `from=2&size=10`
//! returns rows 20..30.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

/// Raw `from` / `size` query parameters
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index
    pub from: Option<i64>,
    /// Page length
    pub size: Option<i64>,
}

/// A validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: i64,
    pub size: i64,
}

impl Page {
    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.index * self.size
    }
}

impl PageParams {
    /// Pagination is enabled only when both bounds are present.
    pub fn page(&self) -> AppResult<Option<Page>> {
        let (Some(from), Some(size)) = (self.from, self.size) else {
            return Ok(None);
        };

        if from < 0 {
            return Err(AppError::BadRequest(format!(
                "Wrong pageable settings: from is {}, can't be < 0",
                from
            )));
        }
        if size < 1 {
            return Err(AppError::BadRequest(format!(
                "Wrong pageable settings: size is {}, can't be < 1",
                size
            )));
        }
        if from.checked_mul(size).is_none() {
            return Err(AppError::BadRequest("Wrong pageable settings: page is out of range".to_string()));
        }

        Ok(Some(Page { index: from, size }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(from: Option<i64>, size: Option<i64>) -> PageParams {
        PageParams { from, size }
    }

    #[test]
    fn test_missing_bound_disables_pagination() {
        assert_eq!(params(None, None).page().unwrap(), None);
        assert_eq!(params(Some(1), None).page().unwrap(), None);
        assert_eq!(params(None, Some(10)).page().unwrap(), None);
    }

    #[test]
    fn test_from_is_a_page_index() {
        let page = params(Some(2), Some(10)).page().unwrap().unwrap();
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 20);

        let first = params(Some(0), Some(5)).page().unwrap().unwrap();
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        let err = params(Some(-1), Some(10)).page().unwrap_err();
        assert_eq!(err.to_string(), "Wrong pageable settings: from is -1, can't be < 0");

        let err = params(Some(0), Some(0)).page().unwrap_err();
        assert_eq!(err.to_string(), "Wrong pageable settings: size is 0, can't be < 1");

        assert!(params(Some(i64::MAX), Some(2)).page().is_err());
    }
}
