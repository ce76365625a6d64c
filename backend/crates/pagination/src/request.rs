//! Validated page requests.

use thiserror::Error;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Reasons a page request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page size was zero.
    #[error("page size must be greater than zero")]
    ZeroSize,
    /// The page size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must not exceed {max}")]
    SizeTooLarge {
        /// Maximum accepted page size.
        max: u32,
    },
}

/// Zero-based page index paired with a positive page size.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 10).expect("valid request");
/// assert_eq!(request.offset(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Build a request, rejecting empty or oversized pages.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `size` is zero or larger than
    /// [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items skipped before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 2, 0)]
    #[case(1, 2, 2)]
    #[case(5, 2, 10)]
    #[case(u32::MAX, MAX_PAGE_SIZE, u64::from(u32::MAX) * 100)]
    fn offset_is_page_times_size(#[case] page: u32, #[case] size: u32, #[case] expected: u64) {
        let request = PageRequest::new(page, size).expect("valid request");
        assert_eq!(request.offset(), expected);
    }

    #[rstest]
    fn zero_size_is_rejected() {
        assert_eq!(PageRequest::new(0, 0), Err(PageRequestError::ZeroSize));
    }

    #[rstest]
    fn oversized_page_is_rejected() {
        assert_eq!(
            PageRequest::new(0, MAX_PAGE_SIZE + 1),
            Err(PageRequestError::SizeTooLarge { max: MAX_PAGE_SIZE })
        );
    }
}
