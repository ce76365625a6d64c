//! Result pages and their wire envelope.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{PageLinks, PageRequest};

/// One page of results together with the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    request: PageRequest,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Wrap the items selected for `request` out of `total_elements` matches.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            items,
            request,
            total_elements,
        }
    }

    /// Items on this page, in result order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The request that produced this page.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Number of matches across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages needed to hold every match.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_elements
            .div_ceil(u64::from(self.request.size()))
    }

    /// Summary of this page's position in the result set.
    #[must_use]
    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            size: self.request.size(),
            number: self.request.page(),
            total_elements: self.total_elements,
            total_pages: self.total_pages(),
        }
    }

    /// Convert every item while keeping the paging information.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }
}

/// Page position metadata returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Requested page size.
    pub size: u32,
    /// Zero-based page index.
    pub number: u32,
    /// Number of matches across all pages.
    pub total_elements: u64,
    /// Number of pages needed to hold every match.
    pub total_pages: u64,
}

/// Wire envelope for a page of results.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest, PagedResponse};
/// use url::Url;
///
/// let request = PageRequest::new(0, 2).expect("valid request");
/// let page = Page::new(vec!["a", "b"], request, 3);
/// let base = Url::parse("http://localhost/api/v1/things").expect("valid url");
/// let response = PagedResponse::from_page(page, &base);
/// assert_eq!(response.page.total_pages, 2);
/// assert!(response.links.next.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Position of this page in the result set.
    pub page: PageMetadata,
    /// Navigation links relative to `base`.
    pub links: PageLinks,
}

impl<T> PagedResponse<T> {
    /// Build the envelope, deriving navigation links from `base`.
    ///
    /// Query parameters already present on `base` are preserved apart from
    /// `page` and `size`, which are rewritten for each link.
    #[must_use]
    pub fn from_page(page: Page<T>, base: &Url) -> Self {
        let metadata = page.metadata();
        let links = PageLinks::build(base, page.request(), metadata.total_pages);
        Self {
            content: page.into_items(),
            page: metadata,
            links,
        }
    }
}
