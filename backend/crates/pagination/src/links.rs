//! Navigation links for paged collections.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::PageRequest;

/// Absolute URLs for moving between pages of one result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// The page that was requested.
    #[serde(rename = "self")]
    pub self_: String,
    /// The first page.
    pub first: String,
    /// The previous page, absent on the first page.
    pub prev: Option<String>,
    /// The next page, absent on or after the last page.
    pub next: Option<String>,
    /// The last page (the first page when the result set is empty).
    pub last: String,
}

impl PageLinks {
    /// Derive links for `request` within a result set of `total_pages`.
    #[must_use]
    pub fn build(base: &Url, request: PageRequest, total_pages: u64) -> Self {
        let size = request.size();
        let current = u64::from(request.page());
        let last = total_pages.saturating_sub(1);

        let prev = current
            .checked_sub(1)
            .map(|prev| page_url(base, prev.min(last), size));
        let next = current
            .checked_add(1)
            .filter(|next| *next < total_pages)
            .map(|next| page_url(base, next, size));

        Self {
            self_: page_url(base, current, size),
            first: page_url(base, 0, size),
            prev,
            next,
            last: page_url(base, last, size),
        }
    }
}

fn page_url(base: &Url, page: u64, size: u32) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "page" && key != "size")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("page", &page.to_string())
        .append_pair("size", &size.to_string());
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> Url {
        Url::parse("http://localhost/api/v1/recipes?page=9&keyword=pie&size=7").expect("valid url")
    }

    fn request(page: u32) -> PageRequest {
        PageRequest::new(page, 2).expect("valid request")
    }

    #[rstest]
    fn first_page_has_no_prev(base: Url) {
        let links = PageLinks::build(&base, request(0), 2);
        assert!(links.prev.is_none());
        assert_eq!(
            links.next.as_deref(),
            Some("http://localhost/api/v1/recipes?keyword=pie&page=1&size=2")
        );
        assert_eq!(
            links.last,
            "http://localhost/api/v1/recipes?keyword=pie&page=1&size=2"
        );
    }

    #[rstest]
    fn last_page_has_no_next(base: Url) {
        let links = PageLinks::build(&base, request(1), 2);
        assert!(links.next.is_none());
        assert_eq!(
            links.prev.as_deref(),
            Some("http://localhost/api/v1/recipes?keyword=pie&page=0&size=2")
        );
    }

    #[rstest]
    fn page_past_the_end_points_back_to_last(base: Url) {
        let links = PageLinks::build(&base, request(5), 2);
        assert!(links.next.is_none());
        assert_eq!(
            links.prev.as_deref(),
            Some("http://localhost/api/v1/recipes?keyword=pie&page=1&size=2")
        );
        assert_eq!(
            links.self_,
            "http://localhost/api/v1/recipes?keyword=pie&page=5&size=2"
        );
    }

    #[rstest]
    fn empty_result_set_links_to_first_page(base: Url) {
        let links = PageLinks::build(&base, request(0), 0);
        assert_eq!(links.first, links.last);
        assert!(links.prev.is_none());
        assert!(links.next.is_none());
    }
}
