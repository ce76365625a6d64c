//! Page-number pagination primitives shared by collection endpoints.
//!
//! Callers build a [`PageRequest`] from client input, repositories return a
//! [`Page`] holding one slice of results plus the total element count, and
//! inbound adapters wrap it in a [`PagedResponse`] carrying page metadata and
//! navigation links.
//!
//! Page indices are zero based. Requesting a page past the last one is not an
//! error: the resulting page is simply empty.

mod links;
mod page;
mod request;

pub use links::PageLinks;
pub use page::{Page, PageMetadata, PagedResponse};
pub use request::{MAX_PAGE_SIZE, PageRequest, PageRequestError};
