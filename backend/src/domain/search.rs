//! Keyword search, sort, and paging parameters for collection queries.
//!
//! Each entity names its sortable fields through a [`SortField`] enum. Raw
//! client input arrives as [`SearchParams`] and is turned into a validated
//! [`SearchQuery`] before any repository sees it, so unknown sort fields or
//! directions never reach the database.

use std::fmt;
use std::str::FromStr;

use pagination::{PageRequest, PageRequestError};

use super::Error;
use super::validation::{DraftValidationError, FieldChecks};

/// Default zero-based page index.
pub const DEFAULT_PAGE: u32 = 0;

/// Sortable column of one entity, addressed by its wire name.
pub trait SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Field used when the client does not name one.
    const DEFAULT: Self;
    /// Page size used when the client does not supply one.
    const DEFAULT_PAGE_SIZE: u32;
    /// Every accepted field.
    const ALL: &'static [Self];

    /// camelCase name clients use for this field.
    fn wire_name(self) -> &'static str;

    /// Resolve a wire name, ignoring ASCII case.
    fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.wire_name().eq_ignore_ascii_case(name))
    }
}

/// Ordering applied to the sort field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Rejected sort direction text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order must be 'asc' or 'desc', got '{0}'")]
pub struct SortDirectionParseError(String);

impl FromStr for SortDirection {
    type Err = SortDirectionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if trimmed.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(SortDirectionParseError(value.to_owned()))
        }
    }
}

/// Unvalidated search input as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Validated keyword/sort/page query for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<F> {
    keyword: Option<String>,
    keyword_lower: Option<String>,
    sort: F,
    direction: SortDirection,
    page: PageRequest,
}

impl<F: SortField> SearchQuery<F> {
    /// Build a query from already-typed parts.
    ///
    /// Keywords are trimmed; a blank keyword means "no filter".
    pub fn new(
        keyword: Option<String>,
        sort: F,
        direction: SortDirection,
        page: PageRequest,
    ) -> Self {
        let keyword = normalise_text(keyword);
        let keyword_lower = keyword.as_deref().map(str::to_lowercase);
        Self {
            keyword,
            keyword_lower,
            sort,
            direction,
            page,
        }
    }

    /// Validate raw client input, applying the entity's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] with field details when `sortBy`,
    /// `order`, or `size` is not acceptable.
    pub fn parse(params: SearchParams) -> Result<Self, Error> {
        Self::parse_fields(params).map_err(Error::from)
    }

    fn parse_fields(params: SearchParams) -> Result<Self, DraftValidationError> {
        let SearchParams {
            keyword,
            sort_by,
            order,
            page,
            size,
        } = params;
        let mut checks = FieldChecks::new();

        let sort = match normalise_text(sort_by) {
            None => F::DEFAULT,
            Some(name) => {
                let parsed = F::from_wire_name(&name);
                let allowed: Vec<&str> = F::ALL.iter().map(|field| field.wire_name()).collect();
                checks.format(
                    "sortBy",
                    parsed.is_some(),
                    &format!("sortBy must be one of: {}", allowed.join(", ")),
                );
                parsed.unwrap_or(F::DEFAULT)
            }
        };

        let direction = match normalise_text(order) {
            None => SortDirection::default(),
            Some(text) => {
                let parsed = text.parse::<SortDirection>();
                checks.format("order", parsed.is_ok(), "order must be 'asc' or 'desc'");
                parsed.unwrap_or_default()
            }
        };

        let page_index = page.unwrap_or(DEFAULT_PAGE);
        let page_size = size.unwrap_or(F::DEFAULT_PAGE_SIZE);
        let page = match PageRequest::new(page_index, page_size) {
            Ok(request) => Some(request),
            Err(error) => {
                checks.range("size", &page_size_message(error));
                None
            }
        };

        match page {
            Some(page) => checks.finish(Self::new(keyword, sort, direction, page)),
            None => Err(checks.into_error()),
        }
    }

    /// Trimmed keyword, if any.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Field to sort by.
    pub fn sort(&self) -> F {
        self.sort
    }

    /// Sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Page to return.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Case-insensitive substring match of the keyword against any field.
    ///
    /// Always true when no keyword was supplied.
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        self.keyword_lower.as_deref().is_none_or(|needle| {
            fields
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
        })
    }
}

fn page_size_message(error: PageRequestError) -> String {
    format!("size is out of range: {error}")
}

/// Trim optional text, mapping blank values to `None`.
pub(crate) fn normalise_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ProbeSort {
        Name,
        CreatedBy,
    }

    impl SortField for ProbeSort {
        const DEFAULT: Self = Self::Name;
        const DEFAULT_PAGE_SIZE: u32 = 4;
        const ALL: &'static [Self] = &[Self::Name, Self::CreatedBy];

        fn wire_name(self) -> &'static str {
            match self {
                Self::Name => "name",
                Self::CreatedBy => "createdBy",
            }
        }
    }

    fn params() -> SearchParams {
        SearchParams::default()
    }

    #[rstest]
    fn defaults_apply_when_params_are_absent() {
        let query = SearchQuery::<ProbeSort>::parse(params()).expect("defaults are valid");
        assert_eq!(query.keyword(), None);
        assert_eq!(query.sort(), ProbeSort::Name);
        assert_eq!(query.direction(), SortDirection::Asc);
        assert_eq!(query.page().page(), 0);
        assert_eq!(query.page().size(), 4);
    }

    #[rstest]
    #[case("createdBy")]
    #[case("CREATEDBY")]
    fn sort_field_names_ignore_case(#[case] name: &str) {
        let query = SearchQuery::<ProbeSort>::parse(SearchParams {
            sort_by: Some(name.to_owned()),
            order: Some("DESC".to_owned()),
            ..params()
        })
        .expect("valid params");
        assert_eq!(query.sort(), ProbeSort::CreatedBy);
        assert_eq!(query.direction(), SortDirection::Desc);
    }

    #[rstest]
    #[case(Some("colour"), None, "sortBy")]
    #[case(None, Some("sideways"), "order")]
    fn unknown_sort_inputs_are_rejected(
        #[case] sort_by: Option<&str>,
        #[case] order: Option<&str>,
        #[case] field: &str,
    ) {
        let error = SearchQuery::<ProbeSort>::parse(SearchParams {
            sort_by: sort_by.map(str::to_owned),
            order: order.map(str::to_owned),
            ..params()
        })
        .expect_err("invalid params");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("field details");
        assert_eq!(details["fieldErrors"][0]["field"], field);
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    fn out_of_range_sizes_are_rejected(#[case] size: u32) {
        let error = SearchQuery::<ProbeSort>::parse(SearchParams {
            size: Some(size),
            ..params()
        })
        .expect_err("invalid size");
        assert_eq!(error.details().expect("details")["fieldErrors"][0]["field"], "size");
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("   "), true)]
    #[case(Some("TOMATO"), true)]
    #[case(Some("mato"), true)]
    #[case(Some("basil"), false)]
    fn keyword_matches_case_insensitively(#[case] keyword: Option<&str>, #[case] expected: bool) {
        let query = SearchQuery::<ProbeSort>::parse(SearchParams {
            keyword: keyword.map(str::to_owned),
            ..params()
        })
        .expect("valid params");
        assert_eq!(query.matches_any(&["Tomato soup", "warm"]), expected);
    }
}
