//! Collection search input and page envelopes.
//!
//! Every collection accepts the same parameters either as a GET query
//! string or as the JSON body of `POST /{collection}/search`. Responses are
//! [`PagedResponse`] envelopes whose links point back at the GET form with
//! the effective (defaulted) parameters, so following a link from a POST
//! search reproduces the same result set.

use actix_web::HttpRequest;
use pagination::{Page, PagedResponse};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, RecipeSearch, SearchParams, SearchQuery, SortField};

/// Keyword, sort, and paging parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchRequest {
    /// Case-insensitive substring matched against the searchable fields.
    #[schema(example = "pie")]
    pub keyword: Option<String>,
    /// Field to sort by, using its camelCase name.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    #[schema(example = "asc")]
    pub order: Option<String>,
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Items per page, at most 100.
    pub size: Option<u32>,
}

impl From<SearchRequest> for SearchParams {
    fn from(value: SearchRequest) -> Self {
        Self {
            keyword: value.keyword,
            sort_by: value.sort_by,
            order: value.order,
            page: value.page,
            size: value.size,
        }
    }
}

/// Recipe search: [`SearchRequest`] plus a category filter.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecipeSearchRequest {
    #[schema(example = "pie")]
    pub keyword: Option<String>,
    pub sort_by: Option<String>,
    #[schema(example = "asc")]
    pub order: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Exact, case-insensitive category name.
    #[schema(example = "Dessert")]
    pub category_name: Option<String>,
}

impl TryFrom<RecipeSearchRequest> for RecipeSearch {
    type Error = Error;

    fn try_from(value: RecipeSearchRequest) -> Result<Self, Self::Error> {
        let RecipeSearchRequest {
            keyword,
            sort_by,
            order,
            page,
            size,
            category_name,
        } = value;
        RecipeSearch::parse(
            SearchParams {
                keyword,
                sort_by,
                order,
                page,
                size,
            },
            category_name,
        )
    }
}

/// Absolute URL of `GET {path}` carrying the effective search parameters.
fn collection_url<F: SortField>(
    request: &HttpRequest,
    path: &str,
    query: &SearchQuery<F>,
    filters: &[(&str, Option<&str>)],
) -> Result<Url, Error> {
    let info = request.connection_info();
    let mut url = Url::parse(&format!("{}://{}{path}", info.scheme(), info.host()))
        .map_err(|err| Error::internal(format!("failed to build collection URL: {err}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(keyword) = query.keyword() {
            pairs.append_pair("keyword", keyword);
        }
        pairs
            .append_pair("sortBy", query.sort().wire_name())
            .append_pair("order", query.direction().as_str());
        for (key, value) in filters {
            if let Some(value) = value {
                pairs.append_pair(key, value);
            }
        }
    }
    Ok(url)
}

/// Wrap a page of domain values into the wire envelope.
///
/// `path` is the collection path, e.g. `/api/v1/recipes`; `filters` are extra
/// query parameters beyond the common ones.
pub(crate) fn paged<F, T, V>(
    request: &HttpRequest,
    path: &str,
    query: &SearchQuery<F>,
    filters: &[(&str, Option<&str>)],
    page: Page<T>,
) -> Result<PagedResponse<V>, Error>
where
    F: SortField,
    V: From<T>,
{
    let base = collection_url(request, path, query, filters)?;
    Ok(PagedResponse::from_page(page.map(V::from), &base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategorySort;
    use actix_web::test::TestRequest;
    use pagination::PageRequest;
    use rstest::rstest;

    fn query(keyword: Option<&str>) -> SearchQuery<CategorySort> {
        SearchQuery::parse(SearchParams {
            keyword: keyword.map(str::to_owned),
            sort_by: Some("description".into()),
            order: Some("DESC".into()),
            page: Some(1),
            size: Some(2),
        })
        .expect("valid query")
    }

    #[rstest]
    fn links_carry_effective_parameters() {
        let request = TestRequest::post()
            .uri("/api/v1/categories/search")
            .insert_header(("host", "recipes.test"))
            .to_http_request();
        let search = query(Some("  sweet "));
        let page = Page::new(vec!["a"], search.page(), 3);

        let response: PagedResponse<String> =
            paged(&request, "/api/v1/categories", &search, &[], page.map(str::to_owned))
                .expect("envelope");

        assert_eq!(
            response.links.self_,
            "http://recipes.test/api/v1/categories?keyword=sweet&sortBy=description&order=desc&page=1&size=2"
        );
        assert_eq!(response.links.next, None);
        assert_eq!(response.page.total_pages, 2);
    }

    #[rstest]
    fn absent_filters_are_omitted() {
        let request = TestRequest::get()
            .uri("/api/v1/recipes")
            .insert_header(("host", "recipes.test"))
            .to_http_request();
        let search = query(None);
        let page: Page<String> = Page::new(Vec::new(), PageRequest::new(0, 2).expect("page"), 0);

        let url = collection_url(
            &request,
            "/api/v1/recipes",
            &search,
            &[("categoryName", None)],
        )
        .expect("url");
        let response: PagedResponse<String> =
            paged(&request, "/api/v1/recipes", &search, &[], page).expect("envelope");

        assert!(!url.as_str().contains("categoryName"));
        assert!(!url.as_str().contains("keyword"));
        assert!(response.content.is_empty());
    }

    #[rstest]
    fn recipe_search_keeps_category_filter() {
        let search = RecipeSearch::try_from(RecipeSearchRequest {
            category_name: Some(" Dessert ".into()),
            ..RecipeSearchRequest::default()
        })
        .expect("valid search");

        assert_eq!(search.category_name.as_deref(), Some("Dessert"));
    }
}
