//! `X-Total-Count` and `Link` headers for paged responses.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Uri};

use account_lib::entities::PaginatedResult;

use crate::constants::X_TOTAL_COUNT;

const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";

/// Builds the pagination headers for `result`, linking back to `uri`.
pub fn pagination_headers<T>(uri: &Uri, result: &PaginatedResult<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(X_TOTAL_COUNT),
        HeaderValue::from(result.total),
    );

    let link = link_header(uri, result.page, result.page_size, result.total_pages);
    match HeaderValue::from_str(&link) {
        Ok(value) => {
            headers.insert(header::LINK, value);
        }
        Err(e) => tracing::warn!(error = %e, "skipping unrepresentable Link header"),
    }

    headers
}

/// RFC 5988 `Link` value with `next`, `prev`, `last` and `first` relations.
pub fn link_header(uri: &Uri, page: u32, page_size: u32, total_pages: u32) -> String {
    let last_page = total_pages.saturating_sub(1);
    let mut links = Vec::with_capacity(4);

    if page < last_page {
        links.push(prepare_link(uri, page + 1, page_size, "next"));
    }
    if page > 0 {
        links.push(prepare_link(uri, page - 1, page_size, "prev"));
    }
    links.push(prepare_link(uri, last_page, page_size, "last"));
    links.push(prepare_link(uri, 0, page_size, "first"));

    links.join(",")
}

fn prepare_link(uri: &Uri, page: u32, page_size: u32, rel: &str) -> String {
    let target = with_page(uri, page, page_size)
        .replace(',', "%2C")
        .replace(';', "%3B");
    format!("<{target}>; rel=\"{rel}\"")
}

/// `uri` with its `page` and `size` parameters replaced.
fn with_page(uri: &Uri, page: u32, page_size: u32) -> String {
    let mut params: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let name = pair.split('=').next().unwrap_or_default();
            name != PAGE_PARAM && name != SIZE_PARAM
        })
        .collect();

    let page = format!("{PAGE_PARAM}={page}");
    let size = format!("{SIZE_PARAM}={page_size}");
    params.push(&page);
    params.push(&size);

    format!("{}?{}", uri.path(), params.join("&"))
}
