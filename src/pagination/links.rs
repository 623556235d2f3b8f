//! Pagination links.
//!
//! Links are derived from the request URL with only the `page` parameter
//! rewritten. Every other query parameter is kept verbatim and in order.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::request::RequestView;
use crate::pagination::paginator::{PageRequest, PAGE};

/// The URL a paged request was made to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    scheme: String,
    host: String,
    path: String,
    /// Raw `key=value` pieces, undecoded.
    query: Vec<String>,
}

impl RequestUrl {
    pub fn new(scheme: &str, host: &str, path_and_query: &str) -> Self {
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));
        Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            path: path.to_string(),
            query: query
                .split('&')
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Parse an absolute URL such as `https://host/path?query`.
    pub fn parse(absolute: &str) -> Option<Self> {
        let url = Url::parse(absolute).ok()?;
        let host = match (url.host_str()?, url.port()) {
            (host, Some(port)) => format!("{host}:{port}"),
            (host, None) => host.to_string(),
        };
        let path_and_query = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };
        Some(Self::new(url.scheme(), &host, &path_and_query))
    }

    /// URL of `request`, which must carry a host.
    pub fn from_request(request: &RequestView, scheme: &str) -> Option<Self> {
        Some(Self::new(scheme, request.host()?, request.path_and_query()))
    }

    /// The query string without `?`.
    pub fn query_string(&self) -> String {
        self.query.join("&")
    }

    /// Page parameters of this URL.
    pub fn page_request(&self) -> Result<PageRequest, crate::errors::ErrorList> {
        PageRequest::from_query_string(&self.query_string())
    }

    fn with_page(&self, page: usize) -> String {
        let rewritten = format!("{PAGE}={page}");
        let mut replaced = false;
        let mut query: Vec<&str> = self
            .query
            .iter()
            .map(|piece| {
                let key = piece.split_once('=').map_or(piece.as_str(), |(k, _)| k);
                if key == PAGE {
                    replaced = true;
                    rewritten.as_str()
                } else {
                    piece.as_str()
                }
            })
            .collect();
        if !replaced {
            query.push(&rewritten);
        }
        format!("{}://{}{}?{}", self.scheme, self.host, self.path, query.join("&"))
    }
}

/// Navigation links of a paged response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub last: String,
}

/// Build the links for `request` over `total_records`.
pub fn build_links(url: &RequestUrl, request: PageRequest, total_records: usize) -> Links {
    let last = request.total_pages(total_records).max(1);
    let page = request.page();
    Links {
        self_link: url.with_page(page),
        first: url.with_page(1),
        prev: (page > 1).then(|| url.with_page(page - 1)),
        next: (page < last).then(|| url.with_page(page + 1)),
        last: url.with_page(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLANS: &str = "https://www.dsb.gov.au/cds-au/v1/energy/plans?category=ALL&page=4&page-size=2";

    fn page_of(link: &str) -> &str {
        link.rsplit_once("?")
            .unwrap()
            .1
            .split('&')
            .find_map(|p| p.strip_prefix("page="))
            .unwrap()
    }

    #[test]
    fn test_links_over_many_pages() {
        let url = RequestUrl::parse(PLANS).unwrap();
        let links = build_links(&url, url.page_request().unwrap(), 1000);

        let at = |page: usize| {
            format!("https://www.dsb.gov.au/cds-au/v1/energy/plans?category=ALL&page={page}&page-size=2")
        };
        assert_eq!(links.self_link, at(4));
        assert_eq!(links.first, at(1));
        assert_eq!(links.prev, Some(at(3)));
        assert_eq!(links.next, Some(at(5)));
        assert_eq!(links.last, at(500));
    }

    #[test]
    fn test_first_and_last_page() {
        let url = RequestUrl::parse("http://localhost:8080/cds-au/v1/energy/plans").unwrap();
        let links = build_links(&url, PageRequest::default(), 10);
        assert!(links.prev.is_none());
        assert!(links.next.is_none());
        assert_eq!(links.last, "http://localhost:8080/cds-au/v1/energy/plans?page=1");
    }

    #[test]
    fn test_page_parameter_appended_when_absent() {
        let url = RequestUrl::new("https", "h", "/p?category=ALL&page-size=1");
        let links = build_links(&url, PageRequest::new(2, 1).unwrap(), 3);
        assert_eq!(links.self_link, "https://h/p?category=ALL&page-size=1&page=2");
        assert_eq!(page_of(&links.last), "3");
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let url = RequestUrl::new("https", "holder.example", "/cds-au/v1/banking/payees?page=1");
        let links = build_links(&url, PageRequest::default(), 0);
        assert_eq!(page_of(&links.last), "1");
        assert!(links.next.is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let url = RequestUrl::new("https", "h", "/p?page=2&page-size=1");
        let value = serde_json::to_value(build_links(&url, url.page_request().unwrap(), 3)).unwrap();
        for key in ["self", "first", "prev", "next", "last"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
