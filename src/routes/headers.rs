//! Alert and pagination response headers.
//!
//! Alert headers are namespaced by the application name
//! (`X-{app}-alert`, `X-{app}-params`, `X-{app}-error`) so that clients can
//! surface notifications without parsing bodies.

use actix_web::HttpResponseBuilder;
use url::form_urlencoded;

use crate::pagination::Page;

pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";
pub const LINK_HEADER: &str = "Link";

pub type HeaderPairs = Vec<(String, String)>;

/// Builds application-scoped alert headers.
#[derive(Clone, Copy, Debug)]
pub struct HeaderUtil<'a> {
    application_name: &'a str,
}

impl<'a> HeaderUtil<'a> {
    pub fn new(application_name: &'a str) -> Self {
        Self { application_name }
    }

    pub fn alert_header(&self) -> String {
        format!("X-{}-alert", self.application_name)
    }

    pub fn params_header(&self) -> String {
        format!("X-{}-params", self.application_name)
    }

    pub fn error_header(&self) -> String {
        format!("X-{}-error", self.application_name)
    }

    pub fn alert(&self, message: &str, param: &str) -> HeaderPairs {
        vec![
            (self.alert_header(), message.to_string()),
            (self.params_header(), encode(param)),
        ]
    }

    pub fn entity_creation_alert(&self, entity_name: &str, param: &str) -> HeaderPairs {
        self.alert(
            &format!("A new {entity_name} is created with identifier {param}"),
            param,
        )
    }

    pub fn entity_update_alert(&self, entity_name: &str, param: &str) -> HeaderPairs {
        self.alert(
            &format!("A {entity_name} is updated with identifier {param}"),
            param,
        )
    }

    pub fn entity_deletion_alert(&self, entity_name: &str, param: &str) -> HeaderPairs {
        self.alert(
            &format!("A {entity_name} is deleted with identifier {param}"),
            param,
        )
    }

    pub fn failure_alert(&self, entity_name: &str, error_key: &str) -> HeaderPairs {
        vec![
            (self.error_header(), format!("error.{error_key}")),
            (self.params_header(), encode(entity_name)),
        ]
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Rebuilds `path?query` with `page` and `size` replaced.
fn page_uri(path: &str, query: &str, page: usize, size: usize) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key != "page" && key != "size" {
            serializer.append_pair(&key, &value);
        }
    }
    serializer
        .append_pair("page", &page.to_string())
        .append_pair("size", &size.to_string());

    format!("{path}?{}", serializer.finish())
}

/// `X-Total-Count` and RFC 5988 `Link` headers describing `page`.
///
/// `path` and `query` are those of the current request.
pub fn pagination_headers<T>(path: &str, query: &str, page: &Page<T>) -> HeaderPairs {
    let size = page.size;
    let last = page.total_pages().saturating_sub(1);
    let mut links = Vec::with_capacity(4);

    if let Some(next) = page.page.checked_add(1).filter(|_| page.has_next()) {
        links.push(format!("<{}>; rel=\"next\"", page_uri(path, query, next, size)));
    }
    if page.has_previous() {
        links.push(format!(
            "<{}>; rel=\"prev\"",
            page_uri(path, query, page.page - 1, size)
        ));
    }
    links.push(format!("<{}>; rel=\"last\"", page_uri(path, query, last, size)));
    links.push(format!("<{}>; rel=\"first\"", page_uri(path, query, 0, size)));

    vec![
        (TOTAL_COUNT_HEADER.to_string(), page.total.to_string()),
        (LINK_HEADER.to_string(), links.join(",")),
    ]
}

/// Copies every pair onto the response being built.
pub fn apply_headers(builder: &mut HttpResponseBuilder, headers: HeaderPairs) {
    for pair in headers {
        builder.insert_header(pair);
    }
}
