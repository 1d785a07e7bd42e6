//! Request dispatch for the two serverless entry points.
//!
//! Both variants share the same request shape and the same classification into a [`Route`]; they
//! only differ in what a resolved material turns into. [`MaterialsHandler::metadata`] answers with
//! JSON metadata and a download URL, [`MaterialsHandler::download`] renders the PDF and returns it
//! base64-encoded. Neither ever fails: every outcome, including a render fault, is a response.

pub mod response;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use log::{debug, error};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{self, MaterialRecord};
use crate::config::Settings;
use crate::render;

/// Method browsers use for the cross-origin preflight probe.
pub const PREFLIGHT_METHOD: &str = "OPTIONS";
/// The only method that retrieves materials.
pub const RETRIEVAL_METHOD: &str = "GET";

fn default_method() -> String {
    RETRIEVAL_METHOD.to_owned()
}

/// A `null` method becomes the empty string, which no route accepts.
fn nullable_method<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parameters whose value is `null` are treated as absent.
fn nullable_params<'de, D>(
    deserializer: D,
) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let params = Option::<HashMap<String, Option<String>>>::deserialize(deserializer)?;
    Ok(params.map(|params| {
        params
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }))
}

/// Inbound request as delivered by the function runtime.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    /// HTTP method; a missing method counts as `GET`, a `null` one is not allowed.
    #[serde(default = "default_method", deserialize_with = "nullable_method")]
    pub http_method: String,
    /// Query string parameters; runtimes send `null` when there are none.
    #[serde(default, deserialize_with = "nullable_params")]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self::new(RETRIEVAL_METHOD)
    }
}

impl HttpRequest {
    /// Creates a request without query parameters.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            query_string_parameters: None,
        }
    }

    /// Adds a query parameter and returns the updated request.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Returns the non-empty `id` query parameter, if any.
    pub fn material_id(&self) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// Response envelope handed back to the function runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Body, base64-encoded when `is_base64_encoded` is set.
    pub body: String,
    /// Whether `body` carries base64-encoded binary data.
    pub is_base64_encoded: bool,
}

/// Outcome of classifying a request, evaluated in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Cross-origin preflight probe; answered before anything else.
    Preflight,
    /// Any method other than the preflight probe and `GET`.
    MethodNotAllowed,
    /// `GET` without an id.
    Listing,
    /// `GET` with an id the catalog does not know.
    NotFound,
    /// `GET` with a known id.
    Material(&'static MaterialRecord),
}

impl Route {
    /// Classifies `request`. Only the last two outcomes consult the catalog.
    pub fn classify(request: &HttpRequest) -> Self {
        match request.http_method.as_str() {
            PREFLIGHT_METHOD => Route::Preflight,
            RETRIEVAL_METHOD => match request.material_id() {
                None => Route::Listing,
                Some(id) => catalog::lookup(id).map_or(Route::NotFound, Route::Material),
            },
            _ => Route::MethodNotAllowed,
        }
    }
}

/// Serves both handler variants with one set of [`Settings`].
#[derive(Clone, Debug, Default)]
pub struct MaterialsHandler {
    settings: Settings,
}

impl MaterialsHandler {
    /// Creates a handler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn respond<F>(&self, request: &HttpRequest, resolved: F) -> HttpResponse
    where
        F: FnOnce(&'static MaterialRecord) -> HttpResponse,
    {
        let route = Route::classify(request);
        debug!(
            "{} id={:?} -> {:?}",
            request.http_method,
            request.material_id(),
            route
        );

        match route {
            Route::Preflight => response::preflight(),
            Route::MethodNotAllowed => response::method_not_allowed(),
            Route::Listing => response::listing(catalog::list_all()),
            Route::NotFound => response::not_found(),
            Route::Material(record) => resolved(record),
        }
    }

    /// Metadata-only variant: a known id yields its catalog entry and download URL as JSON.
    pub fn metadata(&self, request: &HttpRequest) -> HttpResponse {
        self.respond(request, |record| {
            response::metadata(record, &self.settings.download_path)
        })
    }

    /// Binary variant: a known id yields the rendered PDF as a base64 attachment.
    pub fn download(&self, request: &HttpRequest) -> HttpResponse {
        self.respond(request, |record| {
            match render::render_with(Some(record.kind), &self.settings.render_options()) {
                Ok(document) => response::pdf(record.file_name, &document.bytes),
                Err(err) => {
                    error!("Failed to render {}: {}", record.id(), err);
                    response::render_failed()
                }
            }
        })
    }
}

fn shared_handler() -> &'static MaterialsHandler {
    static HANDLER: OnceLock<MaterialsHandler> = OnceLock::new();
    HANDLER.get_or_init(|| MaterialsHandler::new(Settings::from_env()))
}

/// Metadata-only entry point using settings read once from the environment.
pub fn handle_metadata(request: &HttpRequest) -> HttpResponse {
    shared_handler().metadata(request)
}

/// Binary entry point using settings read once from the environment.
pub fn handle_download(request: &HttpRequest) -> HttpResponse {
    shared_handler().download(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_the_fixed_order() {
        let cases = [
            (HttpRequest::new("OPTIONS").with_query("id", "nope"), "preflight"),
            (HttpRequest::new("POST").with_query("id", "games"), "405"),
            (HttpRequest::new("GET"), "listing"),
            (HttpRequest::new("GET").with_query("id", ""), "listing"),
            (HttpRequest::new("GET").with_query("id", "nope"), "404"),
            (HttpRequest::new("GET").with_query("id", "games"), "material"),
        ];

        for (request, expected) in cases {
            let actual = match Route::classify(&request) {
                Route::Preflight => "preflight",
                Route::MethodNotAllowed => "405",
                Route::Listing => "listing",
                Route::NotFound => "404",
                Route::Material(record) => {
                    assert_eq!(record.id(), "games");
                    "material"
                }
            };
            assert_eq!(actual, expected, "{request:?}");
        }
    }

    #[test]
    fn method_match_is_case_sensitive() {
        assert_eq!(
            Route::classify(&HttpRequest::new("get")),
            Route::MethodNotAllowed
        );
    }

    #[test]
    fn deserializes_runtime_event() {
        let request: HttpRequest = serde_json::from_str(
            r#"{"httpMethod":"GET","queryStringParameters":{"id":"breathing"},"headers":{}}"#,
        )
        .expect("event");
        assert_eq!(request.material_id(), Some("breathing"));

        let bare: HttpRequest =
            serde_json::from_str(r#"{"queryStringParameters":null}"#).expect("bare event");
        assert_eq!(bare, HttpRequest::default());
    }

    #[test]
    fn null_event_values_still_dispatch() {
        let null_id: HttpRequest = serde_json::from_str(
            r#"{"httpMethod":"GET","queryStringParameters":{"id":null,"utm":"mail"}}"#,
        )
        .expect("event with null id");
        assert_eq!(null_id.material_id(), None);
        assert_eq!(Route::classify(&null_id), Route::Listing);

        let null_method: HttpRequest =
            serde_json::from_str(r#"{"httpMethod":null,"queryStringParameters":{"id":"games"}}"#)
                .expect("event with null method");
        assert_eq!(null_method.http_method, "");
        assert_eq!(Route::classify(&null_method), Route::MethodNotAllowed);
    }

    #[test]
    fn serializes_envelope_in_camel_case() {
        let value = serde_json::to_value(response::not_found()).expect("json");
        assert_eq!(value["statusCode"], 404);
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
    }
}
