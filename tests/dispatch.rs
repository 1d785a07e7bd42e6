use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use logoped_materials::config::Settings;
use logoped_materials::handler::{HttpRequest, HttpResponse, MaterialsHandler};
use logoped_materials::render::ATTRIBUTION;
use logoped_materials::transliterate::transliterate;
use lopdf::content::Content;
use lopdf::{Document, Object};
use serde_json::{json, Value};

fn handler() -> MaterialsHandler {
    MaterialsHandler::new(Settings::default())
}

fn both_variants(request: &HttpRequest) -> [HttpResponse; 2] {
    let handler = handler();
    [handler.metadata(request), handler.download(request)]
}

fn body(response: &HttpResponse) -> Value {
    serde_json::from_str(&response.body).expect("json body")
}

/// Text operands of every `Tj`/`TJ` operation, grouped by page.
fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    fn string_operand(object: &Object) -> Option<String> {
        match object {
            Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Object::Array(items) => Some(items.iter().filter_map(string_operand).collect()),
            _ => None,
        }
    }

    let document = Document::load_mem(bytes).expect("parse downloaded pdf");
    document
        .get_pages()
        .values()
        .map(|&page_id| {
            let content = document.get_page_content(page_id).expect("page content");
            Content::decode(&content)
                .expect("decode page content")
                .operations
                .iter()
                .filter(|operation| operation.operator == "Tj" || operation.operator == "TJ")
                .flat_map(|operation| operation.operands.iter())
                .filter_map(string_operand)
                .collect()
        })
        .collect()
}

#[test]
fn preflight_is_empty_regardless_of_query() {
    for request in [
        HttpRequest::new("OPTIONS"),
        HttpRequest::new("OPTIONS").with_query("id", "games"),
        HttpRequest::new("OPTIONS").with_query("id", "nonexistent"),
    ] {
        for response in both_variants(&request) {
            assert_eq!(response.status_code, 200);
            assert!(response.body.is_empty());
            assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
            assert_eq!(response.headers["Access-Control-Allow-Methods"], "GET, OPTIONS");
            assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
            assert_eq!(response.headers["Access-Control-Max-Age"], "86400");
        }
    }
}

#[test]
fn unsupported_methods_are_rejected() {
    for method in ["POST", "PUT", "DELETE", "HEAD", "PATCH"] {
        let request = HttpRequest::new(method).with_query("id", "games");
        for response in both_variants(&request) {
            assert_eq!(response.status_code, 405, "{method}");
            assert_eq!(body(&response), json!({"error": "Method not allowed"}));
            assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        }
    }
}

#[test]
fn missing_id_lists_the_catalog() {
    for request in [HttpRequest::new("GET"), HttpRequest::new("GET").with_query("id", "")] {
        for response in both_variants(&request) {
            assert_eq!(response.status_code, 200);
            assert_eq!(response.headers["Content-Type"], "application/json");

            let body = body(&response);
            assert_eq!(body["total"], 5);
            let materials = body["materials"].as_object().expect("materials object");
            assert_eq!(materials.len(), 5);
            assert_eq!(materials["breathing"]["size"], "1.8 MB");
        }
    }
}

#[test]
fn unknown_id_is_not_found() {
    let request = HttpRequest::new("GET").with_query("id", "nonexistent");
    for response in both_variants(&request) {
        assert_eq!(response.status_code, 404);
        assert_eq!(body(&response), json!({"error": "Material not found"}));
    }
}

#[test]
fn metadata_describes_the_material() {
    let request = HttpRequest::new("GET").with_query("id", "breathing");
    let response = handler().metadata(&request);

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains(r#""filename": "dykhatelnaya-gimnastika.pdf""#));
    assert!(response.body.contains(r#""size": "1.8 MB""#));
    assert_eq!(
        body(&response),
        json!({
            "id": "breathing",
            "name": "Дыхательная гимнастика",
            "filename": "dykhatelnaya-gimnastika.pdf",
            "size": "1.8 MB",
            "description": "Упражнения для развития речевого дыхания",
            "download_url": "/api/download?id=breathing",
            "message": "Материал готов к скачиванию",
        })
    );
}

#[test]
fn metadata_uses_configured_download_path() {
    let settings = Settings {
        download_path: "https://cdn.example.com/materials".to_owned(),
        ..Settings::default()
    };
    let response = MaterialsHandler::new(settings)
        .metadata(&HttpRequest::new("GET").with_query("id", "games"));

    assert_eq!(
        body(&response)["download_url"],
        "https://cdn.example.com/materials?id=games"
    );
}

#[test]
fn download_returns_a_pdf_attachment() {
    let request = HttpRequest::new("GET").with_query("id", "games");
    let response = handler().download(&request);

    assert_eq!(response.status_code, 200);
    assert!(response.is_base64_encoded);
    assert_eq!(response.headers["Content-Type"], "application/pdf");
    assert_eq!(
        response.headers["Content-Disposition"],
        "attachment; filename=\"logopedicheskie-igry.pdf\""
    );
    assert_eq!(
        response.headers["Access-Control-Expose-Headers"],
        "Content-Disposition"
    );
    assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");

    let bytes = STANDARD.decode(&response.body).expect("base64 body");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn downloaded_games_carry_the_footer_on_every_page() {
    let request = HttpRequest::new("GET").with_query("id", "games");
    let response = handler().download(&request);
    let bytes = STANDARD.decode(&response.body).expect("base64 body");

    let footer = transliterate(ATTRIBUTION);
    let pages = page_texts(&bytes);
    assert_eq!(pages.len(), 2);
    for (index, texts) in pages.iter().enumerate() {
        assert_eq!(
            texts.last(),
            Some(&footer),
            "page {} should end with the footer",
            index + 1
        );
    }
}

#[test]
fn null_event_values_are_answered() {
    let null_id: HttpRequest = serde_json::from_value(json!({
        "httpMethod": "GET",
        "queryStringParameters": {"id": null},
    }))
    .expect("event with null id");
    let response = handler().metadata(&null_id);
    assert_eq!(response.status_code, 200);
    assert_eq!(body(&response)["total"], 5);

    let null_method: HttpRequest = serde_json::from_value(json!({
        "httpMethod": null,
        "queryStringParameters": {"id": "games"},
    }))
    .expect("event with null method");
    for response in both_variants(&null_method) {
        assert_eq!(response.status_code, 405);
    }
}

#[test]
fn broken_font_configuration_still_downloads() {
    let settings = Settings::from_lookup(|key| match key {
        "LOGOPED_FONT_PATH" => Some("/__logoped_missing_fonts__/Regular.ttf".to_owned()),
        _ => None,
    });
    let response = MaterialsHandler::new(settings)
        .download(&HttpRequest::new("GET").with_query("id", "articulation"));

    assert_eq!(response.status_code, 200);
    assert!(response.is_base64_encoded);
}

#[test]
fn identical_requests_get_identical_metadata() {
    let request = HttpRequest::new("GET").with_query("id", "workbooks");
    let handler = handler();
    assert_eq!(handler.metadata(&request), handler.metadata(&request));
}

#[test]
fn runtime_event_round_trip() {
    let request: HttpRequest = serde_json::from_value(json!({
        "httpMethod": "GET",
        "queryStringParameters": {"id": "nonexistent"},
        "requestContext": {"identity": {}},
    }))
    .expect("event");

    let envelope = serde_json::to_value(handler().metadata(&request)).expect("envelope");
    assert_eq!(envelope["statusCode"], 404);
    assert_eq!(envelope["body"], r#"{"error": "Material not found"}"#);
    assert_eq!(envelope["isBase64Encoded"], false);
}
