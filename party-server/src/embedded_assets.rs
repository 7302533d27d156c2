//! Page assets compiled into the server binary with `rust-embed`.

use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embedded HTML pages and their static files.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct PageAssets;

/// Star map form page
pub const STARMAP_PAGE: &str = "starmap.html";

/// Marker replaced by data attributes when a page is served with data.
const DATA_MARKER: &str = r#"<form id="starmap-form""#;

/// Serve an embedded asset by request path, 404 when absent.
fn serve_embedded<T: RustEmbed>(uri: &Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    match T::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                Body::from(content.data.into_owned()),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

/// Serve embedded page assets.
pub async fn serve_page_asset(uri: Uri) -> Response {
    serve_embedded::<PageAssets>(&uri)
}

/// Serve a page with `data-default-*` attributes injected into its form.
///
/// Values are attribute-escaped, so user-provided defaults cannot break out
/// of the tag.
pub fn serve_page_with_data(file: &str, attributes: &[(&str, &str)]) -> Response {
    let Some(content) = PageAssets::get(file) else {
        return (StatusCode::NOT_FOUND, "Page not found").into_response();
    };

    let html = String::from_utf8_lossy(&content.data);
    let data: String = attributes
        .iter()
        .map(|(name, value)| format!(r#" data-default-{name}="{}""#, escape_attribute(value)))
        .collect();
    let page = html.replacen(DATA_MARKER, &format!("{DATA_MARKER}{data}"), 1);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from(page),
    )
        .into_response()
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    fn body_text(response: Response) -> String {
        let bytes = tokio_test::block_on(to_bytes(response.into_body(), 1 << 20)).unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_starmap_page_embedded() {
        for file in PageAssets::iter() {
            println!("  - {file}");
        }
        let page = PageAssets::get(STARMAP_PAGE).expect("starmap.html missing");
        let html = String::from_utf8_lossy(&page.data);
        assert!(html.contains(DATA_MARKER), "form marker missing");
        assert!(html.contains("/starmap.png"));
    }

    #[test]
    fn test_data_attributes_injected_once() {
        let response = serve_page_with_data(
            STARMAP_PAGE,
            &[("date", "2023-07-14"), ("lat", "32.0853")],
        );
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response);
        assert!(html.contains(
            r#"<form id="starmap-form" data-default-date="2023-07-14" data-default-lat="32.0853""#
        ));
        assert_eq!(html.matches("data-default-date=").count(), 1);
    }

    #[test]
    fn test_attribute_values_escaped() {
        let html = body_text(serve_page_with_data(
            STARMAP_PAGE,
            &[("title", r#""><script>alert(1)</script>"#)],
        ));
        assert!(html.contains(
            r#"data-default-title="&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;""#
        ));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn test_unknown_page_is_404() {
        let response = serve_page_with_data("missing.html", &[]);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let uri: Uri = "/nothing-here.js".parse().unwrap();
        let response = tokio_test::block_on(serve_page_asset(uri));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_asset_served_with_mime() {
        let uri: Uri = "/starmap.html".parse().unwrap();
        let response = tokio_test::block_on(serve_page_asset(uri));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    }
}
