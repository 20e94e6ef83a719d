//! OpenAPI 3 description of the HTTP surface, served at `/api/openapi.json`.

use crate::output::{ARCHIVE_MEDIA_TYPE, PASSTHROUGH_MEDIA_TYPE};
use crate::pipeline::select::{ADM_MEDIA_TYPE, ISO_MEDIA_TYPE};
use serde_json::{json, Value};

/// Name of the api-key scheme guarding the converter.
pub const SECURITY_SCHEME: &str = "function_key";

/// Build the document. The key requirement is listed only when
/// `key_required`.
pub fn document(key_required: bool) -> Value {
    let security = if key_required {
        json!([{ SECURITY_SCHEME: [] }])
    } else {
        json!([])
    };

    let request_body = json!({
        "required": true,
        "description": "The shipped item instance document, encoded as a JSON string. \
            The content-type selects the output: the ISO or ADM media type yields a \
            zip package, any other value returns the normalized JSON.",
        "content": {
            "application/json": { "schema": { "type": "string" } },
            ISO_MEDIA_TYPE: { "schema": { "type": "string" } },
            ADM_MEDIA_TYPE: { "schema": { "type": "string" } },
        }
    });

    let responses = json!({
        "200": {
            "description": "The OK response",
            "content": {
                PASSTHROUGH_MEDIA_TYPE: { "schema": { "type": "string" } },
                ARCHIVE_MEDIA_TYPE: { "schema": { "type": "string", "format": "binary" } },
            }
        },
        "400": { "description": "Missing content-type, a body that is not JSON, or not exactly one document" },
        "401": { "description": "Missing or wrong function key" },
        "413": { "description": "Request body too large" },
        "500": { "description": "Import, export or packaging failed" },
    });

    let operation = |method: &str| {
        json!({
            "operationId": if method == "get" { "Run" } else { "RunPost" },
            "tags": ["Converter"],
            "summary": "Convert a shipped item instance",
            "security": security,
            "requestBody": request_body,
            "responses": responses,
        })
    };

    json!({
        "openapi": "3.0.1",
        "info": {
            "title": "sii-converter",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/api/Converter": {
                "get": operation("get"),
                "post": operation("post"),
            },
            "/api/health": {
                "get": {
                    "operationId": "Health",
                    "responses": { "200": { "description": "Service is up" } },
                }
            }
        },
        "components": {
            "securitySchemes": {
                SECURITY_SCHEME: {
                    "type": "apiKey",
                    "name": "code",
                    "in": "query",
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_converter_operation() {
        let doc = document(false);
        let get = &doc["paths"]["/api/Converter"]["get"];
        assert_eq!(get["operationId"], "Run");
        assert!(doc["paths"]["/api/Converter"]["post"].is_object());
        for status in ["200", "400", "500"] {
            assert!(get["responses"][status].is_object(), "missing {status}");
        }
        let body = &get["requestBody"]["content"];
        assert!(body[ISO_MEDIA_TYPE].is_object());
        assert!(body[ADM_MEDIA_TYPE].is_object());
    }

    #[test]
    fn security_scheme_is_query_api_key() {
        let doc = document(true);
        let scheme = &doc["components"]["securitySchemes"][SECURITY_SCHEME];
        assert_eq!(scheme["type"], "apiKey");
        assert_eq!(scheme["name"], "code");
        assert_eq!(scheme["in"], "query");
        assert_eq!(
            doc["paths"]["/api/Converter"]["post"]["security"][0][SECURITY_SCHEME],
            json!([])
        );
    }

    #[test]
    fn no_requirement_without_key() {
        let doc = document(false);
        assert_eq!(doc["paths"]["/api/Converter"]["get"]["security"], json!([]));
    }
}
