//! Request DTOs.
//!
//! JSON bodies are read leniently: a missing, malformed, or wrongly typed
//! field is simply absent, so the service reports it through its ordered
//! validation instead of the client seeing a deserializer error.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{Map, Value};

use depot_core::types::RawParent;
use depot_service::CreateFileRequest;

/// Parse a request body as a JSON object. Anything else is an empty object.
pub fn json_object(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn string_field(body: &Map<String, Value>, name: &str) -> Option<String> {
    body.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Loose truthiness for flags: `false`, `0`, `""`, `null`, and absence are
/// false; any other value is true.
fn flag_field(body: &Map<String, Value>, name: &str) -> bool {
    match body.get(name) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// `POST /users` body.
#[derive(Debug, Default)]
pub struct RegisterBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterBody {
    /// Read from a raw body.
    pub fn from_body(body: &[u8]) -> Self {
        let map = json_object(body);
        Self {
            email: string_field(&map, "email"),
            password: string_field(&map, "password"),
        }
    }
}

/// Decode `POST /files` into a service request.
///
/// `data` is base64; text that does not decode counts as no data.
pub fn create_file_request(body: &[u8]) -> CreateFileRequest {
    let map = json_object(body);
    let data = string_field(&map, "data")
        .and_then(|b64| STANDARD.decode(b64.trim()).ok())
        .map(Bytes::from);
    CreateFileRequest {
        name: string_field(&map, "name"),
        file_type: string_field(&map, "type"),
        parent_id: RawParent::from_json(map.get("parentId")),
        is_public: flag_field(&map, "isPublic"),
        data,
    }
}

/// `GET /files` query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    pub parent_id: Option<String>,
    pub page: Option<String>,
}

/// `GET /files/{id}/data` query.
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    pub size: Option<String>,
}
