use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub const SUCCESS_MESSAGE: &str = "This is the message of SUCCESS!";
pub const NOT_FOUND_MESSAGE: &str = "The endpoint you are looking for does not exist (404).";

const GET_ENDPOINTS: [&str; 2] = ["/testapi/getsimple", "/testapi/getwithqueryparams"];
const POST_ENDPOINTS: [&str; 3] = [
    "/testapi/postsimple",
    "/testapi/postsinglefile",
    "/testapi/uploadmultiplefiles",
];

#[derive(Deserialize)]
pub struct Operands {
    pub a: Option<String>,
    pub b: Option<String>,
}

/// Result of `a / b`: an integer when exact, a float otherwise, and a
/// message when `b` is zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Division {
    Exact(i64),
    Fraction(f64),
    Undefined(String),
}

/// The larger operand, or a message when both are equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Greater {
    Number(i64),
    Equal(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arithmetic {
    pub sum: i64,
    pub diff: i64,
    pub multiply: i64,
    pub division: Division,
    pub greater: Greater,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub mimetype: String,
    #[serde(rename = "size (bytes)")]
    pub size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesSummary {
    pub total_files: usize,
    pub files_info: Vec<FileInfo>,
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/testapi/getsimple", get(get_simple))
        .route("/testapi/getwithqueryparams", get(get_with_query_params))
        .route("/testapi/postsimple", post(post_simple))
        .route("/testapi/postsinglefile", post(post_single_file))
        .route("/testapi/uploadmultiplefiles", post(upload_multiple_files))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn index() -> Html<String> {
    Html(format!(
        "<html><body style=\"font-family: 'Trebuchet MS';\">\
         This is a demo server for the RestKit client library.\
         <h2>Test Endpoints</h2><br>\
         <h3>GET</h3><ul>{}</ul>\
         <h3>POST</h3><ul>{}</ul>\
         </body></html>",
        list_items(&GET_ENDPOINTS),
        list_items(&POST_ENDPOINTS),
    ))
}

fn list_items(paths: &[&str]) -> String {
    paths.iter().map(|p| format!("<li>{p}</li>")).collect()
}

async fn get_simple() -> Html<&'static str> {
    Html(SUCCESS_MESSAGE)
}

async fn get_with_query_params(Query(operands): Query<Operands>) -> Response {
    let a = operands.a.as_deref().and_then(parse_int);
    let b = operands.b.as_deref().and_then(parse_int);
    match (a, b) {
        (Some(a), Some(b)) => Json(arithmetic(a, b)).into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            "Query parameters 'a' and 'b' must be integers.",
        )
            .into_response(),
    }
}

pub fn arithmetic(a: i32, b: i32) -> Arithmetic {
    let (a, b) = (i64::from(a), i64::from(b));
    let division = if b == 0 {
        Division::Undefined("Cannot be defined".to_string())
    } else if a % b == 0 {
        Division::Exact(a / b)
    } else {
        Division::Fraction(a as f64 / b as f64)
    };
    let greater = match b.cmp(&a) {
        std::cmp::Ordering::Greater => Greater::Number(b),
        std::cmp::Ordering::Less => Greater::Number(a),
        std::cmp::Ordering::Equal => Greater::Equal("equal numbers".to_string()),
    };
    Arithmetic {
        sum: a + b,
        diff: a - b,
        multiply: a * b,
        division,
        greater,
    }
}

/// Leading optional sign and decimal digits, surrounding whitespace ignored:
/// `" 12abc"` is 12, `"abc"` is nothing.
pub fn parse_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(|c: char| c == '+' || c == '-'));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

async fn post_simple(body: Bytes) -> Response {
    match serde_json::from_slice::<Map<String, Value>>(&body) {
        Ok(object) if !object.is_empty() => (StatusCode::CREATED, Json(object)).into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            "No data was found in the request body.",
        )
            .into_response(),
    }
}

async fn post_single_file(multipart: Result<Multipart, MultipartRejection>) -> Response {
    let Ok(multipart) = multipart else {
        return (StatusCode::BAD_REQUEST, "Please upload a file.").into_response();
    };
    match collect_files(multipart).await.into_iter().next() {
        Some(file) => Json(file).into_response(),
        None => (StatusCode::BAD_REQUEST, "No files were found.").into_response(),
    }
}

async fn upload_multiple_files(multipart: Result<Multipart, MultipartRejection>) -> Response {
    let Ok(multipart) = multipart else {
        return (StatusCode::BAD_REQUEST, "Please upload at least one file.").into_response();
    };
    let files = collect_files(multipart).await;
    if files.is_empty() {
        return (StatusCode::BAD_REQUEST, "No files were found.").into_response();
    }
    Json(FilesSummary {
        total_files: files.len(),
        files_info: files,
    })
    .into_response()
}

/// Metadata of every part that carries a filename. Plain form fields are
/// ignored; a malformed body ends collection early.
async fn collect_files(mut multipart: Multipart) -> Vec<FileInfo> {
    let mut files = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "malformed multipart body");
                break;
            }
        };
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        match field.bytes().await {
            Ok(data) => files.push(FileInfo {
                name,
                mimetype,
                size: data.len(),
            }),
            Err(e) => {
                warn!(error = %e, file = %name, "failed to read multipart field");
                break;
            }
        }
    }
    files
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_for_distinct_operands() {
        let result = arithmetic(5, 10);
        assert_eq!(result.sum, 15);
        assert_eq!(result.diff, -5);
        assert_eq!(result.multiply, 50);
        assert_eq!(result.division, Division::Fraction(0.5));
        assert_eq!(result.greater, Greater::Number(10));
    }

    #[test]
    fn arithmetic_for_equal_operands() {
        let result = arithmetic(5, 5);
        assert_eq!(result.division, Division::Exact(1));
        assert_eq!(result.greater, Greater::Equal("equal numbers".to_string()));
    }

    #[test]
    fn division_by_zero_is_undefined() {
        let result = arithmetic(7, 0);
        assert_eq!(result.division, Division::Undefined("Cannot be defined".to_string()));
        assert_eq!(result.greater, Greater::Number(7));
    }

    #[test]
    fn arithmetic_serializes_like_the_wire_format() {
        let json = serde_json::to_value(arithmetic(10, 5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sum": 15, "diff": 5, "multiply": 50, "division": 2, "greater": 10})
        );
    }

    #[test]
    fn parse_int_reads_leading_digits() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  -7"), Some(-7));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("99999999999"), None);
    }

    #[test]
    fn file_info_uses_wire_names() {
        let info = FileInfo {
            name: "beach.jpg".to_string(),
            mimetype: "image/jpeg".to_string(),
            size: 3,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["size (bytes)"], 3);

        let summary = FilesSummary {
            total_files: 1,
            files_info: vec![info],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalFiles"], 1);
        assert_eq!(json["filesInfo"][0]["name"], "beach.jpg");
    }
}
