//! Runs the manual test scenarios against a running demo server.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use restkit_core::{
    headers, BodyParams, FileDescriptor, HttpMethod, Payload, QueryParams, RequestContext,
    RestClient,
};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Exercise the RestKit client against the demo server")]
struct Cli {
    /// Demo server root URL.
    #[arg(long, env = "RESTKIT_BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,

    /// Bearer token sent as `Authorization` with every request.
    #[arg(long, env = "RESTKIT_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET /testapi/getsimple
    GetSimple,
    /// GET /testapi/getwithqueryparams?a=..&b=..
    GetWithParams {
        #[arg(default_value = "5")]
        a: String,
        #[arg(default_value = "10")]
        b: String,
    },
    /// POST a fixed JSON object to /testapi/postsimple
    PostSimple,
    /// Upload one file to /testapi/postsinglefile
    UploadSingle {
        file: PathBuf,
        /// MIME type; guessed from the extension when omitted.
        #[arg(long)]
        mimetype: Option<String>,
    },
    /// Upload several files to /testapi/uploadmultiplefiles
    UploadMultiple {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let base = cli.base_url.trim_end_matches('/');
    let client = RestClient::new()?;
    let mut ctx = RequestContext::new();
    if let Some(token) = &cli.token {
        ctx.add_header(headers::AUTHORIZATION, token);
    }

    let result = match cli.command {
        Command::GetSimple => {
            client
                .make_request(&mut ctx, &format!("{base}/testapi/getsimple"), HttpMethod::Get, None, None)
                .await
        }
        Command::GetWithParams { a, b } => {
            let query = QueryParams::from([("a".to_string(), a), ("b".to_string(), b)]);
            client
                .make_request(
                    &mut ctx,
                    &format!("{base}/testapi/getwithqueryparams"),
                    HttpMethod::Get,
                    Some(&query),
                    None,
                )
                .await
        }
        Command::PostSimple => {
            ctx.add_header(headers::CONTENT_TYPE, headers::APPLICATION_JSON);
            let body = hero();
            client
                .make_request(
                    &mut ctx,
                    &format!("{base}/testapi/postsimple"),
                    HttpMethod::Post,
                    None,
                    Some(&body),
                )
                .await
        }
        Command::UploadSingle { file, mimetype } => {
            let file = FileDescriptor::from_path(&file, mimetype.as_deref())
                .with_context(|| format!("reading {}", file.display()))?;
            client
                .upload_files(
                    &mut ctx,
                    &format!("{base}/testapi/postsinglefile"),
                    HttpMethod::Post,
                    None,
                    None,
                    &[file],
                )
                .await
        }
        Command::UploadMultiple { files } => {
            let files = files
                .iter()
                .map(|path| {
                    FileDescriptor::from_path(path, None)
                        .with_context(|| format!("reading {}", path.display()))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            client
                .upload_files(
                    &mut ctx,
                    &format!("{base}/testapi/uploadmultiplefiles"),
                    HttpMethod::Post,
                    None,
                    None,
                    &files,
                )
                .await
        }
    };

    info!(
        status = ?ctx.outcome.status,
        content = ?ctx.outcome.content_kind,
        "request finished"
    );

    match result? {
        Some(Payload::Text(text)) => println!("{text}"),
        Some(Payload::Json(value)) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("(no decodable body)"),
    }
    Ok(())
}

fn hero() -> BodyParams {
    let mut body = BodyParams::new();
    body.insert("name".to_string(), json!("Clark"));
    body.insert("lastname".to_string(), json!("Kent"));
    body.insert("hero".to_string(), json!("Superman"));
    body.insert("age".to_string(), json!(25));
    body.insert("male".to_string(), json!(true));
    body
}
