use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::any,
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::domain::config::ServerConfig;

/// Shared request-handler state, written once before the listener starts
/// accepting connections and read-only afterwards.
#[derive(Clone)]
struct AppState {
    local_ip: Ipv4Addr,
    root: PathBuf,
}

pub async fn run(local_ip: Ipv4Addr) -> Result<()> {
    let state = AppState {
        local_ip,
        root: PathBuf::from(ServerConfig::ROOT_DIR),
    };

    let addr = format!("{}:{}", ServerConfig::BIND_ADDR, ServerConfig::HTTP_PORT);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("File server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/about", any(about_page))
        .fallback(browse)
        .with_state(state)
}

/// Serves everything under the shared root: directories as an HTML
/// listing, anything else as a static-file response.
async fn browse(State(state): State<AppState>, req: Request) -> Result<Response, BrowseError> {
    let url_path = req.uri().path().to_owned();
    // The raw URL path is prefixed onto the root verbatim; `..` segments
    // are not filtered.
    let fs_path = PathBuf::from(format!("{}{}", state.root.display(), url_path));

    let meta = tokio::fs::metadata(&fs_path)
        .await
        .map_err(|_| BrowseError::NotFound)?;

    if meta.is_dir() {
        let listing = render_listing(&fs_path, &url_path)
            .await
            .map_err(|_| BrowseError::DirUnreadable)?;
        return Ok(Html(listing).into_response());
    }

    // ServeFile handles content type, length, conditional requests and
    // byte ranges.
    match ServeFile::new(&fs_path).oneshot(req).await {
        Ok(res) => Ok(res.into_response()),
        Err(infallible) => match infallible {},
    }
}

async fn render_listing(dir: &Path, url_path: &str) -> std::io::Result<String> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let mut html = format!("<h1>Index of {}</h1><ul>", url_path);
    for name in &names {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>",
            join_url_path(url_path, name),
            name
        ));
    }
    html.push_str("</ul>");
    Ok(html)
}

fn join_url_path(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}

async fn about_page(State(state): State<AppState>) -> Html<String> {
    Html(render_about(state.local_ip))
}

fn render_about(local_ip: Ipv4Addr) -> String {
    format!(
        r#"<html>
    <head>
        <title>About This Server</title>
    </head>
    <body>
        <h1>About This Server</h1>
        <p>This is a simple file server. It serves files from the current directory and allows users to browse and view text files via a web browser.</p>
        <h2>Features:</h2>
        <ul>
            <li>Lists files and directories in the current directory.</li>
            <li>Allows users to view the content of text files directly in the browser.</li>
            <li>Accessible via local network IP as well as localhost.</li>
        </ul>
        <h2>How to Access:</h2>
        <p>You can access the server using the following URLs:</p>
        <ul>
            <li><a href="http://127.0.0.1">http://127.0.0.1</a> (Localhost)</li>
            <li><a href="http://{ip}">http://{ip}</a> (LAN IP)</li>
        </ul>
        <p>Replace <code>LAN IP</code> with the actual IP address provided above.</p>
    </body>
</html>
"#,
        ip = local_ip
    )
}

/// Per-request failures, converted to plain status responses. Stat
/// failures of any kind collapse to 404.
#[derive(Debug)]
enum BrowseError {
    NotFound,
    DirUnreadable,
}

impl IntoResponse for BrowseError {
    fn into_response(self) -> Response {
        match self {
            BrowseError::NotFound => {
                (StatusCode::NOT_FOUND, "404 page not found").into_response()
            }
            BrowseError::DirUnreadable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Unable to read directory").into_response()
            }
        }
    }
}
