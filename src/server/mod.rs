//! Preview server for generated galleries
//!
//! Pages are served straight from `public/`. With live reload on, a watcher
//! thread rebuilds whichever gallery's manifest changed and tells open pages
//! about it; a page reloads only for its own gallery or a site-wide rebuild.

mod watch;

pub use watch::{Change, Rebuilder, Reload};

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::Galleria;

/// Client side of live reload, reading the gallery slug from `<body>`
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function () {
  var gallery = document.body.getAttribute('data-gallery');
  var socket = new WebSocket('ws://' + location.host + '/__livereload');
  socket.onmessage = function (msg) {
    var changed = msg.data.indexOf('reload:') === 0 ? msg.data.slice(7) : null;
    if (msg.data === 'reload' || !gallery || gallery === changed) {
      location.reload();
    }
  };
  socket.onclose = function () {
    setTimeout(function () { location.reload(); }, 1000);
  };
})();
</script>
"#;

struct Preview {
    public_dir: PathBuf,
    live_reload: bool,
    reloads: broadcast::Sender<Reload>,
}

/// Serve `public/`, optionally rebuilding galleries as their manifests change
pub async fn start(
    galleria: &Galleria,
    ip: &str,
    port: u16,
    live_reload: bool,
    open: bool,
) -> Result<()> {
    let (reloads, _) = broadcast::channel(16);
    let preview = Arc::new(Preview {
        public_dir: galleria.public_dir.clone(),
        live_reload,
        reloads: reloads.clone(),
    });

    let app = Router::new()
        .route("/__livereload", get(live_reload_socket))
        .fallback(serve_page)
        .with_state(preview);

    let host = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Serving {:?} at {}", galleria.public_dir, url);

    if live_reload {
        // The watcher blocks on file events and renders synchronously
        let galleria = galleria.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch::run(galleria, reloads) {
                tracing::error!("Gallery watcher stopped: {:#}", e);
            }
        });
    }

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    println!("Server running at {} (Ctrl+C to stop)", url);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn live_reload_socket(
    ws: WebSocketUpgrade,
    State(preview): State<Arc<Preview>>,
) -> impl IntoResponse {
    let reloads = preview.reloads.subscribe();
    ws.on_upgrade(move |socket| forward_reloads(socket, reloads))
}

/// Push rebuild notices to one browser tab until it goes away
async fn forward_reloads(mut socket: WebSocket, mut reloads: broadcast::Receiver<Reload>) {
    loop {
        let reload = tokio::select! {
            received = reloads.recv() => match received {
                Ok(reload) => reload,
                // Missed notices could have been for any gallery
                Err(broadcast::error::RecvError::Lagged(_)) => Reload::Site,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => continue,
            },
        };

        if socket.send(Message::Text(reload.message())).await.is_err() {
            break;
        }
    }

    tracing::debug!("Live reload client disconnected");
}

async fn serve_page(State(preview): State<Arc<Preview>>, request: Request<Body>) -> Response {
    match resolve(&preview.public_dir, request.uri().path()) {
        Target::Page(path) if preview.live_reload => match tokio::fs::read_to_string(&path).await {
            Ok(html) => Html(inject_live_reload(&html)).into_response(),
            Err(e) => {
                tracing::warn!("Cannot read {:?}: {}", path, e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Target::Grid(location) => Redirect::temporary(&location).into_response(),
        _ => {
            let mut files = ServeDir::new(&preview.public_dir);
            match files.try_call(request).await {
                Ok(response) => response.into_response(),
                Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }
    }
}

/// Where a request path lands inside `public/`
#[derive(Debug, PartialEq, Eq)]
enum Target {
    /// A generated HTML page
    Page(PathBuf),
    /// Lightbox position past the end of a gallery; redirect to its grid
    Grid(String),
    /// Anything else, left to `ServeDir`
    File,
}

fn resolve(public_dir: &Path, uri_path: &str) -> Target {
    let relative = Path::new(uri_path.trim_matches('/'));
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Target::File;
    }

    let page = match relative.extension() {
        Some(ext) if ext == "html" => public_dir.join(relative),
        Some(_) => return Target::File,
        None => public_dir.join(relative).join("index.html"),
    };
    if page.is_file() {
        return Target::Page(page);
    }

    let is_position = relative
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.parse::<usize>().is_ok());

    match relative.parent() {
        Some(gallery)
            if is_position
                && !gallery.as_os_str().is_empty()
                && public_dir.join(gallery).join("index.html").is_file() =>
        {
            Target::Grid(format!("/{}/", gallery.to_string_lossy().replace('\\', "/")))
        }
        _ => Target::File,
    }
}

fn inject_live_reload(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => format!("{}{}{}", &html[..at], LIVE_RELOAD_SCRIPT, &html[at..]),
        None => format!("{}{}", html, LIVE_RELOAD_SCRIPT),
    }
}

fn open_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/c", "start"]);
        command
    } else {
        Command::new("xdg-open")
    };
    command.arg(url).spawn().map(|_| ())
}
