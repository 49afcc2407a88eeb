//! HTTP server rendering posts on request.
//!
//! | Route                    | Response                              |
//! |--------------------------|---------------------------------------|
//! | `/`                      | index page                            |
//! | `/posts/{key}`           | rendered post                         |
//! | `/posts/{key}/{file}`    | file from the post's directory        |
//! | `/highlight.css`         | stylesheet of the active theme        |
//!
//! Only `GET` and `HEAD` are answered; everything else is a 404.

mod lifecycle;
mod path;
mod response;

use crate::{cli::pages::Site, config::SiteConfig, core::register_server, log, utils::plural_count};
use anyhow::{Context, Result};
use path::Route;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Worker threads answering requests.
const WORKER_THREADS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &SiteConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    Ok(BoundServer { server, addr })
}

impl BoundServer {
    /// Start the request loop (blocking until shutdown).
    pub fn run(self, site: Arc<Site>) -> Result<()> {
        log!("serve"; "http://{}", self.addr);
        run_request_loop(&self.server, site)
    }
}

/// Load posts, bind, and serve until Ctrl+C.
pub fn serve_site(config: Arc<SiteConfig>) -> Result<()> {
    let site = Arc::new(Site::load(config)?);
    log!("serve"; "{} loaded", plural_count(site.posts().len(), "post"));

    bind_server(site.config())?.run(site)
}

fn run_request_loop(server: &Server, site: Arc<Site>) -> Result<()> {
    // Requests render Markdown; a pool keeps one slow page from blocking others
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKER_THREADS)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let site = Arc::clone(&site);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &site) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, site: &Site) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    crate::debug!("serve"; "{} {}", request.method(), request.url());

    if !matches!(request.method(), Method::Get | Method::Head) {
        let body = site.not_found_page(request.url());
        return response::respond_not_found(request, body);
    }

    match path::parse_route(request.url()) {
        Route::Index => response::respond_html(request, 200, site.index_page()),
        Route::HighlightCss => match site.highlight_css() {
            Some(css) => response::respond_css(request, css),
            None => not_found(request, site),
        },
        Route::Post(key) => match site.posts().get(&key) {
            Some(post) => match site.post_page(post) {
                Ok(html) => response::respond_html(request, 200, html),
                Err(e) => {
                    log!("error"; "{:#}", e);
                    response::respond_error(request, &e)
                }
            },
            None => not_found(request, site),
        },
        Route::PostFile { key, file } => {
            let path = site
                .posts()
                .get(&key)
                .and_then(|post| path::resolve_file(&post.dir, &file));
            match path {
                Some(path) => response::respond_file(request, &path),
                None => not_found(request, site),
            }
        }
        Route::NotFound => not_found(request, site),
    }
}

fn not_found(request: Request, site: &Site) -> Result<()> {
    let body = site.not_found_page(request.url());
    response::respond_not_found(request, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostCollection;
    use std::io::{Read, Write};
    use std::net::{IpAddr, Ipv4Addr, TcpStream};
    use std::{fs, thread};

    fn request(addr: SocketAddr, method: &str, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(stream, "{method} {path} HTTP/1.0\r\nHost: localhost\r\n\r\n").unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn test_routes() {
        let dir = tempfile::tempdir().unwrap();
        let post_dir = dir.path().join("hello");
        fs::create_dir_all(&post_dir).unwrap();
        fs::write(
            post_dir.join("index.md"),
            "---\ntitle: Hello World\n---\n```rust\nlet x = 1;\n```\n",
        )
        .unwrap();
        fs::write(post_dir.join("note.txt"), "attached").unwrap();

        let config = Arc::new(SiteConfig::default());
        let posts = PostCollection::load(dir.path(), false).unwrap();
        let site = Arc::new(Site::with_posts(config, posts).unwrap());

        let (server, addr) =
            lifecycle::bind_with_retry(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
        let addr = server.server_addr().to_ip().unwrap_or(addr);
        let server = Arc::new(server);
        let handle = {
            let server = Arc::clone(&server);
            thread::spawn(move || run_request_loop(&server, site))
        };

        let index = request(addr, "GET", "/");
        assert!(index.contains(" 200 "));
        assert!(index.contains("<a href=\"/posts/hello\">Hello World</a>"));

        let post = request(addr, "GET", "/posts/hello");
        assert!(post.contains(" 200 "));
        assert!(post.contains("lang-rust editor-colors"));

        let file = request(addr, "GET", "/posts/hello/note.txt");
        assert!(file.contains(" 200 "));
        assert!(file.ends_with("attached"));

        let css = request(addr, "GET", "/highlight.css");
        assert!(css.contains("text/css"));

        let head = request(addr, "HEAD", "/");
        assert!(head.contains(" 200 "));
        assert!(!head.contains("<html"));

        assert!(request(addr, "GET", "/posts/missing").contains(" 404 "));
        assert!(request(addr, "GET", "/posts/hello/../../etc/passwd").contains(" 404 "));
        assert!(request(addr, "POST", "/").contains(" 404 "));

        server.unblock();
        handle.join().unwrap().unwrap();
    }
}
