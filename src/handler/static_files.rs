//! Static file serving module
//!
//! Maps request paths onto the serving root, then answers with the file,
//! a redirect, a directory index or a generated listing.

use crate::error::ServeError;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, date, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::borrow::Cow;
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Files served in place of a directory listing, in priority order
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Request path translated onto the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    /// Percent-decoded request path, used for listing titles
    pub decoded: String,
    pub fs_path: PathBuf,
    /// Request path ended with `/`
    pub trailing_slash: bool,
}

/// Translate a request path into a filesystem path under `root`
///
/// Query and fragment are dropped and the path is percent-decoded. `..`
/// removes the previous segment and stops at `root`; after that any segment
/// that is not a plain file name (drive prefixes, embedded NUL or `\`)
/// is skipped, so the result always stays below `root`.
pub fn translate_path(root: &Path, raw_path: &str) -> TranslatedPath {
    let path = raw_path.split(['?', '#']).next().unwrap_or_default();
    let trailing_slash = path.trim_end().ends_with('/');
    let decoded = urlencoding::decode(path).map_or_else(|_| path.to_string(), Cow::into_owned);

    let mut fs_path = root.to_path_buf();
    for segment in normalize_segments(&decoded)
        .into_iter()
        .filter(|s| is_plain_segment(s))
    {
        fs_path.push(segment);
    }

    TranslatedPath {
        decoded,
        fs_path,
        trailing_slash,
    }
}

/// Resolve `.` and `..` lexically; `..` never climbs above the first segment
fn normalize_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

fn is_plain_segment(segment: &str) -> bool {
    if segment.is_empty() || segment.contains(['\0', '\\']) {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Serve a GET/HEAD request from the serving root
pub async fn serve_path(
    ctx: &RequestContext,
    root: &Path,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let target = translate_path(root, &ctx.path);
    let metadata = fs::metadata(&target.fs_path)
        .await
        .map_err(|e| ServeError::from_io(target.fs_path.clone(), e))?;
    ensure_within_root(root, &target.fs_path, &ctx.path).await?;

    if metadata.is_dir() {
        if !target.trailing_slash {
            return Ok(http::build_301_response(&directory_location(ctx)));
        }
        if let Some((index_path, index_meta)) = find_index_file(&target.fs_path).await {
            ensure_within_root(root, &index_path, &ctx.path).await?;
            return serve_file(ctx, &index_path, &index_meta).await;
        }
        return listing::serve_listing(ctx, &target.fs_path, &target.decoded).await;
    }

    // A trailing slash names a directory, never a file
    if target.trailing_slash || !metadata.is_file() {
        return Err(ServeError::NotFound);
    }

    serve_file(ctx, &target.fs_path, &metadata).await
}

/// Reject paths whose canonical form leaves the root (symlinks)
async fn ensure_within_root(
    root: &Path,
    path: &Path,
    request_path: &str,
) -> Result<(), ServeError> {
    let canonical = fs::canonicalize(path)
        .await
        .map_err(|e| ServeError::from_io(path.to_path_buf(), e))?;
    if canonical.starts_with(root) {
        Ok(())
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        Err(ServeError::NotFound)
    }
}

/// Location for a directory requested without its trailing slash
///
/// Leading slashes collapse to one so the target can never read as a
/// scheme-relative `//host` URL.
fn directory_location(ctx: &RequestContext) -> String {
    let path = ctx.path.trim_start_matches('/');
    match &ctx.query {
        Some(query) => format!("/{path}/?{query}"),
        None => format!("/{path}/"),
    }
}

async fn find_index_file(dir: &Path) -> Option<(PathBuf, Metadata)> {
    for name in INDEX_FILES {
        let candidate = dir.join(name);
        if let Ok(meta) = fs::metadata(&candidate).await {
            if meta.is_file() {
                return Some((candidate, meta));
            }
        }
    }
    None
}

/// Serve a regular file, honouring `If-Modified-Since`
async fn serve_file(
    ctx: &RequestContext,
    path: &Path,
    metadata: &Metadata,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let modified = metadata.modified().ok();

    if let (Some(modified), Some(since)) = (modified, ctx.if_modified_since.as_deref()) {
        if date::not_modified_since(modified, since) {
            return Ok(http::build_304_response(&date::format_http_date(modified)));
        }
    }

    let content = fs::read(path)
        .await
        .map_err(|e| ServeError::from_io(path.to_path_buf(), e))?;
    let content_type = mime::content_type_for(path);
    let last_modified = modified.map(date::format_http_date);

    Ok(http::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified.as_deref(),
        ctx.is_head,
    ))
}
