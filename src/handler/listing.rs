//! Directory listing rendering

use crate::error::ServeError;
use crate::handler::router::RequestContext;
use crate::http::{self, response::escape_html};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// Directory, after following symlinks
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }

    fn display_name(&self) -> String {
        let mut name = escape_html(&self.name);
        if self.is_dir {
            name.push('/');
        }
        if self.is_symlink {
            name.push('@');
        }
        name
    }
}

pub async fn serve_listing(
    ctx: &RequestContext,
    dir: &Path,
    display_path: &str,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let entries = read_entries(dir).await?;
    let html = render_listing(display_path, &entries);
    Ok(http::build_html_response(html, ctx.is_head))
}

/// Read directory entries sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> Result<Vec<ListingEntry>, ServeError> {
    let io_err = |e| ServeError::from_io(dir.to_path_buf(), e);
    let mut reader = fs::read_dir(dir).await.map_err(io_err)?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(io_err)? {
        let file_type = entry.file_type().await.map_err(io_err)?;
        let is_dir = if file_type.is_symlink() {
            fs::metadata(entry.path())
                .await
                .is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink: file_type.is_symlink(),
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            entry.href(),
            entry.display_name()
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}
