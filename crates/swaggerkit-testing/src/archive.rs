use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};

/// Wrapper directory GitHub puts at the top of release tarballs
pub const WRAPPER_DIR: &str = "swagger-api-swagger-ui-1a2b3c4";

/// Builder for gzip tarballs shaped like Swagger UI releases
#[derive(Debug, Clone, Default)]
pub struct ReleaseArchive {
    files: Vec<(String, Vec<u8>)>,
    dirs: Vec<String>,
}

impl ReleaseArchive {
    /// An empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// A release with the three assets under `dist/` plus the usual clutter
    /// (sources, other dist files, a nested `dist` that is not an asset dir).
    ///
    /// Asset contents embed `tag`, so different releases are distinguishable.
    pub fn swagger_ui(tag: &str) -> Self {
        let root = WRAPPER_DIR;
        Self::new()
            .dir(root)
            .dir(&format!("{root}/dist"))
            .file(&format!("{root}/README.md"), "# Swagger UI")
            .file(&format!("{root}/package.json"), r#"{"name":"swagger-ui"}"#)
            .file(&format!("{root}/src/core/index.js"), "export default {}")
            .file(
                &format!("{root}/dist/swagger-ui-bundle.js"),
                format!("/* swagger-ui-bundle {tag} */"),
            )
            .file(
                &format!("{root}/dist/swagger-ui.css"),
                format!("/* swagger-ui {tag} */"),
            )
            .file(
                &format!("{root}/dist/favicon-32x32.png"),
                [&b"\x89PNG"[..], tag.as_bytes()].concat(),
            )
            .file(&format!("{root}/dist/favicon-16x16.png"), "small")
            .file(&format!("{root}/dist/index.html"), "<html></html>")
            .file(&format!("{root}/dist/swagger-ui.js"), "/* not the bundle */")
            .file(&format!("{root}/test/dist-like/swagger-ui.css"), "/* wrong parent */")
            .file(&format!("{root}/docs/swagger-ui.css"), "/* wrong parent */")
    }

    /// Add a regular file
    pub fn file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((path.to_string(), content.into()));
        self
    }

    /// Add a directory entry
    pub fn dir(mut self, path: &str) -> Self {
        self.dirs.push(path.to_string());
        self
    }

    /// Encode as `.tar.gz` bytes
    pub fn build(&self) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::fast());
        let mut builder = tar::Builder::new(encoder);

        for dir in &self.dirs {
            let mut header = tar::Header::new_gnu();
            header.set_entry_type(tar::EntryType::Directory);
            header.set_size(0);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, dir, std::io::empty())
                .expect("append directory");
        }
        for (path, content) in &self.files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, content.as_slice())
                .expect("append file");
        }

        builder
            .into_inner()
            .and_then(|encoder| encoder.finish())
            .expect("finish archive")
    }
}

/// Latest-release descriptor as the GitHub releases API returns it
pub fn release_descriptor(tag: &str, tarball_url: &str) -> Value {
    json!({
        "tag_name": tag,
        "name": format!("Swagger UI {tag}"),
        "tarball_url": tarball_url,
        "zipball_url": tarball_url.replace("tarball", "zipball"),
        "draft": false,
        "prerelease": false
    })
}
