//! Package identity derived from release tags, and the body line that
//! advertises it.

/// Start of the body line carrying the package URI
pub const PACKAGE_URI_MARKER: &str = "* Package URI:";

/// Name and version parsed from a `<name>.<version>` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// Package name (tag text before the first `.`)
    pub name: String,
    /// Package version without a leading `v`
    pub version: String,
}

impl PackageIdentity {
    /// Parse a package tag such as `fastqc.v0.2.0`.
    ///
    /// Returns `None` when the tag has no `.` or either side is empty.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let (name, version) = tag.split_once('.')?;
        let version = version.strip_prefix('v').unwrap_or(version);
        if name.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// `github.com/<org lowercased>/<repo>/<name>@<version>`
    pub fn uri(&self, org: &str, repo: &str) -> String {
        format!(
            "github.com/{}/{}/{}@{}",
            org.to_lowercase(),
            repo,
            self.name,
            self.version
        )
    }
}

/// Whether `body` opens with the package URI marker.
///
/// Only the start of the body is checked; a marker further down is not seen.
pub fn has_package_uri(body: &str) -> bool {
    body.starts_with(PACKAGE_URI_MARKER)
}

/// Append the package URI line unless the body already opens with one.
///
/// The existing body is kept byte for byte.
pub fn rewrite_body(body: &str, uri: &str) -> String {
    if has_package_uri(body) {
        return body.to_string();
    }

    let line = format!("{PACKAGE_URI_MARKER} `{uri}`");
    if body.is_empty() {
        line
    } else if body.ends_with('\n') {
        format!("{body}\n{line}")
    } else {
        format!("{body}\n\n{line}")
    }
}
