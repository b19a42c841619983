//! Canonicalization of version-control locations
//!
//! Package manifests and provider feeds encode VCS locations in many
//! syntactically distinct but semantically equivalent forms: scp-like
//! shorthand, bare hosts, compound "vcs+transport" schemes, filesystem
//! paths. Two locations name the same repository exactly when their
//! normalized forms compare equal.

use url::Url;

/// Hosting domains that get repository-root canonicalization
const GIT_HOSTS: [&str; 3] = ["github.com", "gitlab.com", "bitbucket.org"];

/// Returns the canonical string form of a raw VCS location.
///
/// Total function: unparseable input falls back to a filesystem-path
/// interpretation, and failing that the trimmed input is returned verbatim.
/// Idempotent: normalizing an already normalized URL is the identity.
pub fn normalize_vcs_url(vcs_url: &str) -> String {
    let mut url = vcs_url.trim().trim_end_matches('/').to_string();

    if url.is_empty() {
        return url;
    }

    // CVS locators have their own colon syntax, leave them untouched.
    if url.starts_with(":pserver:") || url.starts_with(":ext:") {
        return url;
    }

    // Unauthenticated git protocol is disallowed by most hosts.
    if let Some(rest) = url.strip_prefix("git://") {
        url = format!("https://{rest}");
    }

    // SCP-like "host:path" shorthand becomes an explicit ssh URL.
    if !url.contains("://") {
        if let Some((host, path)) = split_scp_like(&url) {
            url = format!("ssh://{host}/{path}");
        }
    }

    if url.starts_with("git@") {
        url = format!("ssh://{url}");
    }

    // Packaging metadata often encodes the VCS type alongside the transport,
    // e.g. "git+https://". Keep the transport, except for svn+ schemes where
    // the compound form is the real protocol.
    if let Some(idx) = url.find("://") {
        let scheme = &url[..idx];
        if scheme.contains('+') && !scheme.starts_with("svn+") {
            if let Some(proto) = scheme.rsplit('+').next() {
                url = format!("{proto}{}", &url[idx..]);
            }
        }
    }

    // A bare known hosting domain implies https.
    if !url.contains("://") && is_known_git_host(url.split('/').next().unwrap_or("")) {
        url = format!("https://{url}");
    }

    if url.contains('\\') {
        return file_url_fallback(&url);
    }

    match Url::parse(&url) {
        Ok(parsed) => canonicalize_known_host(&parsed).unwrap_or(url),
        Err(_) => file_url_fallback(&url),
    }
}

/// Splits an scp-like "host:path" or "user@host:path" location. Windows
/// drive letters and absolute paths after the colon are not scp-like.
fn split_scp_like(url: &str) -> Option<(&str, &str)> {
    let (host, path) = url.split_once(':')?;

    if host.len() < 2 || host.contains('/') || host.contains('\\') {
        return None;
    }
    if path.is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return None;
    }
    if !host.contains('.') && !host.contains('@') {
        return None;
    }

    Some((host, path))
}

fn is_known_git_host(host: &str) -> bool {
    let host = host.trim_start_matches("www.");
    GIT_HOSTS.contains(&host)
}

/// Repository-root canonicalization for known Git hosting domains. Returns
/// `None` for other hosts, whose URLs are kept as rewritten.
fn canonicalize_known_host(parsed: &Url) -> Option<String> {
    let host = parsed.host_str()?;

    if !is_known_git_host(host) {
        return None;
    }

    // Sub-paths deeper than "user/repo" are not repository roots, do not
    // decorate them with ".git".
    let path = parsed.path();
    let segments = path.split('/').filter(|s| !s.is_empty()).count();
    let path = if path.ends_with(".git") || segments > 2 {
        path.to_string()
    } else {
        format!("{path}.git")
    };

    let query = parsed
        .query()
        .filter(|q| !q.trim().is_empty())
        .map(|q| format!("?{q}"))
        .unwrap_or_default();

    Some(if parsed.scheme() == "ssh" {
        format!("ssh://git@{host}{path}{query}")
    } else {
        let host = host.trim_start_matches("www.");
        format!("{}://{host}{path}{query}", parsed.scheme())
    })
}

/// Interprets a string that does not parse as a URL as a filesystem path,
/// absolutized against the current directory. If even that fails the input
/// is returned verbatim.
fn file_url_fallback(url: &str) -> String {
    let path = std::path::Path::new(url);

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => return url.to_string(),
        }
    };

    Url::from_file_path(&absolute)
        .map(|file_url| file_url.to_string())
        .unwrap_or_else(|_| url.to_string())
}
