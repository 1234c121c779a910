//! Host-based redirect target computation.

/// Strip a trailing `:port` from an HTTP `Host` value.
///
/// Only an all-digit suffix after the last `:` is removed, and bracketed IPv6
/// literals (`[::1]:8080`) keep their inner colons.
pub fn strip_port(host: &str) -> &str {
    let Some((name, port)) = host.rsplit_once(':') else {
        return host;
    };

    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return host;
    }

    // A bare IPv6 literal has more colons and no closing bracket.
    if name.contains(':') && !name.ends_with(']') {
        return host;
    }

    name
}

/// Join a mapping destination with the requested path.
///
/// The root path redirects to the destination as-is. Otherwise a single
/// leading `/` is dropped from `path` when `destination` already ends in `/`,
/// and the two are concatenated without further normalisation.
pub fn resolve(destination: &str, path: &str) -> String {
    if path == "/" {
        return destination.to_string();
    }

    let path = if destination.ends_with('/') {
        path.strip_prefix('/').unwrap_or(path)
    } else {
        path
    };

    format!("{destination}{path}")
}
