use url::Url;

/// Removes the user-info component (user name and password) from a URL.
///
/// Strings that do not parse as a URL with a host, such as scp-style
/// `git@host:org/repo.git` locations, are returned unchanged. Only the
/// user-info span is removed; the rest of the URL keeps its original spelling.
pub fn replace_credentials_in_uri(uri: &str) -> String {
    let has_host = Url::parse(uri).is_ok_and(|url| url.has_host());
    let Some(authority_start) = uri.find("://").map(|i| i + 3).filter(|_| has_host) else {
        return uri.to_string();
    };

    let authority = &uri[authority_start..];
    let authority = authority
        .find(['/', '?', '#'])
        .map_or(authority, |end| &authority[..end]);

    match authority.rfind('@') {
        Some(at) => format!("{}{}", &uri[..authority_start], &uri[authority_start + at + 1..]),
        None => uri.to_string(),
    }
}
