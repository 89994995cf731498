//! Parse `<scheme>:///<name>[?v=<n>]` entity references.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::manager::ManagerError;

/// Entity name and optional 1-based version taken from a reference.
#[derive(Debug, PartialEq, Eq)]
pub struct LibraryReference {
    pub name: String,
    pub version: Option<usize>,
}

pub fn parse_reference(reference: &str, scheme: &str) -> Result<LibraryReference, ManagerError> {
    let malformed = || ManagerError::MalformedEntityReference(reference.to_string());

    let url = Url::parse(reference).map_err(|_| malformed())?;
    if !url.scheme().eq_ignore_ascii_case(scheme) {
        return Err(malformed());
    }
    if url.host_str().is_some_and(|h| !h.is_empty()) {
        return Err(malformed());
    }

    let name = percent_decode_str(url.path().trim_start_matches('/'))
        .decode_utf8()
        .map_err(|_| malformed())?;
    if name.is_empty() {
        return Err(malformed());
    }

    let mut version = None;
    for (key, value) in url.query_pairs() {
        if key == "v" {
            let v: usize = value.parse().map_err(|_| malformed())?;
            if v == 0 {
                return Err(malformed());
            }
            version = Some(v);
        }
    }

    Ok(LibraryReference {
        name: name.to_string(),
        version,
    })
}
