use http::header::AUTHORIZATION;
use http::HeaderMap;

use crate::error::AuthHeaderError;

/// Token from `Authorization: <scheme> <token>`.
///
/// The value must split on single spaces into exactly two parts; the scheme
/// word itself is not checked.
pub fn extract_token(headers: &HeaderMap) -> Result<String, AuthHeaderError> {
    let bearer = match headers.get(AUTHORIZATION) {
        None => return Err(AuthHeaderError::Missing),
        Some(value) if value.is_empty() => return Err(AuthHeaderError::Missing),
        Some(value) => value.to_str().map_err(|_| AuthHeaderError::Malformed)?,
    };

    let parts: Vec<&str> = bearer.split(' ').collect();
    if parts.len() != 2 {
        return Err(AuthHeaderError::Malformed);
    }

    let token = parts[1];
    if token.is_empty() {
        return Err(AuthHeaderError::EmptyToken);
    }
    Ok(token.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_token(&with_auth("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn missing_or_blank_header() {
        assert_eq!(extract_token(&HeaderMap::new()), Err(AuthHeaderError::Missing));
        assert_eq!(extract_token(&with_auth("")), Err(AuthHeaderError::Missing));
    }

    #[test]
    fn wrong_number_of_parts() {
        assert_eq!(extract_token(&with_auth("abc")), Err(AuthHeaderError::Malformed));
        assert_eq!(extract_token(&with_auth("Bearer a b")), Err(AuthHeaderError::Malformed));
        assert_eq!(extract_token(&with_auth("Bearer  abc")), Err(AuthHeaderError::Malformed));
    }

    #[test]
    fn empty_token() {
        let err = extract_token(&with_auth("Bearer ")).unwrap_err();
        assert_eq!(err, AuthHeaderError::EmptyToken);
        assert_eq!(err.to_string(), "invalid bearer token");
    }
}
