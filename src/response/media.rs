use http::HeaderValue;
use std::fmt;
use std::str::FromStr;

/// A declared response content type, e.g. `application/json` or
/// `text/plain; charset=iso-8859-1`.
///
/// Validated once at construction so encoding a response can never fail on
/// its `Content-Type` header.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaType {
    value: HeaderValue,
    essence: String,
}

/// Returned by [`MediaType::parse`] for values that are not `type/subtype`
/// or cannot be sent as a header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid media type: {0:?}")]
pub struct InvalidMediaType(pub String);

impl MediaType {
    /// # Errors
    ///
    /// Fails unless `raw` is `type/subtype[; params]` in visible ASCII.
    pub fn parse(raw: &str) -> Result<Self, InvalidMediaType> {
        let raw = raw.trim();
        let essence = raw
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        let valid_essence = essence
            .split_once('/')
            .is_some_and(|(t, s)| !t.is_empty() && !s.is_empty() && !s.contains('/'));
        if !valid_essence || !raw.is_ascii() {
            return Err(InvalidMediaType(raw.to_string()));
        }
        let value = HeaderValue::from_str(raw).map_err(|_| InvalidMediaType(raw.to_string()))?;
        Ok(Self { value, essence })
    }

    fn from_static(raw: &'static str, essence: &str) -> Self {
        Self {
            value: HeaderValue::from_static(raw),
            essence: essence.to_string(),
        }
    }

    /// `application/json`
    #[must_use]
    pub fn json() -> Self {
        Self::from_static("application/json", "application/json")
    }

    /// `text/plain; charset=utf-8`
    #[must_use]
    pub fn text_plain() -> Self {
        Self::from_static("text/plain; charset=utf-8", "text/plain")
    }

    /// `application/octet-stream`
    #[must_use]
    pub fn octet_stream() -> Self {
        Self::from_static("application/octet-stream", "application/octet-stream")
    }

    /// Lower-cased `type/subtype` without parameters.
    #[must_use]
    pub fn essence(&self) -> &str {
        &self.essence
    }

    /// The full value as declared, parameters included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Visible ASCII was checked in `parse`; statics are ASCII literals.
        self.value.to_str().unwrap_or_default()
    }

    #[must_use]
    pub fn header_value(&self) -> &HeaderValue {
        &self.value
    }

    /// Lower-cased `charset` parameter, unquoted.
    #[must_use]
    pub fn charset(&self) -> Option<String> {
        self.as_str().split(';').skip(1).find_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"').to_ascii_lowercase())
            } else {
                None
            }
        })
    }

    /// `application/json` or any `+json` structured-syntax type.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.essence == "application/json" || self.essence.ends_with("+json")
    }

    /// Whether a string body can be sent under this type.
    ///
    /// True for `text/*`, JSON and XML types, form and script types, and for
    /// anything that declares a `charset`.
    #[must_use]
    pub fn is_string_compatible(&self) -> bool {
        self.essence.starts_with("text/")
            || self.is_json()
            || self.essence == "application/xml"
            || self.essence.ends_with("+xml")
            || self.essence == "application/x-www-form-urlencoded"
            || self.essence == "application/javascript"
            || self.charset().is_some()
    }

    /// Encode `text` under this type's charset.
    ///
    /// UTF-8 is the default. `us-ascii` and `iso-8859-1` (`latin1`) map each
    /// character to one byte, replacing unrepresentable ones with `?`. Other
    /// charsets fall back to UTF-8.
    #[must_use]
    pub fn encode_text(&self, text: &str) -> Vec<u8> {
        let limit = match self.charset().as_deref() {
            Some("us-ascii" | "ascii") => 0x7F,
            Some("iso-8859-1" | "latin1" | "latin-1" | "iso8859-1") => 0xFF,
            _ => return text.as_bytes().to_vec(),
        };
        text.chars()
            .map(|c| {
                u8::try_from(u32::from(c))
                    .ok()
                    .filter(|b| u32::from(*b) <= limit)
                    .unwrap_or(b'?')
            })
            .collect()
    }
}

impl FromStr for MediaType {
    type Err = InvalidMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaType({:?})", self.as_str())
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_essence() {
        let mt = MediaType::parse("Application/Problem+JSON; charset=UTF-8").unwrap();
        assert_eq!(mt.essence(), "application/problem+json");
        assert_eq!(mt.charset().as_deref(), Some("utf-8"));
        assert!(mt.is_json());
        assert!(mt.is_string_compatible());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(MediaType::parse("json").is_err());
        assert!(MediaType::parse("/json").is_err());
        assert!(MediaType::parse("a/b/c").is_err());
        assert!(MediaType::parse("text/plain\r\nX-Evil: 1").is_err());
    }

    #[test]
    fn test_string_compatibility() {
        assert!(MediaType::text_plain().is_string_compatible());
        assert!(MediaType::parse("application/xml").unwrap().is_string_compatible());
        assert!(MediaType::parse("application/x-custom; charset=utf-8")
            .unwrap()
            .is_string_compatible());
        assert!(!MediaType::octet_stream().is_string_compatible());
        assert!(!MediaType::parse("image/png").unwrap().is_json());
    }

    #[test]
    fn test_encode_text_charsets() {
        let utf8 = MediaType::text_plain();
        assert_eq!(utf8.encode_text("é"), "é".as_bytes());

        let latin1 = MediaType::parse("text/plain; charset=ISO-8859-1").unwrap();
        assert_eq!(latin1.encode_text("é€"), vec![0xE9, b'?']);

        let ascii = MediaType::parse("text/plain; charset=\"us-ascii\"").unwrap();
        assert_eq!(ascii.encode_text("aé"), vec![b'a', b'?']);
    }
}
