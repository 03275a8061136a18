//! URI matcher core - hot path for request routing.
//!
//! Every request walks the route table and runs [`UriPattern::match_path`]
//! against each candidate, so this module keeps per-match work to one regex
//! execution and a `SmallVec` of captures.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use regex::Regex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the compiled pattern
/// (known at startup); values are per-request data from the URL and stay raw
/// (percent-encoded) until a `RequestView` decodes them.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Errors raised while compiling a path template.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouteError {
    /// A `{` without a closing `}` (or the reverse) in the template.
    #[error("unbalanced braces in path template '{template}'")]
    UnbalancedBraces { template: String },
    /// `{}` with no parameter name.
    #[error("empty parameter name in path template '{template}'")]
    EmptyParameterName { template: String },
    /// Two parameters with no literal text between them, e.g. `{a}{b}`.
    #[error("adjacent parameters in segment '{segment}' of path template '{template}'")]
    AdjacentParameters { template: String, segment: String },
    /// The generated regex failed to compile.
    #[error("path template '{template}' did not compile: {source}")]
    Regex {
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled path template such as `/users/{user_id}/posts/{post_id}`.
///
/// Literal text is compared exactly; every `{name}` captures a single,
/// non-empty path segment (or the part of one between literals, as in
/// `/report.{format}`). Whatever follows the matched template is returned as
/// the match remainder; it is never silently accepted.
#[derive(Clone)]
pub struct UriPattern {
    template: Arc<str>,
    regex: Regex,
    names: Vec<Arc<str>>,
}

impl fmt::Debug for UriPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UriPattern")
            .field("template", &self.template)
            .field("names", &self.names)
            .finish()
    }
}

impl fmt::Display for UriPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Outcome of matching a concrete path against a [`UriPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    params: ParamVec,
    remainder: String,
}

impl MatchResult {
    /// Raw captured `(name, value)` pairs in template order.
    #[must_use]
    pub fn params(&self) -> &[(Arc<str>, String)] {
        &self.params
    }

    /// Raw (still percent-encoded) value of the last capture named `name`.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Unmatched trailing part of the path; empty for a full match.
    #[must_use]
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// `true` when the whole path was consumed by the template.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.remainder.is_empty()
    }

    pub fn into_params(self) -> ParamVec {
        self.params
    }
}

enum Piece<'a> {
    Literal(&'a str),
    Param(&'a str),
}

fn split_segment<'a>(template: &str, segment: &'a str) -> Result<Vec<Piece<'a>>, RouteError> {
    let mut pieces = Vec::new();
    let mut rest = segment;
    while !rest.is_empty() {
        match rest.find('{') {
            Some(open) => {
                let literal = &rest[..open];
                if literal.contains('}') {
                    return Err(RouteError::UnbalancedBraces {
                        template: template.to_string(),
                    });
                }
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(literal));
                }
                let after = &rest[open + 1..];
                let close = after.find('}').ok_or_else(|| RouteError::UnbalancedBraces {
                    template: template.to_string(),
                })?;
                let name = after[..close].trim();
                if name.contains('{') {
                    return Err(RouteError::UnbalancedBraces {
                        template: template.to_string(),
                    });
                }
                if name.is_empty() {
                    return Err(RouteError::EmptyParameterName {
                        template: template.to_string(),
                    });
                }
                if matches!(pieces.last(), Some(Piece::Param(_))) {
                    return Err(RouteError::AdjacentParameters {
                        template: template.to_string(),
                        segment: segment.to_string(),
                    });
                }
                pieces.push(Piece::Param(name));
                rest = &after[close + 1..];
            }
            None => {
                if rest.contains('}') {
                    return Err(RouteError::UnbalancedBraces {
                        template: template.to_string(),
                    });
                }
                pieces.push(Piece::Literal(rest));
                rest = "";
            }
        }
    }
    Ok(pieces)
}

impl UriPattern {
    /// Compile a path template.
    ///
    /// A missing leading slash is added and empty segments are ignored, so
    /// `users/{id}`, `/users/{id}` and `/users/{id}/` compile identically.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] for malformed parameter syntax.
    pub fn compile(template: &str) -> Result<Self, RouteError> {
        let trimmed = template.trim();
        let mut normalized = String::with_capacity(trimmed.len() + 1);
        let mut pattern = String::with_capacity(trimmed.len() * 2 + 16);
        let mut names: Vec<Arc<str>> = Vec::new();

        pattern.push('^');
        for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
            normalized.push('/');
            normalized.push_str(segment);
            pattern.push('/');

            let pieces = split_segment(trimmed, segment)?;
            let count = pieces.len();
            for (idx, piece) in pieces.into_iter().enumerate() {
                match piece {
                    Piece::Literal(lit) => pattern.push_str(&regex::escape(lit)),
                    Piece::Param(name) => {
                        // Lazy when literal text follows inside the same segment.
                        if idx + 1 < count {
                            pattern.push_str("([^/]+?)");
                        } else {
                            pattern.push_str("([^/]+)");
                        }
                        names.push(Arc::from(name));
                    }
                }
            }
        }

        if normalized.is_empty() {
            normalized.push('/');
            pattern.push('/');
        }
        pattern.push_str("(/.*)?$");

        let regex = Regex::new(&pattern).map_err(|source| RouteError::Regex {
            template: trimmed.to_string(),
            source,
        })?;

        Ok(Self {
            template: Arc::from(normalized),
            regex,
            names,
        })
    }

    /// Normalized template text, e.g. `/users/{id}`.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parameter names in template order.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.names
    }

    /// Match a concrete, already-normalized path (no query string).
    ///
    /// Returns `None` when the template does not match the start of the path.
    /// A `Some` result may still be partial; check [`MatchResult::is_full`].
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<MatchResult> {
        let caps = self.regex.captures(path)?;

        let mut params = ParamVec::new();
        for (idx, name) in self.names.iter().enumerate() {
            let value = caps.get(idx + 1).map_or("", |m| m.as_str());
            params.push((Arc::clone(name), value.to_owned()));
        }

        let remainder = caps
            .get(self.names.len() + 1)
            .map_or_else(String::new, |m| m.as_str().to_owned());

        Some(MatchResult { params, remainder })
    }
}
