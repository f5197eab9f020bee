//! CORS policy
//!
//! Origins are matched exactly or with `*` wildcards (`*` matches any run of
//! characters, including none). Allowed origins are echoed back so that
//! credentials can be used.

use hyper::header::{HeaderMap, HeaderValue};

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "*";

#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: origins
                .into_iter()
                .map(Into::into)
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.origins.iter().any(|pattern| wildcard_match(pattern, origin))
    }

    /// Add CORS headers for an allowed origin; leaves headers untouched otherwise.
    ///
    /// `requested_headers` is the preflight's `Access-Control-Request-Headers`.
    /// It is echoed back because a literal `*` is not a wildcard once
    /// credentials are allowed.
    pub fn apply(
        &self,
        origin: Option<&str>,
        requested_headers: Option<&HeaderValue>,
        headers: &mut HeaderMap,
    ) -> bool {
        let Some(origin) = origin.filter(|o| self.allows(o)) else {
            return false;
        };
        let Ok(value) = HeaderValue::from_str(origin) else {
            return false;
        };

        headers.insert("Access-Control-Allow-Origin", value);
        headers.insert(
            "Access-Control-Allow-Credentials",
            HeaderValue::from_static("true"),
        );
        headers.insert(
            "Access-Control-Allow-Methods",
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            "Access-Control-Allow-Headers",
            requested_headers
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static(ALLOW_HEADERS)),
        );
        headers.insert("Vary", HeaderValue::from_static("Origin"));
        true
    }
}

/// Glob match where `*` is the only metacharacter
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p = pattern.as_bytes();
    let t = text.as_bytes();
    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while ti < t.len() {
        if pi < p.len() && p[pi] == b'*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if pi < p.len() && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&c| c == b'*')
}
