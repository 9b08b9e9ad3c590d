//! Operation lookup - compiled path templates and ignored-endpoint patterns.

use crate::spec::{Endpoint, Operation, SpecError};
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted path parameters, in template order.
///
/// Names are shared with the compiled table; values are the matched segment
/// text, never decoded or converted.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of matching a request to a declared operation
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched operation
    pub operation: Arc<Operation>,
    /// The endpoint path template that matched (e.g. `/note/{note_id}/`)
    pub template: Arc<str>,
    /// Path parameters extracted from the path (e.g. `{note_id}` → `"123"`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name
    ///
    /// If a template repeats a placeholder name, the last occurrence wins.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Path parameters as an owned map.
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Outcome of [`OperationLookup::lookup`]
#[derive(Debug, Clone)]
pub enum LookupResult {
    /// A declared operation matched
    Found(RouteMatch),
    /// No operation matched but the path is exempt from reporting
    Ignored,
    /// Neither an operation nor an ignore pattern matched
    NotFound,
}

impl LookupResult {
    /// The match, if an operation was found.
    #[must_use]
    pub fn found(self) -> Option<RouteMatch> {
        match self {
            LookupResult::Found(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, LookupResult::Ignored)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupResult::NotFound)
    }
}

/// A compiled path template
///
/// Literal text is matched exactly; each `{name}` placeholder captures
/// `[^/]*`, i.e. any text within one segment, including none. The whole path
/// must match.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    param_names: Vec<Arc<str>>,
}

impl PathMatcher {
    /// Compile a path template such as `/note/{note_id}/`.
    ///
    /// Braces that do not enclose a word (`{}`, `{a-b}`) are literal text.
    ///
    /// # Arguments
    ///
    /// * `template` - Endpoint path with `{name}` placeholders
    ///
    /// # Returns
    ///
    /// The compiled matcher, or `SpecError::InvalidPathTemplate` if the
    /// generated regex is rejected
    pub fn compile(template: &str) -> Result<Self, SpecError> {
        let mut pattern = String::with_capacity(template.len() + 16);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(template.matches('{').count());

        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_placeholder_name(&after[..close]) => {
                    pattern.push_str(&regex::escape(&rest[..open]));
                    pattern.push_str("([^/]*)");
                    param_names.push(Arc::from(&after[..close]));
                    rest = &after[close + 1..];
                }
                _ => {
                    pattern.push_str(&regex::escape(&rest[..=open]));
                    rest = after;
                }
            }
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|e| SpecError::InvalidPathTemplate {
            path: template.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { regex, param_names })
    }

    /// Match a raw request path, returning the captured parameters.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        Some(
            self.param_names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = caps.get(i + 1).map_or("", |m| m.as_str());
                    (Arc::clone(name), value.to_string())
                })
                .collect(),
        )
    }

    /// Placeholder names in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.param_names.iter().map(AsRef::as_ref)
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    method: Method,
    matcher: PathMatcher,
    template: Arc<str>,
    operation: Arc<Operation>,
}

/// Routing table from `(method, path)` to declared operations
///
/// Routes are tried in declaration order and the first match wins, so when
/// two templates overlap the earlier endpoint takes the request.
#[derive(Debug, Clone, Default)]
pub struct OperationLookup {
    routes: Vec<CompiledRoute>,
    ignored: Vec<Regex>,
}

impl OperationLookup {
    /// Compile every operation of `apis`, plus the ignored-endpoint patterns.
    ///
    /// Ignore patterns are plain regular expressions matched from the start
    /// of the path (a prefix match, not a full match).
    ///
    /// # Arguments
    ///
    /// * `apis` - Endpoints in declaration order
    /// * `ignore_endpoints` - Regexes for paths exempt from `operation_missing`
    ///
    /// # Errors
    ///
    /// `SpecError::InvalidMethod` for an operation method that is not an HTTP
    /// token, `SpecError::InvalidIgnorePattern` for a bad regex, and
    /// `SpecError::InvalidPathTemplate` from template compilation.
    pub fn new<I, S>(apis: &[Endpoint], ignore_endpoints: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut routes = Vec::with_capacity(apis.iter().map(|e| e.operations.len()).sum());
        for endpoint in apis {
            let matcher = PathMatcher::compile(&endpoint.path)?;
            let template: Arc<str> = Arc::from(endpoint.path.as_str());
            for operation in &endpoint.operations {
                let method = Method::from_bytes(operation.method.as_bytes()).map_err(|_| {
                    SpecError::InvalidMethod {
                        method: operation.method.clone(),
                    }
                })?;
                routes.push(CompiledRoute {
                    method,
                    matcher: matcher.clone(),
                    template: Arc::clone(&template),
                    operation: Arc::new(operation.clone()),
                });
            }
        }

        let ignored = ignore_endpoints
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
                    SpecError::InvalidIgnorePattern {
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.template))
            .collect();

        info!(
            routes_count = routes.len(),
            ignored_count = ignored.len(),
            routes_summary = ?routes_summary,
            "Operation table compiled"
        );

        Ok(Self { routes, ignored })
    }

    /// Resolve a request method and raw path.
    ///
    /// `method` is compared case-insensitively; `path` is matched as given,
    /// so `/note/123` and `/note/123/` are different paths.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `path` - Raw request path, without query string
    ///
    /// # Returns
    ///
    /// * `Found(RouteMatch)` - The first declared operation that matches
    /// * `Ignored` - No operation matched, but an ignore pattern did
    /// * `NotFound` - Neither matched
    #[must_use]
    pub fn lookup(&self, method: &str, path: &str) -> LookupResult {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes()).ok();

        if let Some(method) = method.as_ref() {
            for route in self.routes.iter().filter(|r| &r.method == method) {
                if let Some(path_params) = route.matcher.captures(path) {
                    debug!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.template,
                        nickname = route.operation.nickname.as_deref().unwrap_or(""),
                        path_params = ?path_params,
                        "Operation matched"
                    );
                    return LookupResult::Found(RouteMatch {
                        operation: Arc::clone(&route.operation),
                        template: Arc::clone(&route.template),
                        path_params,
                    });
                }
            }
        }

        if self.ignored.iter().any(|re| re.is_match(path)) {
            debug!(path = %path, "Path ignored");
            return LookupResult::Ignored;
        }

        debug!(path = %path, "No operation matched");
        LookupResult::NotFound
    }

    /// Number of compiled (method, template) routes.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// `(method, template)` pairs in lookup order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.routes.iter().map(|r| (&r.method, r.template.as_ref()))
    }
}
