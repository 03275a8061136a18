use super::OperationMethod;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::handler::OperationHandler;
use crate::router::{MatchResult, RouteError, UriPattern};
use std::fmt;
use std::sync::Arc;

/// A registered binding of HTTP method + path template + handler.
///
/// Created while the table is built and never mutated afterwards.
#[derive(Clone)]
pub struct RouteConfig {
    method: OperationMethod,
    pattern: UriPattern,
    operation_id: Arc<str>,
    handler: Arc<dyn OperationHandler>,
}

impl fmt::Debug for RouteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteConfig")
            .field("method", &self.method)
            .field("pattern", &self.pattern.template())
            .field("operation_id", &self.operation_id)
            .finish_non_exhaustive()
    }
}

impl RouteConfig {
    /// # Errors
    ///
    /// Returns a [`RouteError`] when `template` does not compile.
    pub fn new(
        method: OperationMethod,
        template: &str,
        operation_id: &str,
        handler: Arc<dyn OperationHandler>,
    ) -> Result<Self, RouteError> {
        Ok(Self {
            method,
            pattern: UriPattern::compile(template)?,
            operation_id: Arc::from(operation_id),
            handler,
        })
    }

    #[must_use]
    pub fn method(&self) -> OperationMethod {
        self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &UriPattern {
        &self.pattern
    }

    /// OpenAPI `operationId` (or generated name) used as a diagnostic label.
    #[must_use]
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    #[must_use]
    pub fn handler(&self) -> &Arc<dyn OperationHandler> {
        &self.handler
    }

    /// Method check followed by a full-path match.
    ///
    /// Returns `None` on a method mismatch, a template mismatch or a partial
    /// match (non-empty remainder).
    #[must_use]
    pub fn full_match(&self, method: OperationMethod, path: &str) -> Option<MatchResult> {
        if self.method != method {
            return None;
        }
        self.pattern.match_path(path).filter(MatchResult::is_full)
    }
}

/// Ordered, immutable list of [`RouteConfig`]s.
///
/// Registration order is the tie-break for overlapping templates: the first
/// full match wins. The table is shared between requests through an `Arc` and
/// needs no locking because nothing mutates it after [`RouteTableBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteConfig>,
}

impl RouteTable {
    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteConfig> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// `METHOD /template -> operation_id` lines in registration order.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.routes
            .iter()
            .map(|r| format!("{} {} -> {}", r.method, r.pattern, r.operation_id))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteConfig;
    type IntoIter = std::slice::Iter<'a, RouteConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Collects routes in registration order, compiling each template once.
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: Vec<RouteConfig>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl fmt::Debug for RouteTableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTableBuilder")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl RouteTableBuilder {
    /// Sink used for the routing-table summary logged by [`build`](Self::build).
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Register a route.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] when `template` does not compile.
    pub fn route<H>(
        mut self,
        method: OperationMethod,
        template: &str,
        operation_id: &str,
        handler: H,
    ) -> Result<Self, RouteError>
    where
        H: OperationHandler,
    {
        self.routes
            .push(RouteConfig::new(method, template, operation_id, Arc::new(handler))?);
        Ok(self)
    }

    /// Register an already-shared handler (e.g. one handler for many routes).
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] when `template` does not compile.
    pub fn route_shared(
        mut self,
        method: OperationMethod,
        template: &str,
        operation_id: &str,
        handler: Arc<dyn OperationHandler>,
    ) -> Result<Self, RouteError> {
        self.routes
            .push(RouteConfig::new(method, template, operation_id, handler)?);
        Ok(self)
    }

    pub fn push(&mut self, route: RouteConfig) {
        self.routes.push(route);
    }

    #[must_use]
    pub fn build(self) -> RouteTable {
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingDiagnostics));
        let table = RouteTable {
            routes: self.routes,
        };

        let summary: Vec<String> = table.describe().into_iter().take(10).collect();
        diagnostics.info(format_args!(
            "Routing table loaded: routes_count={} routes_summary={:?}",
            table.len(),
            summary
        ));

        table
    }
}
