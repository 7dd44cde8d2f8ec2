//! Routing metadata attached to controllers and their methods.
//!
//! Metadata is filed in an explicit [`MetadataStore`] keyed by the controller
//! type, populated while the application is wired up, and treated as
//! immutable input once routes are compiled.

mod store;

pub use store::MetadataStore;

use regex::Regex;
use serde_json::{Map, Value};

use crate::middleware::Middleware;

/// A route path: a literal string or a compiled pattern.
#[derive(Debug, Clone)]
pub enum RoutePath {
    Literal(String),
    Pattern(Regex),
}

impl RoutePath {
    /// The pattern source for pattern paths, the string itself for literals.
    pub fn source(&self) -> &str {
        match self {
            Self::Literal(path) => path,
            Self::Pattern(pattern) => pattern.as_str(),
        }
    }
}

impl PartialEq for RoutePath {
    /// Patterns compare by source.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<&str> for RoutePath {
    fn from(path: &str) -> Self {
        Self::Literal(path.to_string())
    }
}

impl From<String> for RoutePath {
    fn from(path: String) -> Self {
        Self::Literal(path)
    }
}

impl From<Regex> for RoutePath {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

/// Server-specific route options, passed through to the server untouched.
pub type RouteConfig = Map<String, Value>;

/// Path plus server-specific route options.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOptions {
    pub path: RoutePath,
    pub config: RouteConfig,
}

/// Method-level path spec: either a bare path or full route options.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteSpec {
    Path(RoutePath),
    Options(RouteOptions),
}

impl RouteSpec {
    /// Normalize to full options; a bare path gets an empty config.
    pub fn normalize(self) -> RouteOptions {
        match self {
            Self::Path(path) => RouteOptions {
                path,
                config: RouteConfig::new(),
            },
            Self::Options(options) => options,
        }
    }
}

impl From<&str> for RouteSpec {
    fn from(path: &str) -> Self {
        Self::Path(path.into())
    }
}

impl From<String> for RouteSpec {
    fn from(path: String) -> Self {
        Self::Path(path.into())
    }
}

impl From<Regex> for RouteSpec {
    fn from(pattern: Regex) -> Self {
        Self::Path(pattern.into())
    }
}

impl From<RoutePath> for RouteSpec {
    fn from(path: RoutePath) -> Self {
        Self::Path(path)
    }
}

impl From<RouteOptions> for RouteSpec {
    fn from(options: RouteOptions) -> Self {
        Self::Options(options)
    }
}

/// Controller-level routing metadata: an optional base path and middleware
/// shared by every route on the controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerMetadata {
    pub path: Option<String>,
    pub middleware: Vec<Middleware>,
}

impl ControllerMetadata {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            middleware: Vec::new(),
        }
    }

    /// Metadata for a controller that declares no base path; its routes are
    /// registered unprefixed (unless a default root is configured).
    pub fn without_path() -> Self {
        Self::default()
    }

    pub fn middleware(mut self, middleware: impl IntoIterator<Item = Middleware>) -> Self {
        self.middleware.extend(middleware);
        self
    }
}

/// Metadata for one route-bearing method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMetadata {
    /// Path or path-plus-options for this route.
    pub options: RouteSpec,
    pub middleware: Vec<Middleware>,
    /// HTTP verb, uppercased at compile time.
    pub method: String,
    /// Key under which [`crate::Controller::invoke`] dispatches the method.
    pub key: String,
}

impl MethodMetadata {
    /// Generic constructor; prefer the per-verb shorthands.
    pub fn verb(
        method: impl Into<String>,
        options: impl Into<RouteSpec>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            options: options.into(),
            middleware: Vec::new(),
            method: method.into(),
            key: key.into(),
        }
    }

    pub fn get(options: impl Into<RouteSpec>, key: impl Into<String>) -> Self {
        Self::verb("get", options, key)
    }

    pub fn post(options: impl Into<RouteSpec>, key: impl Into<String>) -> Self {
        Self::verb("post", options, key)
    }

    pub fn put(options: impl Into<RouteSpec>, key: impl Into<String>) -> Self {
        Self::verb("put", options, key)
    }

    pub fn patch(options: impl Into<RouteSpec>, key: impl Into<String>) -> Self {
        Self::verb("patch", options, key)
    }

    pub fn delete(options: impl Into<RouteSpec>, key: impl Into<String>) -> Self {
        Self::verb("delete", options, key)
    }

    pub fn head(options: impl Into<RouteSpec>, key: impl Into<String>) -> Self {
        Self::verb("head", options, key)
    }

    pub fn options(options: impl Into<RouteSpec>, key: impl Into<String>) -> Self {
        Self::verb("options", options, key)
    }

    pub fn middleware(mut self, middleware: impl IntoIterator<Item = Middleware>) -> Self {
        self.middleware.extend(middleware);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_normalizes_to_options_with_empty_config() {
        let options = RouteSpec::from("/users").normalize();
        assert_eq!(options.path, RoutePath::Literal("/users".into()));
        assert!(options.config.is_empty());
    }

    #[test]
    fn full_options_normalize_to_themselves() {
        let mut config = RouteConfig::new();
        config.insert("cache".into(), Value::Bool(true));
        let spec = RouteSpec::from(RouteOptions {
            path: "/users".into(),
            config: config.clone(),
        });
        let options = spec.normalize();
        assert_eq!(options.config, config);
    }

    #[test]
    fn pattern_paths_compare_by_source() {
        let a: RoutePath = Regex::new("^/v[0-9]+").unwrap().into();
        let b: RoutePath = Regex::new("^/v[0-9]+").unwrap().into();
        assert_eq!(a, b);
        assert_eq!(a.source(), "^/v[0-9]+");
    }

    #[test]
    fn verb_constructors_record_the_method() {
        assert_eq!(MethodMetadata::get("/x", "k").method, "get");
        assert_eq!(MethodMetadata::delete("/x", "k").method, "delete");
        assert_eq!(MethodMetadata::verb("trace", "/x", "k").method, "trace");
    }
}
