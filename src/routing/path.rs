use regex::Regex;

use crate::error::{PorticoError, Result};
use crate::metadata::RoutePath;

/// Effective controller path once the default root is applied.
///
/// A configured default root prefixes a declared string path, or stands in
/// as the whole path when the controller declares none. Applied exactly once
/// per compilation, never written back to the metadata store.
pub fn apply_default_root(
    default_root: Option<&str>,
    controller_path: Option<String>,
) -> Option<String> {
    match (default_root, controller_path) {
        (Some(root), Some(path)) => Some(format!("{root}{path}")),
        (Some(root), None) => Some(root.to_string()),
        (None, path) => path,
    }
}

/// Compose the final route path from the controller path and the method path.
///
/// A root (`/`) or absent controller path never prefixes, for literal and
/// pattern route paths alike. Pattern composition concatenates the controller
/// path with the pattern source and recompiles.
pub fn compose(controller_path: Option<&str>, route_path: RoutePath) -> Result<RoutePath> {
    let Some(prefix) = controller_path else {
        return Ok(route_path);
    };
    if prefix == "/" {
        return Ok(route_path);
    }
    match route_path {
        RoutePath::Literal(path) => Ok(RoutePath::Literal(format!("{prefix}{path}"))),
        RoutePath::Pattern(pattern) => {
            let source = format!("{prefix}{}", pattern.as_str());
            let composed =
                Regex::new(&source).map_err(|err| PorticoError::InvalidRoutePattern {
                    pattern: source.clone(),
                    reason: err.to_string(),
                })?;
            Ok(RoutePath::Pattern(composed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_controller_path_never_prefixes_literals() {
        let composed = compose(Some("/"), "/users".into()).unwrap();
        assert_eq!(composed, RoutePath::Literal("/users".into()));
    }

    #[test]
    fn root_controller_path_never_prefixes_patterns() {
        let pattern: RoutePath = Regex::new("/v[0-9]+").unwrap().into();
        let composed = compose(Some("/"), pattern.clone()).unwrap();
        assert_eq!(composed, pattern);
    }

    #[test]
    fn absent_controller_path_leaves_the_route_path_unchanged() {
        let composed = compose(None, "/users".into()).unwrap();
        assert_eq!(composed, RoutePath::Literal("/users".into()));
    }

    #[test]
    fn non_root_string_paths_concatenate() {
        let composed = compose(Some("/api"), "/users".into()).unwrap();
        assert_eq!(composed, RoutePath::Literal("/api/users".into()));
    }

    #[test]
    fn non_root_prefix_concatenates_with_pattern_source() {
        let pattern: RoutePath = Regex::new("/v[0-9]+").unwrap().into();
        let composed = compose(Some("/api"), pattern).unwrap();
        assert_eq!(composed.source(), "/api/v[0-9]+");
    }

    #[test]
    fn invalid_composed_pattern_is_reported() {
        let pattern: RoutePath = Regex::new("[0-9]+").unwrap().into();
        let err = compose(Some("/api("), pattern).unwrap_err();
        assert!(matches!(err, PorticoError::InvalidRoutePattern { .. }));
    }

    #[test]
    fn default_root_prefixes_a_string_path() {
        assert_eq!(
            apply_default_root(Some("/v1"), Some("/users".into())),
            Some("/v1/users".into())
        );
    }

    #[test]
    fn default_root_stands_in_for_a_missing_path() {
        assert_eq!(apply_default_root(Some("/v1"), None), Some("/v1".into()));
    }

    #[test]
    fn no_default_root_is_a_passthrough() {
        assert_eq!(apply_default_root(None, Some("/users".into())), Some("/users".into()));
        assert_eq!(apply_default_root(None, None), None);
    }
}
