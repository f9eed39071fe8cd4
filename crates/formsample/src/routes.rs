// File: src/routes.rs
// Purpose: Static page route table

use crate::config::RoutingConfig;

/// Pages reachable by GET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageRoute {
    /// Remote post with a loading placeholder
    Suspense,
    /// Manual vs. schema-validated form
    FormSample,
}

impl PageRoute {
    pub const ALL: [PageRoute; 2] = [PageRoute::Suspense, PageRoute::FormSample];

    pub fn path(self) -> &'static str {
        match self {
            PageRoute::Suspense => "/",
            PageRoute::FormSample => "/form",
        }
    }

    /// Title used for the document and the navigation link
    pub fn title(self) -> &'static str {
        match self {
            PageRoute::Suspense => "Suspense",
            PageRoute::FormSample => "FormSample",
        }
    }

    /// Match a request path against the table.
    ///
    /// Unless `trailing_slash` is set, one trailing slash is ignored
    /// (`/form/` matches `/form`).
    pub fn resolve(path: &str, routing: &RoutingConfig) -> Option<PageRoute> {
        let path = if routing.trailing_slash || path.len() <= 1 {
            path
        } else {
            path.strip_suffix('/').unwrap_or(path)
        };
        let path = if path.is_empty() { "/" } else { path };

        Self::ALL.into_iter().find(|route| {
            if routing.case_insensitive {
                route.path().eq_ignore_ascii_case(path)
            } else {
                route.path() == path
            }
        })
    }
}
