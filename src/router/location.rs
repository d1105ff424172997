// SPDX-License-Identifier: MPL-2.0
//! Navigation targets: a path plus optional query and fragment.

use reqwest::Url;
use std::fmt;

/// A navigation target inside the portal.
///
/// The path always starts with `/`. Empty query and fragment parts are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Location {
    /// Parses an absolute URL (`https://host/ru/faq?x#y`) or a bare path
    /// (`/ru/faq?x#y`). Only path, query and fragment are kept.
    pub fn parse(input: &str) -> Self {
        if input.contains("://") {
            if let Ok(url) = Url::parse(input) {
                return Self::from_parts(url.path(), url.query(), url.fragment());
            }
        }

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        Self::from_parts(path, query, fragment)
    }

    pub fn from_parts(path: &str, query: Option<&str>, fragment: Option<&str>) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let non_empty = |part: Option<&str>| part.filter(|p| !p.is_empty()).map(str::to_string);
        Self {
            path,
            query: non_empty(query),
            fragment: non_empty(fragment),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Same query and fragment, different path.
    pub fn with_path(&self, path: &str) -> Self {
        Self::from_parts(path, self.query(), self.fragment())
    }

    /// Removes a mount prefix such as `/portal`. Returns `None` when the
    /// path lies outside it. A base of `/` matches everything.
    pub fn strip_base(&self, base: &str) -> Option<Self> {
        let base = normalize_base(base);
        if base.is_empty() {
            return Some(self.clone());
        }
        if self.path == base {
            return Some(self.with_path("/"));
        }
        self.path
            .strip_prefix(base.as_str())
            .filter(|rest| rest.starts_with('/'))
            .map(|rest| self.with_path(rest))
    }

    /// Inverse of [`Location::strip_base`].
    pub fn with_base(&self, base: &str) -> Self {
        let base = normalize_base(base);
        if base.is_empty() {
            return self.clone();
        }
        let path = if self.path == "/" {
            base
        } else {
            format!("{}{}", base, self.path)
        };
        self.with_path(&path)
    }
}

/// `/portal/` and `portal` both become `/portal`; `/` becomes empty.
fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}
