// SPDX-License-Identifier: MPL-2.0
//! Client-side routing.
//!
//! Every route lives under an optional `/:locale` segment. The
//! [`LocaleGuard`] runs before route matching; once it lets a navigation
//! through, the remaining path is matched against the view table, with a
//! catch-all `not-found` view for anything else.

mod location;

pub use location::Location;

use crate::error::{Error, Result};
use crate::i18n::{GuardOutcome, I18n, Locale, LocaleGuard};

/// Redirects followed by [`Router::resolve`] before giving up. The locale
/// guard needs at most one.
const MAX_REDIRECTS: usize = 3;

/// Routed views. The UI itself lives elsewhere; the router only names
/// what should be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Registration,
    Restore,
    NewPass,
    Personal,
    Articles,
    Faq,
    Partner,
    Quiz,
    Setting,
    NotFound,
}

impl View {
    /// Views reachable by an exact path, in route-table order.
    pub const ROUTED: [View; 11] = [
        View::Home,
        View::Login,
        View::Registration,
        View::Restore,
        View::NewPass,
        View::Personal,
        View::Articles,
        View::Faq,
        View::Partner,
        View::Quiz,
        View::Setting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Login => "login",
            View::Registration => "registration",
            View::Restore => "restore",
            View::NewPass => "newpass",
            View::Personal => "personal",
            View::Articles => "articles",
            View::Faq => "faq",
            View::Partner => "partner",
            View::Quiz => "quiz",
            View::Setting => "setting",
            View::NotFound => "not-found",
        }
    }

    /// Path below the locale segment. `NotFound` has none.
    pub fn path(self) -> Option<&'static str> {
        match self {
            View::Home => Some(""),
            View::NotFound => None,
            other => Some(other.name()),
        }
    }

    /// Catalog key of the view title.
    pub fn title_key(self) -> String {
        format!("view-{}", self.name())
    }

    /// Matches a locale-less path. Matching ignores ASCII case and a
    /// trailing slash; nested paths fall through to `NotFound`.
    pub fn match_path(path: &str) -> View {
        let trimmed = path.trim_matches('/');
        Self::ROUTED
            .into_iter()
            .find(|view| {
                view.path()
                    .is_some_and(|route| route.eq_ignore_ascii_case(trimmed))
            })
            .unwrap_or(View::NotFound)
    }

    /// Full app-relative href for this view in `locale`.
    pub fn href(self, locale: Locale) -> Option<String> {
        self.path().map(|path| match path {
            "" => format!("/{}", locale.code()),
            path => format!("/{}/{}", locale.code(), path),
        })
    }
}

/// Where the page should scroll after navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Scroll the element matching this selector (`#anchor`) into view.
    Anchor(String),
    /// Scroll to `left: 0, top: 0`.
    Top,
}

impl ScrollTarget {
    fn for_location(location: &Location) -> Self {
        match location.fragment() {
            Some(fragment) => ScrollTarget::Anchor(format!("#{}", fragment)),
            None => ScrollTarget::Top,
        }
    }
}

/// A navigation that passed the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub locale: Locale,
    pub view: View,
    /// The full location, mount prefix included.
    pub location: Location,
    pub scroll: ScrollTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The guard asked for a different location (mount prefix included).
    Redirect(Location),
    Resolved(ResolvedRoute),
}

#[derive(Debug, Clone)]
pub struct Router {
    base_path: String,
    guard: LocaleGuard,
}

impl Router {
    pub fn new(base_path: impl Into<String>, guard: LocaleGuard) -> Self {
        Self {
            base_path: base_path.into(),
            guard,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn guard(&self) -> &LocaleGuard {
        &self.guard
    }

    /// Runs one navigation step: guard first, then view matching.
    ///
    /// Locations outside the mount prefix are matched as-is.
    pub fn navigate(&self, i18n: &mut I18n, url: &str) -> Navigation {
        let location = Location::parse(url);
        let inner = location
            .strip_base(&self.base_path)
            .unwrap_or_else(|| location.clone());

        match self.guard.before_enter(i18n, &inner) {
            GuardOutcome::Redirect(target) => {
                Navigation::Redirect(target.with_base(&self.base_path))
            }
            GuardOutcome::Proceed { locale, rest } => {
                tracing::debug!(%location, %locale, "route resolved");
                Navigation::Resolved(ResolvedRoute {
                    locale,
                    view: View::match_path(&rest),
                    scroll: ScrollTarget::for_location(&location),
                    location,
                })
            }
        }
    }

    /// Navigates, following guard redirects until a view resolves.
    pub fn resolve(&self, i18n: &mut I18n, url: &str) -> Result<ResolvedRoute> {
        let mut target = url.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match self.navigate(i18n, &target) {
                Navigation::Resolved(route) => return Ok(route),
                Navigation::Redirect(location) => target = location.to_string(),
            }
        }
        Err(Error::Navigation(format!(
            "too many redirects resolving {}",
            url
        )))
    }
}
