// SPDX-License-Identifier: MPL-2.0
use super::locale::Locale;
use crate::error::{Error, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Translation context: one Fluent bundle per supported locale, an active
/// locale and a fallback locale.
///
/// Keys are either a message id (`view-home`) or a message attribute in
/// dotted form (`interval.minutes`).
pub struct I18n {
    bundles: HashMap<Locale, FluentBundle<FluentResource>>,
    current_locale: Locale,
    fallback_locale: Locale,
}

impl I18n {
    /// Loads the embedded catalog of every supported locale.
    pub fn new(current_locale: Locale, fallback_locale: Locale) -> Result<Self> {
        let mut sources = Vec::with_capacity(Locale::ALL.len());
        for locale in Locale::ALL {
            let filename = format!("{}.ftl", locale.code());
            let content = Asset::get(&filename)
                .ok_or_else(|| Error::I18n(format!("missing catalog {}", filename)))?;
            sources.push((
                locale,
                String::from_utf8_lossy(content.data.as_ref()).to_string(),
            ));
        }
        Self::from_sources(sources, current_locale, fallback_locale)
    }

    /// Builds a context from explicit FTL sources instead of the embedded
    /// catalogs.
    pub fn from_sources(
        sources: impl IntoIterator<Item = (Locale, String)>,
        current_locale: Locale,
        fallback_locale: Locale,
    ) -> Result<Self> {
        let mut bundles = HashMap::new();
        for (locale, source) in sources {
            let res = FluentResource::try_new(source).map_err(|(_, errors)| {
                Error::I18n(format!("failed to parse {} catalog: {:?}", locale, errors))
            })?;
            let mut bundle = FluentBundle::new(vec![locale.langid()]);
            bundle.set_use_isolating(false);
            bundle.add_resource(res).map_err(|errors| {
                Error::I18n(format!("failed to add {} catalog: {:?}", locale, errors))
            })?;
            bundles.insert(locale, bundle);
        }

        Ok(Self {
            bundles,
            current_locale,
            fallback_locale,
        })
    }

    pub fn current_locale(&self) -> Locale {
        self.current_locale
    }

    pub fn fallback_locale(&self) -> Locale {
        self.fallback_locale
    }

    /// Switches the active locale. Locales without a loaded bundle are ignored.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    pub fn tr(&self, key: &str) -> String {
        self.lookup(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &FluentArgs) -> String {
        self.lookup(key, Some(args))
    }

    /// Looks up a pluralized entry, passing `count` as the `$count` argument.
    pub fn tr_count(&self, key: &str, count: i64) -> String {
        let mut args = FluentArgs::new();
        args.set("count", FluentValue::from(count));
        self.lookup(key, Some(&args))
    }

    fn lookup(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(value) = self.format(self.current_locale, key, args) {
            return value;
        }
        if self.fallback_locale != self.current_locale {
            if let Some(value) = self.format(self.fallback_locale, key, args) {
                return value;
            }
        }
        tracing::debug!(key, locale = %self.current_locale, "translation missing");
        format!("MISSING: {}", key)
    }

    fn format(&self, locale: Locale, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&locale)?;
        let (id, attribute) = match key.split_once('.') {
            Some((id, attribute)) => (id, Some(attribute)),
            None => (key, None),
        };
        let msg = bundle.get_message(id)?;
        let pattern = match attribute {
            Some(name) => msg.get_attribute(name)?.value(),
            None => msg.value()?,
        };
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            None
        }
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("current_locale", &self.current_locale)
            .field("fallback_locale", &self.fallback_locale)
            .finish_non_exhaustive()
    }
}
