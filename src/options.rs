//! Parser Options
//!
//! [`ParserOptions::defaults`] is built once per process and never changes.
//! Each top-level parse overlays the caller's [`ParserOverrides`] onto it and
//! threads the result, read-only, through the whole walk.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::logger::{global_logger, Logger};

/// Effective options for one parse
#[derive(Clone, Default)]
pub struct ParserOptions {
    /// Match tag and attribute names case-insensitively
    pub ignore_case: bool,
    /// An absent array container maps to `[]` instead of null
    pub empty_array_as_array: bool,
    /// Unclaimed children are an error instead of a warning
    pub is_strict: bool,
    /// Diagnostic sink, `None` disables diagnostics
    pub logger: Option<Arc<dyn Logger>>,
}

static DEFAULT_OPTIONS: Lazy<ParserOptions> = Lazy::new(ParserOptions::default);

/// Per-call overrides; unset fields keep the default
#[derive(Clone, Default)]
pub struct ParserOverrides {
    pub ignore_case: Option<bool>,
    pub empty_array_as_array: Option<bool>,
    pub is_strict: Option<bool>,
    /// `Some(None)` silences diagnostics for this call even when a
    /// process-wide sink is installed
    pub logger: Option<Option<Arc<dyn Logger>>>,
}

impl ParserOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_case(mut self, value: bool) -> Self {
        self.ignore_case = Some(value);
        self
    }

    pub fn empty_array_as_array(mut self, value: bool) -> Self {
        self.empty_array_as_array = Some(value);
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.is_strict = Some(value);
        self
    }

    pub fn logger(mut self, logger: Option<Arc<dyn Logger>>) -> Self {
        self.logger = Some(logger);
        self
    }
}

impl ParserOptions {
    /// The process-wide default: lenient, case-sensitive, absent arrays are null
    pub fn defaults() -> &'static ParserOptions {
        &DEFAULT_OPTIONS
    }

    /// Overlay `overrides` onto the defaults. Without a logger override the
    /// process-wide sink is used.
    pub fn effective(overrides: &ParserOverrides) -> ParserOptions {
        let base = Self::defaults();
        ParserOptions {
            ignore_case: overrides.ignore_case.unwrap_or(base.ignore_case),
            empty_array_as_array: overrides
                .empty_array_as_array
                .unwrap_or(base.empty_array_as_array),
            is_strict: overrides.is_strict.unwrap_or(base.is_strict),
            logger: match &overrides.logger {
                Some(logger) => logger.clone(),
                None => base.logger.clone().or_else(global_logger),
            },
        }
    }

    pub(crate) fn debug(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.debug(message);
        }
    }

    pub(crate) fn warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.warn(message);
        }
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("ignore_case", &self.ignore_case)
            .field("empty_array_as_array", &self.empty_array_as_array)
            .field("is_strict", &self.is_strict)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl fmt::Debug for ParserOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOverrides")
            .field("ignore_case", &self.ignore_case)
            .field("empty_array_as_array", &self.empty_array_as_array)
            .field("is_strict", &self.is_strict)
            .field("logger", &self.logger.as_ref().map(|l| l.is_some()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::testing::RecordingLogger;

    #[test]
    fn test_defaults_untouched_by_overlay() {
        let effective = ParserOptions::effective(
            &ParserOverrides::new().strict(true).ignore_case(true),
        );
        assert!(effective.is_strict);
        assert!(effective.ignore_case);
        assert!(!effective.empty_array_as_array);

        let defaults = ParserOptions::defaults();
        assert!(!defaults.is_strict);
        assert!(!defaults.ignore_case);
    }

    #[test]
    fn test_logger_override() {
        let sink = Arc::new(RecordingLogger::default());
        let overrides = ParserOverrides::new().logger(Some(sink.clone() as Arc<dyn Logger>));
        let options = ParserOptions::effective(&overrides);
        options.warn("careful");
        assert_eq!(sink.warnings(), vec!["careful".to_string()]);

        let silenced = ParserOptions::effective(&ParserOverrides::new().logger(None));
        assert!(silenced.logger.is_none());
    }
}
