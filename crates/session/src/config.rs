//! Session configuration, read from the environment.

use serde::{Deserialize, Serialize};

pub const CURRENCY_SYMBOL_VAR: &str = "OUTFITTER_CURRENCY_SYMBOL";
pub const CANVAS_LIMIT_VAR: &str = "OUTFITTER_CANVAS_LIMIT";

const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Prefix for formatted cart totals.
    pub currency_symbol: String,
    /// Maximum number of placed instances; `None` means unlimited.
    pub canvas_limit: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            canvas_limit: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(CURRENCY_SYMBOL_VAR) {
            Some(symbol) if !symbol.trim().is_empty() => {
                config.currency_symbol = symbol.trim().to_string();
            }
            Some(_) => {
                tracing::warn!(
                    var = CURRENCY_SYMBOL_VAR,
                    "blank currency symbol; using default"
                );
            }
            None => {}
        }

        if let Some(raw) = lookup(CANVAS_LIMIT_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.canvas_limit = Some(limit),
                _ => {
                    tracing::warn!(
                        var = CANVAS_LIMIT_VAR,
                        value = %raw,
                        "invalid canvas limit; canvas is unlimited"
                    );
                }
            }
        }

        config
    }
}
