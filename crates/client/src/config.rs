//! Runtime settings, read from environment variables.

use std::path::PathBuf;

use pricecalc_core::DomainResult;
use pricecalc_pricing::FeeConfig;

/// Storage key the product list lives under.
pub const DEFAULT_STORAGE_KEY: &str = "product";

pub const ENV_DATA_DIR: &str = "PRICECALC_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "PRICECALC_STORAGE_KEY";
pub const ENV_FEE_PERCENT: &str = "PRICECALC_FEE_PERCENT";
pub const ENV_FEE_CONSTANT: &str = "PRICECALC_FEE_CONSTANT";
pub const ENV_TAX_PERCENT: &str = "PRICECALC_TAX_PERCENT";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory for the file store; `None` means the OS data directory.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    /// Initial fee configuration for a new session.
    pub fees: FeeConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            fees: FeeConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults; unparsable or out-of-range values
    /// are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            settings.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup(ENV_STORAGE_KEY).filter(|v| !v.trim().is_empty()) {
            settings.storage_key = key;
        }

        let fees = &mut settings.fees;
        apply_fee(&lookup, ENV_FEE_PERCENT, |v| fees.set_fee_percent(v));
        apply_fee(&lookup, ENV_FEE_CONSTANT, |v| fees.set_fee_constant(v));
        apply_fee(&lookup, ENV_TAX_PERCENT, |v| fees.set_tax_percent(v));

        settings
    }
}

fn apply_fee(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    mut set: impl FnMut(f64) -> DomainResult<()>,
) {
    let Some(raw) = lookup(name) else {
        return;
    };

    match raw.trim().parse::<f64>() {
        Ok(value) => {
            if let Err(err) = set(value) {
                tracing::warn!(var = name, error = %err, "ignoring fee setting");
            }
        }
        Err(err) => {
            tracing::warn!(var = name, value = %raw, error = %err, "ignoring unparsable fee setting");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
        assert_eq!(Settings::default().storage_key, "product");
    }

    #[test]
    fn reads_all_variables() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/tmp/pricecalc"),
            (ENV_STORAGE_KEY, "shop"),
            (ENV_FEE_PERCENT, "3.4"),
            (ENV_FEE_CONSTANT, "0.25"),
            (ENV_TAX_PERCENT, "7.5"),
        ]));

        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/pricecalc")));
        assert_eq!(settings.storage_key, "shop");
        assert_eq!(settings.fees, FeeConfig::new(3.4, 0.25, 7.5).unwrap());
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_FEE_PERCENT, "lots"),
            (ENV_FEE_CONSTANT, "2.0"),
            (ENV_TAX_PERCENT, " 5 "),
        ]));

        assert_eq!(settings.fees.fee_percent(), 2.6);
        assert_eq!(settings.fees.fee_constant(), 0.1);
        assert_eq!(settings.fees.tax_percent(), 5.0);
    }
}
