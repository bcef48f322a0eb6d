use serde::{Deserialize, Serialize};
use subrules_model::CodecConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckConfig {
    /// Fail `check` when any group contains a selector the checker rejects
    #[serde(default = "default_true")]
    pub fail_on_invalid_selectors: bool,

    /// Print apps, groups, and rules that share an identity
    #[serde(default = "default_true")]
    pub report_duplicates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_on_invalid_selectors: default_true(),
            report_duplicates: default_true(),
        }
    }
}
