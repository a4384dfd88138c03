// Runtime settings for the console bank
//
// There is no config file and no command-line flag. The defaults below
// are the whole configuration; RUST_LOG can still override the log filter.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_FILTER: &str = "console_bank=warn";
pub const DEFAULT_MENU_TITLE: &str = "--- Banking System Menu ---";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Header line printed above the menu options
    #[serde(default = "default_menu_title")]
    pub menu_title: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_menu_title() -> String {
    DEFAULT_MENU_TITLE.to_string()
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            menu_title: default_menu_title(),
        }
    }
}

impl BankConfig {
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_menu_title(mut self, title: impl Into<String>) -> Self {
        self.menu_title = title.into();
        self
    }
}
