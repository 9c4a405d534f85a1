//! Suite configuration
//!
//! All knobs come from the environment so CI and local runs share one
//! invocation. The only required value is the base URL of the deployed
//! application; everything else has a default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the application base URL
pub const BASE_URL_ENV: &str = "CHUMCHON_BASE_URL";

/// Environment variable pointing at a credential override file
pub const CREDENTIALS_ENV: &str = "CHUMCHON_CREDENTIALS";

/// Browser engine driven through Playwright
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Browser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(Error::UnsupportedBrowser(other.to_string())),
        }
    }
}

/// Suite-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the application under test
    pub base_url: String,

    /// Browser engine driven through Playwright
    pub browser: Browser,

    /// Run the browser headless
    pub headless: bool,

    /// Viewport width in pixels
    pub viewport_width: u32,

    /// Viewport height in pixels
    pub viewport_height: u32,

    /// Default bounded wait for element visibility, in milliseconds
    pub default_timeout_ms: u64,

    /// Directory for failure screenshots
    pub screenshot_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            browser: Browser::default(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            default_timeout_ms: 30_000,
            screenshot_dir: PathBuf::from("test-results/screenshots"),
        }
    }
}

impl SuiteConfig {
    /// Build a configuration from the environment.
    ///
    /// Fails when [`BASE_URL_ENV`] is unset or empty; all other values
    /// fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(Error::BaseUrlNotConfigured(BASE_URL_ENV))?;

        let mut config = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        };

        if let Ok(browser) = std::env::var("CHUMCHON_BROWSER") {
            config.browser = browser.parse()?;
        }
        if let Ok(headless) = std::env::var("CHUMCHON_HEADLESS") {
            config.headless = headless != "0";
        }
        if let Some(ms) = std::env::var("CHUMCHON_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.default_timeout_ms = ms;
        }

        Ok(config)
    }

    /// Default bounded wait as a [`Duration`].
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = SuiteConfig::default();
        assert_eq!(config.browser, Browser::Chromium);
        assert!(config.headless);
        assert_eq!(config.default_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn browser_names_round_trip_through_from_str() {
        for browser in [Browser::Chromium, Browser::Firefox, Browser::Webkit] {
            assert_eq!(browser.as_str().parse::<Browser>().unwrap(), browser);
        }
    }

    #[test]
    fn unknown_browser_name_is_rejected() {
        match "netscape".parse::<Browser>() {
            Err(Error::UnsupportedBrowser(name)) => assert_eq!(name, "netscape"),
            other => panic!("expected UnsupportedBrowser, got {:?}", other),
        }
    }

    // One test for both env paths: set_var is process-global, so the
    // unset and set cases must not run in parallel.
    #[test]
    fn from_env_requires_and_normalizes_the_base_url() {
        std::env::remove_var(BASE_URL_ENV);
        assert!(matches!(
            SuiteConfig::from_env(),
            Err(Error::BaseUrlNotConfigured(BASE_URL_ENV))
        ));

        std::env::set_var(BASE_URL_ENV, "https://staging.example.com/");
        let config = SuiteConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://staging.example.com");
        std::env::remove_var(BASE_URL_ENV);
    }
}
