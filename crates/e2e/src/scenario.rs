//! Declarative YAML scenario model
//!
//! A scenario is one end-to-end flow against the live application:
//! an optional role precondition followed by a sequence of steps. The
//! step vocabulary is condition-based only — there is no fixed-duration
//! sleep — so every wait is bounded and tied to an observable state.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use chumchon_common::Role;

use crate::error::{E2eError, E2eResult};

/// A complete scenario parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Role to authenticate as before the first step
    #[serde(default)]
    pub login_as: Option<Role>,

    /// Viewport size for the browser
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Steps to execute in order
    pub steps: Vec<Step>,
}

fn default_viewport() -> Viewport {
    Viewport {
        width: 1280,
        height: 720,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// An element lookup by semantic role, accessible name or selector.
///
/// Scenarios prefer the accessibility-facing variants; raw CSS is the
/// escape hatch for markup without labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// CSS selector
    Css(String),

    /// ARIA role plus accessible name
    Role { role: String, name: String },

    /// Form control by its label text
    Label(String),

    /// Element by visible text
    Text(String),

    /// Input by placeholder text
    Placeholder(String),
}

/// A single step in a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to a path (relative to the base URL) or absolute URL
    Navigate {
        path: String,
        #[serde(default)]
        wait_for: Option<Locator>,
    },

    /// Fill an input field
    Fill { locator: Locator, value: String },

    /// Click an element
    Click {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Select an option from a dropdown
    Select { locator: Locator, value: String },

    /// Attach a fixture file to a file input
    Upload { locator: Locator, file: String },

    /// Wait for an element to reach a state
    Wait {
        locator: Locator,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        #[serde(default)]
        state: WaitState,
    },

    /// Assert something about an element
    Assert {
        locator: Locator,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        text_contains: Option<String>,
        #[serde(default)]
        count: Option<usize>,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Assert the current URL matches a regex pattern
    AssertUrl {
        pattern: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Click a confirmation control only when it is present.
    ///
    /// Tolerance for flows where the application may answer with either
    /// a modal dialog or inline validation; both are legitimate.
    DismissIfVisible { locator: Locator },

    /// Take a screenshot (debugging aid, never compared)
    Screenshot {
        name: String,
        #[serde(default)]
        full_page: bool,
    },
}

fn default_wait_timeout() -> u64 {
    30_000
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl Scenario {
    /// Parse a scenario from a YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let scenario: Self = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            E2eError::ScenarioParse(format!("{}: {}", path.display(), e))
        })
    }

    /// Load all scenarios under a directory, sorted by file path.
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut paths: Vec<_> = walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();
        paths.sort();

        let mut scenarios = Vec::with_capacity(paths.len());
        for path in paths {
            scenarios.push(Self::from_file(&path)?);
        }
        Ok(scenarios)
    }

    /// Structural checks performed before any browser step runs.
    pub fn validate(&self) -> E2eResult<()> {
        if self.steps.is_empty() {
            return Err(E2eError::InvalidScenario {
                name: self.name.clone(),
                reason: "scenario has no steps".to_string(),
            });
        }
        for step in &self.steps {
            match step {
                Step::AssertUrl { pattern, .. } => {
                    if let Err(e) = Regex::new(pattern) {
                        return Err(E2eError::InvalidScenario {
                            name: self.name.clone(),
                            reason: format!("bad URL pattern '{}': {}", pattern, e),
                        });
                    }
                }
                Step::Assert {
                    visible,
                    text,
                    text_contains,
                    count,
                    ..
                } => {
                    // An assert with no assertion fields would compile
                    // to nothing and report success having checked
                    // nothing.
                    if visible.is_none()
                        && text.is_none()
                        && text_contains.is_none()
                        && count.is_none()
                    {
                        return Err(E2eError::InvalidScenario {
                            name: self.name.clone(),
                            reason: "assert step checks nothing".to_string(),
                        });
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Whether this scenario carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
