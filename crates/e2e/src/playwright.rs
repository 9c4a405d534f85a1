//! Playwright browser automation
//!
//! A scenario compiles to a single Node script: one browser, one
//! context, one page for the whole flow, so the session created by
//! login survives every later step. The script reports its outcome as
//! one JSON line on stdout which is parsed back here.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use chumchon_common::{FixtureArena, SuiteConfig};

use crate::error::{E2eError, E2eResult};
use crate::scenario::{Locator, Step, WaitState};

/// Resolve a navigation target against the base URL.
///
/// Absolute targets pass through verbatim; relative targets are joined
/// onto the base exactly once.
pub fn resolve_url(base: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        target.trim_start_matches('/')
    )
}

/// Command to run a generated script.
///
/// The script lives in a temp dir, so node would resolve `require` from
/// there; NODE_PATH points it back at the suite's own node_modules.
fn node_command(script_path: &Path) -> TokioCommand {
    let mut cmd = TokioCommand::new("node");
    cmd.arg(script_path);
    if let Ok(cwd) = std::env::current_dir() {
        cmd.env("NODE_PATH", cwd.join("node_modules"));
    }
    cmd
}

/// Quote a string as a single-quoted JS literal.
fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render a locator as a Playwright locator expression.
fn locator_js(locator: &Locator) -> String {
    match locator {
        Locator::Css(sel) => format!("page.locator({})", js_str(sel)),
        Locator::Role { role, name } => format!(
            "page.getByRole({}, {{ name: {} }})",
            js_str(role),
            js_str(name)
        ),
        Locator::Label(label) => format!("page.getByLabel({})", js_str(label)),
        Locator::Text(text) => format!("page.getByText({})", js_str(text)),
        Locator::Placeholder(p) => format!("page.getByPlaceholder({})", js_str(p)),
    }
}

fn locator_desc(locator: &Locator) -> String {
    match locator {
        Locator::Css(sel) => format!("css={}", sel),
        Locator::Role { role, name } => format!("role={}[{}]", role, name),
        Locator::Label(label) => format!("label={}", label),
        Locator::Text(text) => format!("text={}", text),
        Locator::Placeholder(p) => format!("placeholder={}", p),
    }
}

/// Outcome of one generated script, parsed from its JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptOutcome {
    pub success: bool,
    #[serde(default)]
    pub step: Option<usize>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

static OUTCOME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\{"success".*\}$"#).expect("outcome regex"));

/// Playwright browser handle
pub struct PlaywrightHandle {
    config: SuiteConfig,
}

impl PlaywrightHandle {
    /// Create a new handle, verifying Playwright is installed.
    pub fn new(config: SuiteConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Short name for a step, used in logs and failure reports.
    pub fn step_name(step: &Step) -> String {
        match step {
            Step::Navigate { path, .. } => format!("navigate:{}", path),
            Step::Fill { locator, .. } => format!("fill:{}", locator_desc(locator)),
            Step::Click { locator, .. } => format!("click:{}", locator_desc(locator)),
            Step::Select { locator, .. } => format!("select:{}", locator_desc(locator)),
            Step::Upload { file, .. } => format!("upload:{}", file),
            Step::Wait { locator, .. } => format!("wait:{}", locator_desc(locator)),
            Step::Assert { locator, .. } => format!("assert:{}", locator_desc(locator)),
            Step::AssertUrl { pattern, .. } => format!("assert_url:{}", pattern),
            Step::DismissIfVisible { locator } => {
                format!("dismiss_if_visible:{}", locator_desc(locator))
            }
            Step::Screenshot { name, .. } => format!("screenshot:{}", name),
        }
    }

    /// Build the Node script for a sequence of steps.
    ///
    /// Arena placeholders (`{{run_id}}`) are substituted here, so the
    /// generated script contains only literal values.
    pub fn build_script(&self, steps: &[Step], arena: &FixtureArena) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');
const {{ expect }} = require('@playwright/test');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  let step = 0;
  const names = [{names}];

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            names = steps
                .iter()
                .map(|s| js_str(&Self::step_name(s)))
                .collect::<Vec<_>>()
                .join(", "),
        ));

        for (i, step) in steps.iter().enumerate() {
            script.push_str(&format!("\n    step = {}; // {}\n", i, Self::step_name(step)));
            script.push_str(&self.step_to_js(step, arena));
            script.push('\n');
        }

        script.push_str(
            r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.log(JSON.stringify({ success: false, step, name: names[step], error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Convert one step to JS.
    fn step_to_js(&self, step: &Step, arena: &FixtureArena) -> String {
        let default_timeout = self.config.default_timeout_ms;
        match step {
            Step::Navigate { path, wait_for } => {
                let url = resolve_url(&self.config.base_url, &arena.substitute(path));
                let mut js = format!("    await page.goto({});", js_str(&url));
                if let Some(locator) = wait_for {
                    js.push_str(&format!(
                        "\n    await {}.waitFor({{ state: 'visible', timeout: {} }});",
                        locator_js(locator),
                        default_timeout
                    ));
                }
                js
            }
            Step::Fill { locator, value } => format!(
                "    await {}.fill({});",
                locator_js(locator),
                js_str(&arena.substitute(value))
            ),
            Step::Click { locator, timeout_ms } => format!(
                "    await {}.click({{ timeout: {} }});",
                locator_js(locator),
                timeout_ms.unwrap_or(default_timeout)
            ),
            Step::Select { locator, value } => format!(
                "    await {}.selectOption({});",
                locator_js(locator),
                js_str(&arena.substitute(value))
            ),
            Step::Upload { locator, file } => format!(
                "    await {}.setInputFiles({});",
                locator_js(locator),
                js_str(file)
            ),
            Step::Wait {
                locator,
                timeout_ms,
                state,
            } => {
                let state_str = match state {
                    WaitState::Visible => "visible",
                    WaitState::Hidden => "hidden",
                    WaitState::Attached => "attached",
                    WaitState::Detached => "detached",
                };
                format!(
                    "    await {}.waitFor({{ state: '{}', timeout: {} }});",
                    locator_js(locator),
                    state_str,
                    timeout_ms
                )
            }
            Step::Assert {
                locator,
                visible,
                text,
                text_contains,
                count,
                timeout_ms,
            } => {
                let timeout = timeout_ms.unwrap_or(default_timeout);
                let target = locator_js(locator);
                let mut assertions = Vec::new();

                if let Some(vis) = visible {
                    let matcher = if *vis { "toBeVisible" } else { "toBeHidden" };
                    assertions.push(format!(
                        "    await expect({}).{}({{ timeout: {} }});",
                        target, matcher, timeout
                    ));
                }
                if let Some(t) = text {
                    assertions.push(format!(
                        "    await expect({}).toHaveText({}, {{ timeout: {} }});",
                        target,
                        js_str(&arena.substitute(t)),
                        timeout
                    ));
                }
                if let Some(tc) = text_contains {
                    assertions.push(format!(
                        "    await expect({}).toContainText({}, {{ timeout: {} }});",
                        target,
                        js_str(&arena.substitute(tc)),
                        timeout
                    ));
                }
                if let Some(c) = count {
                    assertions.push(format!(
                        "    await expect({}).toHaveCount({}, {{ timeout: {} }});",
                        target, c, timeout
                    ));
                }

                assertions.join("\n")
            }
            Step::AssertUrl { pattern, timeout_ms } => format!(
                "    await page.waitForURL(new RegExp({}), {{ timeout: {} }});",
                js_str(pattern),
                timeout_ms.unwrap_or(default_timeout)
            ),
            Step::DismissIfVisible { locator } => {
                let target = locator_js(locator);
                format!(
                    "    if (await {}.isVisible()) {{\n      await {}.click();\n    }}",
                    target, target
                )
            }
            Step::Screenshot { name, full_page } => {
                let path = self.config.screenshot_dir.join(format!("{}.png", name));
                format!(
                    "    await page.screenshot({{ path: {}, fullPage: {} }});",
                    js_str(&path.to_string_lossy()),
                    full_page
                )
            }
        }
    }

    /// Build and run a step sequence as one script.
    ///
    /// An `Ok` with `success: false` is a scenario failure (assertion
    /// or timeout inside the browser); `Err` is a harness fault.
    pub async fn run_steps(
        &self,
        steps: &[Step],
        arena: &FixtureArena,
    ) -> E2eResult<ScriptOutcome> {
        let script = self.build_script(steps, arena);
        self.run_script(&script).await
    }

    /// Execute a generated script via node and parse its outcome.
    pub async fn run_script(&self, script: &str) -> E2eResult<ScriptOutcome> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, script)?;

        debug!(script = %script_path.display(), "running Playwright script");

        let output = node_command(&script_path).output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if let Some(line) = OUTCOME_LINE.find_iter(&stdout).last() {
            let outcome: ScriptOutcome = serde_json::from_str(line.as_str())?;
            return Ok(outcome);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(E2eError::Playwright(format!(
            "script produced no outcome (exit: {:?})\nstdout: {}\nstderr: {}",
            output.status.code(),
            stdout,
            stderr
        )))
    }

    /// Screenshot directory for this handle.
    pub fn screenshot_dir(&self) -> &PathBuf {
        &self.config.screenshot_dir
    }
}
