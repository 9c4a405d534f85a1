//! Scenario runner
//!
//! Orchestrates the suite against an already-running deployment: probes
//! the application for reachability, loads YAML scenarios, prepends the
//! role login fixture where declared, executes each scenario as one
//! Playwright script, and writes a JSON report. The application is
//! never spawned or mocked from here.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use chumchon_common::{CredentialRegistry, FixtureArena, SuiteConfig};

use crate::error::{E2eError, E2eResult};
use crate::playwright::PlaywrightHandle;
use crate::scenario::Scenario;
use crate::session::login_steps;

/// Result of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    /// Name of the failing step, when one failed
    pub failed_step: Option<String>,
    pub error: Option<String>,
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub run_id: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub suite: SuiteConfig,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Optional YAML credential override file
    pub credentials_file: Option<PathBuf>,
    /// How long to wait for the application to answer at all
    pub app_probe_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            suite: SuiteConfig::default(),
            specs_dir: PathBuf::from("specs"),
            output_dir: PathBuf::from("test-results"),
            credentials_file: None,
            app_probe_timeout: Duration::from_secs(30),
        }
    }
}

/// Main scenario runner
pub struct TestRunner {
    config: RunnerConfig,
    registry: CredentialRegistry,
    arena: FixtureArena,
}

impl TestRunner {
    /// Build a runner, loading the credential registry.
    pub fn new(config: RunnerConfig) -> E2eResult<Self> {
        let registry = match &config.credentials_file {
            Some(path) => CredentialRegistry::from_file(path)?,
            None => CredentialRegistry::default(),
        };
        let arena = FixtureArena::new();
        info!(run_id = arena.run_id(), "fixture arena allocated");

        Ok(Self {
            config,
            registry,
            arena,
        })
    }

    pub fn registry(&self) -> &CredentialRegistry {
        &self.registry
    }

    pub fn arena(&self) -> &FixtureArena {
        &self.arena
    }

    /// Probe the deployed application until it answers, within the
    /// configured bound. The application is an external dependency; an
    /// unreachable deployment is a setup defect, not a test failure.
    pub async fn wait_for_app(&self) -> E2eResult<()> {
        let url = self.config.suite.base_url.clone();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = Instant::now();
        let mut attempts = 0;

        while start.elapsed() < self.config.app_probe_timeout {
            attempts += 1;
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() || resp.status().is_redirection() => {
                    debug!(%url, attempts, "application reachable");
                    return Ok(());
                }
                Ok(resp) => {
                    warn!(status = %resp.status(), "application answered with an error status");
                }
                Err(e) => {
                    if attempts == 1 {
                        info!(%url, "waiting for application...");
                    }
                    if !e.is_connect() {
                        warn!(error = %e, "reachability probe error");
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }

        Err(E2eError::AppUnreachable { url, attempts })
    }

    /// Run every scenario under the specs directory.
    pub async fn run_all(&self) -> E2eResult<SuiteResult> {
        let scenarios = Scenario::load_all(&self.config.specs_dir)?;
        self.wait_for_app().await?;
        self.run_scenarios(&scenarios).await
    }

    /// Run scenarios carrying a tag.
    pub async fn run_tagged(&self, tag: &str) -> E2eResult<SuiteResult> {
        let scenarios: Vec<Scenario> = Scenario::load_all(&self.config.specs_dir)?
            .into_iter()
            .filter(|s| s.has_tag(tag))
            .collect();
        self.wait_for_app().await?;
        self.run_scenarios(&scenarios).await
    }

    /// Run one scenario by name.
    pub async fn run_named(&self, name: &str) -> E2eResult<ScenarioResult> {
        let scenario = Scenario::load_all(&self.config.specs_dir)?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::ScenarioNotFound(name.to_string()))?;
        self.wait_for_app().await?;
        self.run_scenario(&scenario).await
    }

    /// Run a list of scenarios sequentially.
    ///
    /// A scenario that fails, for any reason, is recorded and the run
    /// moves on; one broken file must not cost the report for the rest.
    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> E2eResult<SuiteResult> {
        let start = Instant::now();
        let started_at = chrono::Utc::now();

        info!("running {} scenario(s)...", scenarios.len());

        let mut results = Vec::with_capacity(scenarios.len());
        let mut passed = 0;
        let mut failed = 0;

        for scenario in scenarios {
            let result = match self.run_scenario(scenario).await {
                Ok(result) => result,
                Err(e) => ScenarioResult {
                    name: scenario.name.clone(),
                    success: false,
                    duration_ms: 0,
                    failed_step: None,
                    error: Some(e.to_string()),
                },
            };
            if result.success {
                passed += 1;
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!(
                    "✗ {} at {} - {}",
                    result.name,
                    result.failed_step.as_deref().unwrap_or("?"),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteResult {
            run_id: self.arena.run_id().to_string(),
            started_at,
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    /// Run a single scenario as one browser session.
    pub async fn run_scenario(&self, scenario: &Scenario) -> E2eResult<ScenarioResult> {
        let start = Instant::now();
        debug!(name = %scenario.name, "running scenario");

        scenario.validate()?;

        // Login prologue resolves before any step runs; a registry
        // violation aborts here with no browser side effects.
        let mut steps = match scenario.login_as {
            Some(role) => login_steps(&self.registry, role)?,
            None => Vec::new(),
        };
        let prologue = steps.len();
        steps.extend(scenario.steps.iter().cloned());

        let suite = SuiteConfig {
            viewport_width: scenario.viewport.width,
            viewport_height: scenario.viewport.height,
            ..self.config.suite.clone()
        };
        let playwright = PlaywrightHandle::new(suite)?;

        let outcome = playwright.run_steps(&steps, &self.arena).await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let failed_step = if outcome.success {
            None
        } else {
            // Report login-prologue failures under the fixture name so
            // environment defects read differently from scenario bugs.
            match (outcome.step, outcome.name) {
                (Some(i), Some(name)) if i < prologue => Some(format!("login_as:{}", name)),
                (_, name) => name,
            }
        };

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            success: outcome.success,
            duration_ms,
            failed_step,
            error: outcome.error,
        })
    }

    /// Write a run report to `<output_dir>/test-results.json`.
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("results written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_seeds_default_registry() {
        let runner = TestRunner::new(RunnerConfig::default()).unwrap();
        assert_eq!(runner.registry().roles().count(), 3);
        assert!(!runner.arena().run_id().is_empty());
    }

    #[tokio::test]
    async fn a_faulty_scenario_does_not_abort_the_rest() {
        use crate::scenario::{Step, Viewport};

        // Both fail before any browser starts; the run must still
        // produce a full report instead of bailing on the first.
        let faulty = |name: &str, steps: Vec<Step>| Scenario {
            name: name.to_string(),
            description: String::new(),
            tags: Vec::new(),
            login_as: None,
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            steps,
        };
        let scenarios = vec![
            faulty(
                "bad-pattern",
                vec![Step::AssertUrl {
                    pattern: "([unclosed".to_string(),
                    timeout_ms: None,
                }],
            ),
            faulty("no-steps", Vec::new()),
        ];

        let runner = TestRunner::new(RunnerConfig::default()).unwrap();
        let suite = runner.run_scenarios(&scenarios).await.unwrap();

        assert_eq!(suite.total, 2);
        assert_eq!(suite.failed, 2);
        assert_eq!(suite.results.len(), 2);
        for result in &suite.results {
            assert!(!result.success);
            assert!(result.error.is_some());
        }
    }

    #[test]
    fn suite_result_serializes_round_trip() {
        let result = SuiteResult {
            run_id: "20260829-x".to_string(),
            started_at: chrono::Utc::now(),
            total: 1,
            passed: 1,
            failed: 0,
            duration_ms: 1234,
            results: vec![ScenarioResult {
                name: "login-superadmin".to_string(),
                success: true,
                duration_ms: 1234,
                failed_step: None,
                error: None,
            }],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: SuiteResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total, 1);
        assert_eq!(back.results[0].name, "login-superadmin");
    }
}
