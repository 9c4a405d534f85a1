//! Chumchon E2E Test Harness
//!
//! Rust-controlled browser testing for the Chumchon community tourism
//! platform:
//! - Resolves role credentials from a static registry (fail-fast)
//! - Compiles declarative YAML scenarios to Playwright scripts
//! - Runs each scenario as one browser session against a live deployment
//! - Reports results as JSON
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Scenario Runner (Rust)                    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                  │
//! │    ├── wait_for_app() ──────── reachability probe            │
//! │    ├── login_steps(role) ───── CredentialRegistry lookup     │
//! │    ├── run_scenario(sc) ─────→ PlaywrightHandle              │
//! │    └── write_results() ─────── JSON report                   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Scenario (YAML)                                             │
//! │    ├── name, tags, login_as: role                            │
//! │    └── steps: [navigate | fill | click | select | upload     │
//! │               | wait | assert | assert_url                   │
//! │               | dismiss_if_visible | screenshot]             │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod pages;
pub mod playwright;
pub mod runner;
pub mod scenario;
pub mod session;

pub use error::{E2eError, E2eResult};
pub use pages::LoginPage;
pub use playwright::{resolve_url, PlaywrightHandle};
pub use runner::{RunnerConfig, TestRunner};
pub use scenario::{Locator, Scenario, Step};
pub use session::{login_as, login_steps};
