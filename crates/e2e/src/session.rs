//! Role login fixture
//!
//! The one precondition nearly every scenario shares: resolve a role's
//! credentials, drive the login form, and assert the browser landed on
//! that role's dashboard. Credential resolution fails before a single
//! step exists, so a misconfigured role produces no browser side
//! effects. There is no retry and no backoff; authentication against
//! the seeded backend is expected to be deterministic, and a failure
//! here is an environment defect.

use tracing::info;

use chumchon_common::{CredentialRegistry, FixtureArena, Role};

use crate::error::{E2eError, E2eResult};
use crate::pages::LoginPage;
use crate::playwright::PlaywrightHandle;
use crate::scenario::Step;

/// Bounded wait for the post-login redirect
pub const LOGIN_REDIRECT_TIMEOUT_MS: u64 = 30_000;

/// Build the step sequence that logs in as `role`.
///
/// Fails fast with a configuration error when the role is absent from
/// the registry or has an empty credential field.
pub fn login_steps(registry: &CredentialRegistry, role: Role) -> E2eResult<Vec<Step>> {
    let cred = registry.lookup(role)?;

    let mut steps = LoginPage::open(&cred.login_path);
    steps.extend(LoginPage::submit(&cred.email, &cred.password));
    steps.push(Step::AssertUrl {
        pattern: cred.redirect_to.clone(),
        timeout_ms: Some(LOGIN_REDIRECT_TIMEOUT_MS),
    });
    Ok(steps)
}

/// Log in as `role` in a fresh browser session.
///
/// Convenience wrapper for tests that need only the authenticated
/// state; scenario runs instead prepend [`login_steps`] so the flow
/// stays in one session.
pub async fn login_as(
    playwright: &PlaywrightHandle,
    registry: &CredentialRegistry,
    role: Role,
) -> E2eResult<()> {
    let steps = login_steps(registry, role)?;
    info!(%role, "logging in");

    let outcome = playwright.run_steps(&steps, &FixtureArena::new()).await?;
    if outcome.success {
        Ok(())
    } else {
        Err(E2eError::LoginFailed {
            role,
            reason: outcome
                .error
                .unwrap_or_else(|| "unknown failure".to_string()),
        })
    }
}
