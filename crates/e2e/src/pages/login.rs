//! The login screen

use crate::scenario::{Locator, Step, WaitState};

/// Bounded wait for the login form to become interactive
pub const LOGIN_READY_TIMEOUT_MS: u64 = 30_000;

/// Page object for the login form: email input, password input, submit
/// button, and the two operations performed against them.
pub struct LoginPage;

impl LoginPage {
    pub fn email_input() -> Locator {
        Locator::Css("input[name='email']".to_string())
    }

    pub fn password_input() -> Locator {
        Locator::Css("input[name='password']".to_string())
    }

    pub fn submit_button() -> Locator {
        Locator::Role {
            role: "button".to_string(),
            name: "เข้าสู่ระบบ".to_string(),
        }
    }

    /// Navigate to the login form and block until the email input is
    /// visible. The form is not considered loaded before that.
    pub fn open(path: &str) -> Vec<Step> {
        vec![
            Step::Navigate {
                path: path.to_string(),
                wait_for: None,
            },
            Step::Wait {
                locator: Self::email_input(),
                timeout_ms: LOGIN_READY_TIMEOUT_MS,
                state: WaitState::Visible,
            },
        ]
    }

    /// Fill both credential fields and activate submit.
    ///
    /// No wait for the outcome is emitted here: success redirects while
    /// rejected credentials stay on the form with inline validation, so
    /// the caller owns the post-submit assertion.
    pub fn submit(email: &str, password: &str) -> Vec<Step> {
        vec![
            Step::Fill {
                locator: Self::email_input(),
                value: email.to_string(),
            },
            Step::Fill {
                locator: Self::password_input(),
                value: password.to_string(),
            },
            Step::Click {
                locator: Self::submit_button(),
                timeout_ms: None,
            },
        ]
    }
}
