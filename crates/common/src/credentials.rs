//! Role-to-credential bindings for the seeded Chumchon accounts
//!
//! Every scenario that authenticates resolves its role here before a
//! single browser step is produced. The registry is static for the life
//! of the test process; there is no refresh or reload path.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// A named class of application user with its own credentials and
/// landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    /// All roles the suite knows about.
    pub fn all() -> [Role; 3] {
        [Role::Superadmin, Role::Admin, Role::Member]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Credentials and navigation endpoints for one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCredential {
    /// Login email for the seeded account
    pub email: String,

    /// Login password for the seeded account
    pub password: String,

    /// Path of the login form this role uses
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Regex pattern the post-login URL must match
    pub redirect_to: String,
}

fn default_login_path() -> String {
    "/login".to_string()
}

/// Static mapping from role to credentials.
///
/// Seeded with the accounts the Chumchon staging backend is provisioned
/// with; a YAML file can override them per environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRegistry {
    roles: BTreeMap<Role, RoleCredential>,
}

impl Default for CredentialRegistry {
    fn default() -> Self {
        let mut roles = BTreeMap::new();
        roles.insert(
            Role::Superadmin,
            RoleCredential {
                email: "superadmin_1@example.com".to_string(),
                password: "hashedpw".to_string(),
                login_path: default_login_path(),
                redirect_to: "/super/communities/".to_string(),
            },
        );
        roles.insert(
            Role::Admin,
            RoleCredential {
                email: "admin_1@example.com".to_string(),
                password: "hashedpw".to_string(),
                login_path: default_login_path(),
                redirect_to: "/admin/community/own/".to_string(),
            },
        );
        roles.insert(
            Role::Member,
            RoleCredential {
                email: "member_1@example.com".to_string(),
                password: "hashedpw".to_string(),
                login_path: default_login_path(),
                redirect_to: "/member/home/".to_string(),
            },
        );
        Self { roles }
    }
}

impl CredentialRegistry {
    /// Build a registry from an explicit role map.
    pub fn from_roles(roles: BTreeMap<Role, RoleCredential>) -> Self {
        Self { roles }
    }

    /// Load a registry override from a YAML file.
    ///
    /// The file maps role names to credential records:
    ///
    /// ```yaml
    /// superadmin:
    ///   email: superadmin_1@example.com
    ///   password: hashedpw
    ///   redirect_to: /super/communities/
    /// ```
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::CredentialFile(format!("failed to read {}: {}", path.display(), e))
        })?;
        let roles: BTreeMap<Role, RoleCredential> = serde_yaml::from_str(&content)?;
        debug!(file = %path.display(), roles = roles.len(), "loaded credential registry");
        Ok(Self { roles })
    }

    /// Look up the credentials for a role.
    ///
    /// Fails with [`Error::UnknownRole`] when the role is absent and
    /// [`Error::MissingCredential`] when either credential field is
    /// empty. Never defaults, never recovers.
    pub fn lookup(&self, role: Role) -> Result<&RoleCredential> {
        let cred = self.roles.get(&role).ok_or(Error::UnknownRole(role))?;
        if cred.email.trim().is_empty() {
            return Err(Error::MissingCredential { role, field: "email" });
        }
        if cred.password.is_empty() {
            return Err(Error::MissingCredential {
                role,
                field: "password",
            });
        }
        Ok(cred)
    }

    /// Roles present in this registry.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Role::Superadmin, "/super/communities/")]
    #[test_case(Role::Admin, "/admin/community/own/")]
    #[test_case(Role::Member, "/member/home/")]
    fn seeded_roles_resolve(role: Role, redirect: &str) {
        let registry = CredentialRegistry::default();
        let cred = registry.lookup(role).unwrap();
        assert!(!cred.email.is_empty());
        assert!(!cred.password.is_empty());
        assert_eq!(cred.login_path, "/login");
        assert_eq!(cred.redirect_to, redirect);
    }

    #[test]
    fn absent_role_is_a_configuration_error() {
        let mut roles = BTreeMap::new();
        roles.insert(
            Role::Superadmin,
            RoleCredential {
                email: "superadmin_1@example.com".to_string(),
                password: "hashedpw".to_string(),
                login_path: "/login".to_string(),
                redirect_to: "/super/communities/".to_string(),
            },
        );
        let registry = CredentialRegistry::from_roles(roles);

        match registry.lookup(Role::Admin) {
            Err(Error::UnknownRole(role)) => assert_eq!(role, Role::Admin),
            other => panic!("expected UnknownRole, got {:?}", other),
        }
    }

    #[test_case("", "hashedpw", "email")]
    #[test_case("admin_1@example.com", "", "password")]
    fn empty_credential_field_is_a_configuration_error(email: &str, password: &str, field: &str) {
        let mut roles = BTreeMap::new();
        roles.insert(
            Role::Admin,
            RoleCredential {
                email: email.to_string(),
                password: password.to_string(),
                login_path: "/login".to_string(),
                redirect_to: "/admin/community/own/".to_string(),
            },
        );
        let registry = CredentialRegistry::from_roles(roles);

        match registry.lookup(Role::Admin) {
            Err(Error::MissingCredential { role, field: f }) => {
                assert_eq!(role, Role::Admin);
                assert_eq!(f, field);
            }
            other => panic!("expected MissingCredential, got {:?}", other),
        }
    }

    #[test]
    fn registry_loads_from_yaml_override() {
        let yaml = r#"
superadmin:
  email: root@staging.example.com
  password: s3cret
  redirect_to: /super/communities/
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.yaml");
        std::fs::write(&path, yaml).unwrap();

        let registry = CredentialRegistry::from_file(&path).unwrap();
        let cred = registry.lookup(Role::Superadmin).unwrap();
        assert_eq!(cred.email, "root@staging.example.com");
        // login_path falls back to the default when omitted
        assert_eq!(cred.login_path, "/login");
        assert!(registry.lookup(Role::Member).is_err());
    }
}
