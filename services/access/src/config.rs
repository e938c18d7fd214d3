use serde::Deserialize;

use securevisit_core::config::Config;

use crate::operator::{OperatorDirectory, OperatorRole};

/// Access service configuration loaded from environment variables.
///
/// Operator credentials: `ADMIN1_*` and `SECURITY_*` are required; `ADMIN2_*` and
/// `ADMIN3_*` are picked up when both username and password are set.
#[derive(Debug, Deserialize)]
pub struct AccessConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3120). Env var: `ACCESS_PORT`.
    #[serde(default = "default_access_port")]
    pub access_port: u16,
    /// Location used when an issue request leaves it out.
    pub access_default_location: Option<String>,

    pub admin1_username: String,
    pub admin1_password: String,
    #[serde(default = "default_admin1_display_name")]
    pub admin1_display_name: String,

    pub admin2_username: Option<String>,
    pub admin2_password: Option<String>,
    pub admin2_display_name: Option<String>,

    pub admin3_username: Option<String>,
    pub admin3_password: Option<String>,
    pub admin3_display_name: Option<String>,

    pub security_username: String,
    pub security_password: String,
}

impl Config for AccessConfig {}

fn default_access_port() -> u16 {
    3120
}

fn default_admin1_display_name() -> String {
    "Receptionist".to_owned()
}

impl AccessConfig {
    /// Build the operator directory the HTTP layer authenticates against.
    pub fn operators(&self) -> OperatorDirectory {
        let mut directory = OperatorDirectory::new().with_operator(
            &self.admin1_username,
            &self.admin1_password,
            &self.admin1_display_name,
            OperatorRole::Admin,
        );

        let extra_admins = [
            (
                2,
                &self.admin2_username,
                &self.admin2_password,
                &self.admin2_display_name,
            ),
            (
                3,
                &self.admin3_username,
                &self.admin3_password,
                &self.admin3_display_name,
            ),
        ];
        for (n, username, password, display_name) in extra_admins {
            if let (Some(username), Some(password)) = (username, password) {
                let display_name = display_name
                    .clone()
                    .unwrap_or_else(|| format!("Admin User {n}"));
                directory =
                    directory.with_operator(username, password, &display_name, OperatorRole::Admin);
            }
        }

        directory.with_operator(
            &self.security_username,
            &self.security_password,
            &self.security_username,
            OperatorRole::Security,
        )
    }
}
