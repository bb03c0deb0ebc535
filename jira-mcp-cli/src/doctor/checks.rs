//! Check implementations for the doctor module

use super::types::*;
use crate::logging::log_directory;
use jira_mcp::config::ENV_PREFIX;
use jira_mcp::{JiraClient, JiraConfig, JiraError};
use std::env;
use std::path::{Path, PathBuf};

/// Check names constants to avoid typos
pub mod check_names {
    pub const IN_PATH: &str = "jira-mcp in PATH";
    pub const LOG_DIRECTORY: &str = "Log directory";
    pub const CONFIGURATION: &str = "Jira configuration";
    pub const CONNECTIVITY: &str = "Jira connectivity";
}

/// Variables that must be set before the server can start
pub const REQUIRED_VARIABLES: [&str; 3] = ["URL", "USERNAME", "API_TOKEN"];

const EXE_NAME: &str = "jira-mcp";

/// Check if jira-mcp is in PATH
pub fn check_in_path(checks: &mut Vec<Check>) {
    let path_var = env::var_os("PATH").unwrap_or_default();
    let found = find_in_paths(env::split_paths(&path_var), exe_file_name());

    let builder = match found {
        Some(path) => Check::new(check_names::IN_PATH, CheckCategory::System, CheckStatus::Ok)
            .with_message(format!("Found at: {path:?}")),
        None => Check::new(
            check_names::IN_PATH,
            CheckCategory::System,
            CheckStatus::Warning,
        )
        .with_message("jira-mcp not found in PATH")
        .with_fix("Add jira-mcp to your PATH or use the full path in your MCP host config"),
    };
    checks.push(builder.build());
}

fn exe_file_name() -> String {
    format!("{EXE_NAME}{}", env::consts::EXE_SUFFIX)
}

fn find_in_paths(paths: impl IntoIterator<Item = PathBuf>, exe: String) -> Option<PathBuf> {
    paths
        .into_iter()
        .map(|dir| dir.join(&exe))
        .find(|candidate| candidate.is_file())
}

/// Check that the server-mode log directory exists or can be created
pub fn check_log_directory(checks: &mut Vec<Check>) {
    checks.push(log_directory_check(&log_directory()));
}

fn log_directory_check(dir: &Path) -> Check {
    let name = check_names::LOG_DIRECTORY;
    if dir.is_dir() {
        let read_only = dir
            .metadata()
            .map(|meta| meta.permissions().readonly())
            .unwrap_or(false);
        if read_only {
            Check::new(name, CheckCategory::System, CheckStatus::Warning)
                .with_message(format!("{} is read-only", dir.display()))
                .with_fix(format!("Make {} writable", dir.display()))
                .build()
        } else {
            Check::new(name, CheckCategory::System, CheckStatus::Ok)
                .with_message(dir.display().to_string())
                .build()
        }
    } else if dir.exists() {
        Check::new(name, CheckCategory::System, CheckStatus::Error)
            .with_message(format!("{} exists but is not a directory", dir.display()))
            .with_fix(format!("Remove or rename {}", dir.display()))
            .build()
    } else {
        Check::new(name, CheckCategory::System, CheckStatus::Ok)
            .with_message(format!("{} will be created on first serve", dir.display()))
            .build()
    }
}

/// Check each required `JIRA_*` variable
pub fn check_environment<F>(checks: &mut Vec<Check>, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for suffix in REQUIRED_VARIABLES {
        let variable = format!("{ENV_PREFIX}_{suffix}");
        let value = lookup(&variable).filter(|v| !v.trim().is_empty());

        let check = match value {
            Some(value) => {
                let shown = if suffix == "API_TOKEN" {
                    format!("set ({} characters)", value.len())
                } else {
                    value
                };
                Check::new(&variable, CheckCategory::Configuration, CheckStatus::Ok)
                    .with_message(shown)
                    .build()
            }
            None => Check::new(&variable, CheckCategory::Configuration, CheckStatus::Error)
                .with_message("not set")
                .with_fix(fix_for(suffix))
                .build(),
        };
        checks.push(check);
    }
}

fn fix_for(suffix: &str) -> String {
    match suffix {
        "URL" => format!("export {ENV_PREFIX}_URL=https://your-site.atlassian.net"),
        "USERNAME" => format!("export {ENV_PREFIX}_USERNAME=you@example.com"),
        _ => format!(
            "Create an API token at https://id.atlassian.com/manage-profile/security/api-tokens \
             and export {ENV_PREFIX}_{suffix}"
        ),
    }
}

/// Load the full configuration, returning it when valid
pub fn check_configuration(checks: &mut Vec<Check>) -> Option<JiraConfig> {
    let name = check_names::CONFIGURATION;
    match JiraConfig::from_env() {
        Ok(config) => {
            checks.push(
                Check::new(name, CheckCategory::Configuration, CheckStatus::Ok)
                    .with_message(format!(
                        "{} as {} (timeout {}s)",
                        config.base_url(),
                        config.username(),
                        config.timeout().as_secs()
                    ))
                    .build(),
            );
            Some(config)
        }
        Err(e) => {
            checks.push(
                Check::new(name, CheckCategory::Configuration, CheckStatus::Error)
                    .with_message(e.to_string())
                    .with_fix("Fix the variables listed above and run doctor again")
                    .build(),
            );
            None
        }
    }
}

/// Ask the Jira site for its server info using the configured credentials
pub async fn check_connectivity(checks: &mut Vec<Check>, config: Option<&JiraConfig>) {
    let name = check_names::CONNECTIVITY;
    let Some(config) = config else {
        checks.push(
            Check::new(name, CheckCategory::Connectivity, CheckStatus::Warning)
                .with_message("Skipped, configuration is incomplete")
                .build(),
        );
        return;
    };

    let result = match JiraClient::new(config) {
        Ok(client) => client.server_info().await,
        Err(e) => Err(e),
    };

    let check = match result {
        Ok(info) => {
            let title = info.server_title.as_deref().unwrap_or("Jira");
            let version = info.version.as_deref().unwrap_or("unknown version");
            Check::new(name, CheckCategory::Connectivity, CheckStatus::Ok)
                .with_message(format!("Connected to {title} ({version})"))
                .build()
        }
        Err(e @ JiraError::Unauthorized { .. }) => {
            Check::new(name, CheckCategory::Connectivity, CheckStatus::Error)
                .with_message(e.to_string())
                .with_fix("Check JIRA_USERNAME and JIRA_API_TOKEN")
                .build()
        }
        Err(e) if e.is_timeout() => {
            Check::new(name, CheckCategory::Connectivity, CheckStatus::Error)
                .with_message(format!("Timed out after {}s", config.timeout().as_secs()))
                .with_fix("Raise JIRA_TIMEOUT_SECS or check your network")
                .build()
        }
        Err(e) => Check::new(name, CheckCategory::Connectivity, CheckStatus::Error)
            .with_message(e.to_string())
            .with_fix(format!("Check that {} is reachable", config.base_url()))
            .build(),
    };
    checks.push(check);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_check_environment_all_present() {
        let mut checks = Vec::new();
        check_environment(
            &mut checks,
            lookup(&[
                ("JIRA_URL", "https://example.atlassian.net"),
                ("JIRA_USERNAME", "dev@example.com"),
                ("JIRA_API_TOKEN", "secret-token"),
            ]),
        );

        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.status == CheckStatus::Ok));
        assert_eq!(checks[2].message, "set (12 characters)");
        assert!(!checks.iter().any(|c| c.message.contains("secret-token")));
    }

    #[test]
    fn test_check_environment_blank_counts_as_missing() {
        let mut checks = Vec::new();
        check_environment(
            &mut checks,
            lookup(&[("JIRA_URL", "https://example.atlassian.net"), ("JIRA_USERNAME", "  ")]),
        );

        let failing: Vec<_> = checks
            .iter()
            .filter(|c| c.status == CheckStatus::Error)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(failing, ["JIRA_USERNAME", "JIRA_API_TOKEN"]);
        assert!(checks[1].fix.as_deref().unwrap().contains("JIRA_USERNAME"));
    }

    #[test]
    fn test_find_in_paths() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join(exe_file_name());
        fs::write(&exe, b"").unwrap();

        let found = find_in_paths(
            vec![PathBuf::from("/definitely/not/here"), dir.path().to_path_buf()],
            exe_file_name(),
        );

        assert_eq!(found, Some(exe));
    }

    #[test]
    fn test_log_directory_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join(".jira-mcp");
        fs::write(&file, b"").unwrap();

        let check = log_directory_check(&file);

        assert_eq!(check.status, CheckStatus::Error);
        assert_eq!(check.category, CheckCategory::System);
    }

    #[test]
    fn test_log_directory_missing_is_ok() {
        let check = log_directory_check(Path::new("/definitely/not/here/.jira-mcp"));
        assert_eq!(check.status, CheckStatus::Ok);
        assert!(check.message.ends_with("will be created on first serve"));
    }

    #[tokio::test]
    async fn test_connectivity_skipped_without_config() {
        let mut checks = Vec::new();
        check_connectivity(&mut checks, None).await;

        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, CheckStatus::Warning);
        assert_eq!(checks[0].category, CheckCategory::Connectivity);
    }

    #[tokio::test]
    async fn test_connectivity_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = JiraConfig::new(&format!("http://127.0.0.1:{port}"), "dev", "token").unwrap();
        let mut checks = Vec::new();
        check_connectivity(&mut checks, Some(&config)).await;

        assert_eq!(checks[0].status, CheckStatus::Error);
        assert!(checks[0].fix.as_deref().unwrap().contains("reachable"));
    }
}
