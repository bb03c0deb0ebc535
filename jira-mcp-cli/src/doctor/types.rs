//! Type definitions for the doctor module

use std::fmt;

/// Status of a diagnostic check
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CheckStatus {
    /// Check passed without issues
    Ok,
    /// Check passed but with potential issues
    Warning,
    /// Check failed with errors
    Error,
}

impl CheckStatus {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CheckStatus::Ok => ExitCode::Success,
            CheckStatus::Warning => ExitCode::Warning,
            CheckStatus::Error => ExitCode::Error,
        }
    }
}

/// Section of the report a check is printed under
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CheckCategory {
    System,
    Configuration,
    Connectivity,
}

impl CheckCategory {
    pub const ALL: [CheckCategory; 3] = [
        CheckCategory::System,
        CheckCategory::Configuration,
        CheckCategory::Connectivity,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            CheckCategory::System => "System Checks:",
            CheckCategory::Configuration => "Configuration:",
            CheckCategory::Connectivity => "Connectivity:",
        }
    }
}

/// Exit codes for the doctor command, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExitCode {
    /// All checks passed
    Success = 0,
    /// Warnings detected
    Warning = 1,
    /// Errors detected
    Error = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Result of a single diagnostic check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Name of the check performed
    pub name: String,
    /// Report section
    pub category: CheckCategory,
    /// Status of the check (Ok, Warning, Error)
    pub status: CheckStatus,
    /// Descriptive message about the check result
    pub message: String,
    /// Optional fix suggestion for warnings or errors
    pub fix: Option<String>,
}

impl Check {
    /// Start building a check
    ///
    /// ```
    /// use jira_mcp_cli::doctor::{Check, CheckCategory, CheckStatus};
    ///
    /// let check = Check::new("JIRA_URL", CheckCategory::Configuration, CheckStatus::Ok)
    ///     .with_message("https://example.atlassian.net/")
    ///     .build();
    /// assert!(check.fix.is_none());
    /// ```
    pub fn new(
        name: impl Into<String>,
        category: CheckCategory,
        status: CheckStatus,
    ) -> CheckBuilder {
        CheckBuilder {
            name: name.into(),
            category,
            status,
            message: String::new(),
            fix: None,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.message)
    }
}

/// Builder for creating Check instances
pub struct CheckBuilder {
    name: String,
    category: CheckCategory,
    status: CheckStatus,
    message: String,
    fix: Option<String>,
}

impl CheckBuilder {
    /// Set the message for this check
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the fix suggestion for this check
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn build(self) -> Check {
        Check {
            name: self.name,
            category: self.category,
            status: self.status,
            message: self.message,
            fix: self.fix,
        }
    }
}

/// Count of checks by status
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CheckCounts {
    pub ok_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
}

impl CheckCounts {
    pub fn tally<'a>(checks: impl IntoIterator<Item = &'a Check>) -> Self {
        checks.into_iter().fold(Self::default(), |mut counts, check| {
            match check.status {
                CheckStatus::Ok => counts.ok_count += 1,
                CheckStatus::Warning => counts.warning_count += 1,
                CheckStatus::Error => counts.error_count += 1,
            }
            counts
        })
    }
}
