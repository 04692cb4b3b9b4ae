use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Basic auth pair shared by every request of a run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok { path: PathBuf },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceOutcome {
    pub identifier: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl InvoiceOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, OutcomeStatus::Ok { .. })
    }
}

/// Operator console line for one identifier.
impl fmt::Display for InvoiceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            OutcomeStatus::Ok { path } => {
                write!(f, "[OK] {} -> {}", self.identifier, path.display())
            }
            OutcomeStatus::Failed { error } => write!(f, "[FAIL] {}: {}", self.identifier, error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub ok: usize,
    pub failed: usize,
    pub outcomes: Vec<InvoiceOutcome>,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>, outcomes: Vec<InvoiceOutcome>) -> Self {
        let ok = outcomes.iter().filter(|o| o.is_ok()).count();
        Self {
            started_at,
            finished_at: Utc::now(),
            ok,
            failed: outcomes.len() - ok,
            outcomes,
        }
    }

    pub fn summary_line(&self) -> String {
        format!("Done. OK={}, FAIL={}", self.ok, self.failed)
    }

    pub fn failed_identifiers(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_ok())
            .map(|o| o.identifier.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_console_lines() {
        let ok = InvoiceOutcome {
            identifier: "A1".to_string(),
            status: OutcomeStatus::Ok {
                path: PathBuf::from("pdf").join("A1.pdf"),
            },
        };
        let failed = InvoiceOutcome {
            identifier: "A2".to_string(),
            status: OutcomeStatus::Failed {
                error: "HTTP 404: missing".to_string(),
            },
        };

        assert_eq!(
            ok.to_string(),
            format!("[OK] A1 -> {}", PathBuf::from("pdf").join("A1.pdf").display())
        );
        assert_eq!(failed.to_string(), "[FAIL] A2: HTTP 404: missing");
    }

    #[test]
    fn test_summary_counts_and_report_shape() {
        let outcomes = vec![
            InvoiceOutcome {
                identifier: "A1".to_string(),
                status: OutcomeStatus::Ok {
                    path: PathBuf::from("pdf/A1.pdf"),
                },
            },
            InvoiceOutcome {
                identifier: "A2".to_string(),
                status: OutcomeStatus::Failed {
                    error: "HTTP 404: missing".to_string(),
                },
            },
        ];

        let summary = RunSummary::new(Utc::now(), outcomes);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_identifiers(), vec!["A2"]);
        assert_eq!(summary.summary_line(), "Done. OK=1, FAIL=1");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "ok");
        assert_eq!(json["outcomes"][0]["path"], "pdf/A1.pdf");
        assert_eq!(json["outcomes"][1]["status"], "failed");
        assert_eq!(json["outcomes"][1]["error"], "HTTP 404: missing");
    }
}
