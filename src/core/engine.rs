use crate::domain::model::{InvoiceOutcome, OutcomeStatus, RunSummary};
use crate::domain::ports::{InvoiceApi, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use std::path::PathBuf;

pub struct FetchEngine<A: InvoiceApi, S: Storage> {
    api: A,
    storage: S,
}

impl<A: InvoiceApi, S: Storage> FetchEngine<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        Self { api, storage }
    }

    async fn download(&self, identifier: &str) -> Result<PathBuf> {
        let pdf = self.api.fetch_one(identifier).await?;
        self.storage.save(identifier, &pdf).await
    }

    /// Processes identifiers strictly in order. A failure is recorded
    /// against its identifier and never stops the batch.
    pub async fn run(&self, identifiers: &[String]) -> RunSummary {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(identifiers.len());

        tracing::info!("Fetching {} invoices", identifiers.len());

        for identifier in identifiers {
            // fetch and save; any error stays with this identifier
            let status = match self.download(identifier).await {
                Ok(path) => {
                    tracing::info!("Saved {} to {}", identifier, path.display());
                    OutcomeStatus::Ok { path }
                }
                Err(e) => {
                    tracing::warn!("Invoice {} failed: {}", identifier, e);
                    OutcomeStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            let outcome = InvoiceOutcome {
                identifier: identifier.clone(),
                status,
            };
            println!("{}", outcome);
            outcomes.push(outcome);
        }

        let summary = RunSummary::new(started_at, outcomes);
        tracing::info!("Batch finished: OK={}, FAIL={}", summary.ok, summary.failed);
        println!("\n{}", summary.summary_line());
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FetchError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockApi {
        responses: HashMap<String, Vec<u8>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl InvoiceApi for MockApi {
        async fn fetch_one(&self, identifier: &str) -> Result<Vec<u8>> {
            self.calls.lock().await.push(identifier.to_string());
            self.responses
                .get(identifier)
                .cloned()
                .ok_or_else(|| FetchError::HttpError {
                    status: 404,
                    snippet: "not found".to_string(),
                })
        }
    }

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail_on: Option<String>,
    }

    impl Storage for MockStorage {
        async fn save(&self, identifier: &str, data: &[u8]) -> Result<PathBuf> {
            if self.fail_on.as_deref() == Some(identifier) {
                return Err(FetchError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(identifier.to_string(), data.to_vec());
            Ok(PathBuf::from(format!("{}.pdf", identifier)))
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_batch() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let api = MockApi {
            responses: HashMap::from([
                ("A1".to_string(), b"%PDF-1".to_vec()),
                ("A3".to_string(), b"%PDF-3".to_vec()),
            ]),
            calls: calls.clone(),
        };
        let storage = MockStorage {
            files: Arc::new(Mutex::new(HashMap::new())),
            fail_on: None,
        };

        let engine = FetchEngine::new(api, storage.clone());
        let summary = engine.run(&ids(&["A1", "A2", "A3"])).await;

        assert_eq!(summary.ok, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failed_identifiers(), vec!["A2"]);
        assert_eq!(summary.summary_line(), "Done. OK=2, FAIL=1");
        assert_eq!(summary.outcomes[0].to_string(), "[OK] A1 -> A1.pdf");
        assert_eq!(summary.outcomes[1].to_string(), "[FAIL] A2: HTTP 404: not found");
        assert_eq!(*calls.lock().await, ids(&["A1", "A2", "A3"]));

        let files = storage.files.lock().await;
        assert_eq!(files.len(), 2);
        assert_eq!(files["A3"], b"%PDF-3".to_vec());
    }

    #[tokio::test]
    async fn test_storage_failure_is_recorded_per_identifier() {
        let api = MockApi {
            responses: HashMap::from([
                ("A1".to_string(), b"%PDF-1".to_vec()),
                ("A2".to_string(), b"%PDF-2".to_vec()),
            ]),
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        let storage = MockStorage {
            files: Arc::new(Mutex::new(HashMap::new())),
            fail_on: Some("A1".to_string()),
        };

        let summary = FetchEngine::new(api, storage).run(&ids(&["A1", "A2"])).await;

        assert_eq!(summary.ok, 1);
        match &summary.outcomes[0].status {
            OutcomeStatus::Failed { error } => assert!(error.contains("read-only")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(summary.outcomes[1].is_ok());
    }
}
