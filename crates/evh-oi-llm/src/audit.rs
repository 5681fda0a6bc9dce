//! Audit logging for LLM calls.
//!
//! Entries hold a SHA-256 of the model output rather than the output itself.
//! The log is bounded; the oldest entry is dropped once it is full.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmOperation {
    AnalyzeDocument,
    ChatDocument,
}

impl LlmOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmOperation::AnalyzeDocument => "analyze_document",
            LlmOperation::ChatDocument    => "chat_document",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmAuditEntry {
    pub id: Uuid,
    pub operation: LlmOperation,
    pub model: String,
    pub backend: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub output_chars: usize,
    pub output_hash: String,
    pub latency_ms: u64,
    pub succeeded: bool,
    pub called_at: chrono::DateTime<Utc>,
}

impl LlmAuditEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        operation: LlmOperation,
        model: String,
        backend: String,
        prompt_tokens: u32,
        completion_tokens: u32,
        output: &str,
        latency_ms: u64,
        succeeded: bool,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(output.as_bytes());
        let output_hash = format!("{:x}", hasher.finalize());

        Self {
            id: Uuid::new_v4(),
            operation,
            model,
            backend,
            prompt_tokens,
            completion_tokens,
            output_chars: output.chars().count(),
            output_hash,
            latency_ms,
            succeeded,
            called_at: Utc::now(),
        }
    }
}

pub struct AuditLog {
    capacity: usize,
    entries: Mutex<VecDeque<LlmAuditEntry>>,
}

impl AuditLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn record(&self, entry: LlmAuditEntry) {
        tracing::debug!(
            operation = entry.operation.as_str(),
            model = %entry.model,
            latency_ms = entry.latency_ms,
            succeeded = entry.succeeded,
            "LLM call audited"
        );
        let mut entries = self.entries.lock().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Newest first.
    pub async fn recent(&self) -> Vec<LlmAuditEntry> {
        self.entries.lock().await.iter().rev().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(output: &str) -> LlmAuditEntry {
        LlmAuditEntry::new(
            LlmOperation::ChatDocument,
            "gpt-4o".to_string(),
            "openai".to_string(),
            0,
            0,
            output,
            5,
            true,
        )
    }

    #[test]
    fn test_output_is_hashed_not_stored() {
        let e = entry("abc");
        assert_eq!(
            e.output_hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(e.output_chars, 3);
    }

    #[tokio::test]
    async fn test_log_is_bounded_and_newest_first() {
        let log = AuditLog::new(2);
        log.record(entry("one")).await;
        log.record(entry("two")).await;
        log.record(entry("three")).await;
        assert_eq!(log.len().await, 2);
        let recent = log.recent().await;
        assert_eq!(recent[0].output_chars, 5);
        assert_eq!(recent[1].output_chars, 3);
    }
}
