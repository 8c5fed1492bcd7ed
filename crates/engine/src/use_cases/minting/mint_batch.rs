//! Batch minting over consecutive ids.

use std::sync::Arc;

use serde::Serialize;
use traitmint_domain::{CharacterId, CharacterMetadata};

use super::mint_character::{MintCharacter, MintError, MintFailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub start: CharacterId,
    pub count: u64,
    /// Seeds `base_seed`, `base_seed + 1`, ... are used across all attempts.
    pub base_seed: Option<u64>,
    /// Attempts per id when composition keeps hitting duplicate traits.
    pub max_attempts: u32,
}

impl BatchRequest {
    pub fn new(start: CharacterId, count: u64) -> Self {
        Self {
            start,
            count,
            base_seed: None,
            max_attempts: 10,
        }
    }

    pub fn with_base_seed(mut self, seed: Option<u64>) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub id: CharacterId,
    pub kind: MintFailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub minted: Vec<CharacterMetadata>,
    /// Ids that were already minted.
    pub duplicate_ids: Vec<CharacterId>,
    /// Ids that still hit duplicate traits after every attempt.
    pub exhausted: Vec<CharacterId>,
    pub failed: Vec<BatchFailure>,
    /// Requested ids that lie past the end of the id range.
    pub out_of_range: u64,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.duplicate_ids.is_empty()
            && self.exhausted.is_empty()
            && self.failed.is_empty()
            && self.out_of_range == 0
    }
}

pub struct MintBatch {
    mint: Arc<MintCharacter>,
}

impl MintBatch {
    pub fn new(mint: Arc<MintCharacter>) -> Self {
        Self { mint }
    }

    /// Mint `count` consecutive ids. Per-id failures are recorded and the
    /// batch moves on.
    pub async fn execute(&self, request: BatchRequest) -> BatchReport {
        let mut report = BatchReport::default();
        let mut next_seed = request.base_seed;
        let mut id = request.start;

        for index in 0..request.count {
            if index > 0 {
                match id.next() {
                    Some(next) => id = next,
                    None => {
                        report.out_of_range = request.count - index;
                        tracing::warn!(
                            last_id = %id,
                            out_of_range = report.out_of_range,
                            "Batch ran past the largest character id"
                        );
                        break;
                    }
                }
            }
            self.mint_one(id, request.max_attempts.max(1), &mut next_seed, &mut report)
                .await;
        }

        tracing::info!(
            minted = report.minted.len(),
            duplicate_ids = report.duplicate_ids.len(),
            exhausted = report.exhausted.len(),
            failed = report.failed.len(),
            out_of_range = report.out_of_range,
            "Batch finished"
        );
        report
    }

    async fn mint_one(
        &self,
        id: CharacterId,
        max_attempts: u32,
        next_seed: &mut Option<u64>,
        report: &mut BatchReport,
    ) {
        for attempt in 1..=max_attempts {
            let seed = *next_seed;
            *next_seed = seed.map(|s| s.wrapping_add(1));

            match self.mint.execute(id, seed).await {
                Ok(record) => {
                    report.minted.push(record);
                    return;
                }
                Err(MintError::DuplicateTraits { .. }) => {
                    tracing::debug!(character_id = %id, attempt, "Duplicate traits, recomposing");
                }
                Err(MintError::DuplicateId { .. }) => {
                    report.duplicate_ids.push(id);
                    return;
                }
                Err(e) => {
                    report.failed.push(BatchFailure {
                        id,
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                    return;
                }
            }
        }

        tracing::warn!(character_id = %id, max_attempts, "Gave up after repeated duplicate traits");
        report.exhausted.push(id);
    }
}
