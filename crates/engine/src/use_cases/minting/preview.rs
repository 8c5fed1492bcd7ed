//! Preview use case - compose and score without touching the store.

use std::sync::Arc;

use serde::Serialize;
use traitmint_domain::{CharacterComposer, CharacterTraits, RarityReport, TraitCatalog};

use super::random_source::RandomSource;
use crate::infrastructure::ports::RandomPort;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterPreview {
    /// Seed that reproduces this preview, drawn or caller-supplied.
    pub seed: u64,
    pub traits: CharacterTraits,
    pub rarity: RarityReport,
}

pub struct PreviewCharacter {
    catalog: Arc<TraitCatalog>,
    composer: CharacterComposer,
    random: Arc<dyn RandomPort>,
}

impl PreviewCharacter {
    pub fn new(
        catalog: Arc<TraitCatalog>,
        composer: CharacterComposer,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            catalog,
            composer,
            random,
        }
    }

    pub fn execute(&self, seed: Option<u64>) -> CharacterPreview {
        let mut source = RandomSource::seeded(seed.unwrap_or_else(|| self.random.next_seed()));
        let traits = self
            .composer
            .compose(&self.catalog, &mut |bound| source.below(bound));
        let rarity = traits.rarity();

        tracing::debug!(seed = source.seed(), rarity_score = rarity.score, "Character previewed");

        CharacterPreview {
            seed: source.seed(),
            traits,
            rarity,
        }
    }
}
