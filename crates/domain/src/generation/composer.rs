//! Character composition - one trait per catalog category.

use crate::entities::{CharacterTraits, SelectedTrait, TraitCatalog};
use crate::generation::TierSampler;

/// Composes characters from a catalog.
///
/// Randomness is injected as a `roll(bound)` closure returning a uniform value
/// in `[0, bound)`. Driving the closure from a single seeded source makes the
/// composed character a pure function of (catalog, weights, seed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterComposer {
    sampler: TierSampler,
}

impl CharacterComposer {
    pub fn new(sampler: TierSampler) -> Self {
        Self { sampler }
    }

    /// Walk the catalog in order, sampling a tier and then a uniformly chosen
    /// trait from that tier for every category.
    pub fn compose(
        &self,
        catalog: &TraitCatalog,
        roll: &mut impl FnMut(u64) -> u64,
    ) -> CharacterTraits {
        let mut selections = Vec::with_capacity(catalog.len());

        for (category, tiers) in catalog.categories() {
            let Some(tier) = self.sampler.sample(tiers, roll) else {
                continue;
            };
            let traits = tiers.traits(tier);
            let index = usize::try_from(roll(traits.len() as u64))
                .unwrap_or(usize::MAX)
                .min(traits.len() - 1);
            selections.push((category, SelectedTrait::new(tier, traits[index].clone())));
        }

        CharacterTraits::from_selections(selections)
    }
}
