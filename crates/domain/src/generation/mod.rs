//! Character generation: weighted tier sampling and composition.

mod composer;
mod sampler;

pub use composer::CharacterComposer;
pub use sampler::TierSampler;
