//! Minting use cases.

mod attach_asset;
mod mint_batch;
mod mint_character;
mod preview;
mod random_source;
mod show_character;

use std::sync::Arc;

pub use attach_asset::{AttachAssetError, AttachAssetUrl};
pub use mint_batch::{BatchFailure, BatchReport, BatchRequest, MintBatch};
pub use mint_character::{MintCharacter, MintError, MintFailureKind, MintStage};
pub use preview::{CharacterPreview, PreviewCharacter};
pub use random_source::RandomSource;
pub use show_character::{CharacterView, ShowCharacter};

/// Container for minting use cases.
pub struct MintingUseCases {
    pub mint: Arc<MintCharacter>,
    pub batch: Arc<MintBatch>,
    pub preview: Arc<PreviewCharacter>,
    pub attach_asset: Arc<AttachAssetUrl>,
    pub show: Arc<ShowCharacter>,
}

impl MintingUseCases {
    pub fn new(
        mint: Arc<MintCharacter>,
        batch: Arc<MintBatch>,
        preview: Arc<PreviewCharacter>,
        attach_asset: Arc<AttachAssetUrl>,
        show: Arc<ShowCharacter>,
    ) -> Self {
        Self {
            mint,
            batch,
            preview,
            attach_asset,
            show,
        }
    }
}
