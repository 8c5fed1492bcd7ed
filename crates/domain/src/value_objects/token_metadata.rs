//! Marketplace-facing token metadata built from a minted character.

use serde::{Deserialize, Serialize};

use crate::entities::CharacterMetadata;

/// One `{trait_type, value}` attribute entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAttribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

/// Attribute values are either text or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
}

/// Token metadata document in the common NFT marketplace layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub attributes: Vec<TokenAttribute>,
}

impl TokenMetadata {
    pub fn from_character(record: &CharacterMetadata, collection_name: &str) -> Self {
        let mut attributes: Vec<TokenAttribute> = record
            .traits()
            .iter()
            .map(|(category, selected)| TokenAttribute {
                trait_type: category.to_string(),
                value: AttributeValue::Text(selected.name().to_string()),
            })
            .collect();

        if let Some(tier) = record.rarity_summary().highest() {
            attributes.push(TokenAttribute {
                trait_type: "Rarity".to_string(),
                value: AttributeValue::Text(tier.to_string()),
            });
        }
        attributes.push(TokenAttribute {
            trait_type: "Rarity Score".to_string(),
            value: AttributeValue::Number(record.rarity_score()),
        });

        Self {
            name: format!("{} #{}", collection_name, record.id()),
            description: format!("A unique character from the {} collection.", collection_name),
            image: record.asset_url().map(str::to_string),
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterPatch, CharacterTraits, SelectedTrait, TraitDescriptor};
    use crate::value_objects::RarityTier;
    use crate::CharacterId;

    #[test]
    fn builds_attributes_in_trait_order_with_rarity_last() {
        let traits = CharacterTraits::from_selections([
            ("HeadType", SelectedTrait::new(RarityTier::Common, TraitDescriptor::new("Cone Cap"))),
            ("CharacterColor", SelectedTrait::new(RarityTier::Epic, TraitDescriptor::new("Chrome"))),
        ]);
        let mut record = CharacterMetadata::new(CharacterId::new(21), traits, None);
        record.apply_patch(&CharacterPatch::asset_url("ipfs://image"));

        let token = TokenMetadata::from_character(&record, "Vertical");

        assert_eq!(token.name, "Vertical #21");
        assert_eq!(token.image.as_deref(), Some("ipfs://image"));
        let types: Vec<&str> = token.attributes.iter().map(|a| a.trait_type.as_str()).collect();
        assert_eq!(types, vec!["HeadType", "CharacterColor", "Rarity", "Rarity Score"]);
        assert_eq!(token.attributes[2].value, AttributeValue::Text("Epic".to_string()));
        assert_eq!(token.attributes[3].value, AttributeValue::Number(0.25));
    }

    #[test]
    fn degenerate_character_has_only_score_attribute() {
        let record = CharacterMetadata::new(CharacterId::new(1), CharacterTraits::default(), None);
        let token = TokenMetadata::from_character(&record, "Vertical");

        assert!(token.image.is_none());
        assert_eq!(token.attributes.len(), 1);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["attributes"][0]["value"], 0.0);
        assert!(json.get("image").is_none());
    }
}
