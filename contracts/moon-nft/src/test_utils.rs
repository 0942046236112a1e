use crate::nft::{MintData, PackInfo};
use concordium_std::{collections::HashMap as Map, *};

pub(crate) fn mint_data(creator: &str, creator_id: u32) -> MintData {
    let mut metadata = Map::default();
    metadata.insert("edition".to_string(), "first".to_string());
    MintData {
        media_url: "url".to_string(),
        creator: creator.to_string(),
        creator_id,
        metadata,
    }
}

pub(crate) fn pack_info(creator: &str, creator_id: u32) -> PackInfo {
    PackInfo {
        preview_url: "preview".to_string(),
        title: "Pack".to_string(),
        creator: creator.to_string(),
        creator_id,
    }
}

/// Number of logged events carrying `tag`.
pub(crate) fn count_events(logs: &[Vec<u8>], tag: u8) -> usize {
    logs.iter().filter(|log| log.first() == Some(&tag)).count()
}
