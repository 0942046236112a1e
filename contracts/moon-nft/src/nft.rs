use commons::{ContractResult, CreatorId, CustomContractError, NftId, PackId};
use concordium_cis2::{MetadataUrl, TokenIdU64};
use concordium_std::{collections::HashMap as Map, *};

/// True for strings that are empty or only whitespace.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Most NFTs a staged group may hold. Leaving a group logs all of its ids in
/// one event.
pub const MAX_NFTS_PER_GROUP: usize = 50;

/// Most NFTs a pack may hold. Opening a pack logs all of its ids in one event.
pub const MAX_NFTS_PER_PACK: usize = 50;

/// Descriptive data of an NFT to be minted. Groups reuse it as their metadata.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct MintData {
    /// Location of the media file.
    pub media_url: String,
    /// Display name of the content creator.
    pub creator: String,
    /// Platform id of the content creator.
    pub creator_id: CreatorId,
    /// Free-form key/value attributes.
    pub metadata: Map<String, String>,
}

impl MintData {
    pub fn validate(&self) -> ContractResult<()> {
        ensure!(
            !is_blank(&self.media_url) && !is_blank(&self.creator) && self.creator_id > 0,
            CustomContractError::InvalidInput.into()
        );
        Ok(())
    }
}

/// Shared descriptive data of a pack, also used for a release.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct PackInfo {
    pub preview_url: String,
    pub title: String,
    pub creator: String,
    pub creator_id: CreatorId,
}

impl PackInfo {
    pub fn validate(&self) -> ContractResult<()> {
        ensure!(
            !is_blank(&self.preview_url)
                && !is_blank(&self.title)
                && !is_blank(&self.creator)
                && self.creator_id > 0,
            CustomContractError::InvalidInput.into()
        );
        Ok(())
    }
}

/// A minted NFT.
///
/// The value has no `Clone` and can only be built by the minter, so whoever
/// holds it is its one and only owner. Moving it into a container is a deposit.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MoonNft {
    id: NftId,
    data: MintData,
}

impl MoonNft {
    pub(crate) fn new(id: NftId, data: MintData) -> Self {
        Self { id, data }
    }

    pub fn id(&self) -> NftId {
        self.id
    }

    pub fn data(&self) -> &MintData {
        &self.data
    }

    /// Read-only snapshot for queries.
    pub fn view(&self) -> MoonNftData {
        MoonNftData {
            id: self.id,
            media_url: self.data.media_url.clone(),
            creator: self.data.creator.clone(),
            creator_id: self.data.creator_id,
            metadata: self.data.metadata.clone(),
        }
    }
}

/// Query result describing one NFT.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct MoonNftData {
    pub id: NftId,
    pub media_url: String,
    pub creator: String,
    pub creator_id: CreatorId,
    pub metadata: Map<String, String>,
}

/// Token-standard view of an NFT.
#[derive(Serialize, SchemaType)]
pub struct GenericNftView {
    pub token_id: TokenIdU64,
    pub metadata_url: MetadataUrl,
}

impl From<MoonNftData> for GenericNftView {
    fn from(data: MoonNftData) -> Self {
        Self {
            token_id: TokenIdU64(data.id),
            metadata_url: MetadataUrl {
                url: data.media_url,
                hash: None,
            },
        }
    }
}

/// A sealed bundle of NFTs. Opening it is the only way to get them back.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MoonNftPack {
    id: PackId,
    info: PackInfo,
    nfts: Vec<MoonNft>,
}

impl MoonNftPack {
    pub(crate) fn new(id: PackId, info: PackInfo, nfts: Vec<MoonNft>) -> Self {
        Self { id, info, nfts }
    }

    pub fn id(&self) -> PackId {
        self.id
    }

    pub fn nft_ids(&self) -> Vec<NftId> {
        self.nfts.iter().map(MoonNft::id).collect()
    }

    pub fn view(&self) -> MoonNftPackData {
        MoonNftPackData {
            id: self.id,
            collection_nft_ids: self.nft_ids(),
            info: self.info.clone(),
        }
    }

    /// Breaks the pack open.
    pub fn into_nfts(self) -> Vec<MoonNft> {
        self.nfts
    }
}

/// Query result describing one pack.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct MoonNftPackData {
    pub id: PackId,
    pub collection_nft_ids: Vec<NftId>,
    pub info: PackInfo,
}

/// A pack inside a release together with the grouping key it was built under.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReleasePack {
    pub pack_uuid: String,
    pub pack: MoonNftPack,
}

/// Packs offered together in one sale event.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MoonNftRelease {
    id: String,
    info: PackInfo,
    price: Amount,
    /// Every grouping key the release was created with.
    pack_uuids: Vec<String>,
    /// Packs not yet withdrawn, in creation order.
    packs: Vec<ReleasePack>,
}

impl MoonNftRelease {
    pub(crate) fn new(id: String, info: PackInfo, price: Amount, packs: Vec<ReleasePack>) -> Self {
        let pack_uuids = packs.iter().map(|entry| entry.pack_uuid.clone()).collect();
        Self {
            id,
            info,
            price,
            pack_uuids,
            packs,
        }
    }

    pub fn id(&self) -> &String {
        &self.id
    }

    pub fn info(&self) -> &PackInfo {
        &self.info
    }

    /// Grouping keys that still have a pack.
    pub fn available_pack_uuids(&self) -> Vec<String> {
        self.packs.iter().map(|entry| entry.pack_uuid.clone()).collect()
    }

    /// Removes the pack stored under `pack_uuid`, or the oldest remaining pack
    /// when no key is given.
    pub fn take_pack(&mut self, pack_uuid: Option<&str>) -> ContractResult<ReleasePack> {
        let position = match pack_uuid {
            Some(key) => self
                .packs
                .iter()
                .position(|entry| entry.pack_uuid == key)
                .ok_or(CustomContractError::NotFound)?,
            None => {
                ensure!(!self.packs.is_empty(), CustomContractError::Exhausted.into());
                0
            }
        };

        Ok(self.packs.remove(position))
    }

    pub fn view(&self) -> MoonNftReleaseData {
        MoonNftReleaseData {
            id: self.id.clone(),
            pack_uuids: self.pack_uuids.clone(),
            price: self.price,
            info: self.info.clone(),
        }
    }

    /// Dissolves the release into its remaining packs.
    pub fn into_packs(self) -> Vec<MoonNftPack> {
        self.packs.into_iter().map(|entry| entry.pack).collect()
    }
}

/// Query result describing one release.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct MoonNftReleaseData {
    pub id: String,
    pub pack_uuids: Vec<String>,
    pub price: Amount,
    pub info: PackInfo,
}
