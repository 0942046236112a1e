use crate::nft::{MintData, PackInfo};
use commons::{NftId, PackId};
use concordium_std::*;

#[derive(Debug, Serialize, SchemaType)]
pub struct NewGroupParams {
    pub group_id: String,
    pub metadata: MintData,
}

/// Where NFTs handed out by a platform operation end up.
#[derive(Debug, Serialize, SchemaType)]
pub enum NftDestination {
    /// Staged under a group id that was never used before.
    NewGroup(NewGroupParams),
    /// Appended to a staged group.
    ExistingGroup(String),
    Catalog,
    /// Deposited into the collection of an address.
    Collection(Address),
    Burn,
}

/// Where the NFTs of a new pack come from.
#[derive(Debug, Serialize, SchemaType)]
pub enum NftSource {
    Mint(Vec<MintData>),
    /// Entire stock of the listed staged groups.
    Pick(Vec<String>),
}

impl NftSource {
    /// Number of entries the source lists.
    pub fn len(&self) -> usize {
        match self {
            NftSource::Mint(data) => data.len(),
            NftSource::Pick(group_ids) => group_ids.len(),
        }
    }
}

/// What happens to an asset taken out of a container.
#[derive(Debug, Serialize, SchemaType)]
pub enum Disposal {
    Transfer(Address),
    Burn,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct MintNftParams {
    pub data: MintData,
    pub destination: NftDestination,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct BulkMintNftsParams {
    pub nfts: Vec<MintData>,
    pub destination: NftDestination,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct PickNftsParams {
    pub group_ids: Vec<String>,
    pub destination: NftDestination,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct WithdrawGroupParams {
    pub group_id: String,
    pub destination: NftDestination,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct CreatePackParams {
    pub source: NftSource,
    pub pack: PackInfo,
    /// Address whose collection receives the pack.
    pub recipient: Address,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct ReleaseGrouping {
    pub pack_uuid: String,
    pub source: NftSource,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct CreateReleaseParams {
    pub id: String,
    pub groupings: Vec<ReleaseGrouping>,
    pub pack: PackInfo,
    pub price: Amount,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct CatalogNftParams {
    pub id: NftId,
    pub destination: NftDestination,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct WithdrawReleaseParams {
    pub id: String,
    pub disposal: Disposal,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct WithdrawPackFromReleaseParams {
    pub release_id: String,
    /// Grouping key of the pack. Without it the first remaining pack is taken.
    pub pack_uuid: Option<String>,
    pub disposal: Disposal,
}

/// Asset of the sender's own collection.
#[derive(Debug, Serialize, SchemaType)]
pub struct WithdrawAssetParams {
    pub id: u64,
    pub disposal: Disposal,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct OwnedNftParams {
    pub owner: Address,
    pub id: NftId,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct OwnedPackParams {
    pub owner: Address,
    pub id: PackId,
}
