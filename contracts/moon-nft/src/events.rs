use commons::*;
use concordium_std::*;

/// An NFT got its id.
#[derive(Debug, Serialize, SchemaType)]
pub struct MoonNftMintedEvent {
    pub id: NftId,
    pub creator: String,
    pub creator_id: CreatorId,
}

/// A pack was sealed around the listed NFTs.
#[derive(Debug, Serialize, SchemaType)]
pub struct MoonNftPackCreatedEvent {
    pub id: PackId,
    pub collection_nft_ids: Vec<NftId>,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct MoonNftPackReleaseCreatedEvent {
    pub id: String,
    pub pack_uuids: Vec<String>,
    pub price: Amount,
}

/// Group created, or NFTs appended to it. Lists the NFTs added by the call.
#[derive(Debug, Serialize, SchemaType)]
pub struct NftGroupEvent {
    pub group_id: String,
    pub nft_ids: Vec<NftId>,
}

/// NFTs taken out of the admin collection.
#[derive(Debug, Serialize, SchemaType)]
pub struct MoonNftsPickedEvent {
    pub nft_ids: Vec<NftId>,
}

/// An NFT entered or left an account collection.
#[derive(Debug, Serialize, SchemaType)]
pub struct CollectionNftEvent {
    pub owner: Address,
    pub id: NftId,
}

/// A pack entered or left an account collection.
#[derive(Debug, Serialize, SchemaType)]
pub struct CollectionPackEvent {
    pub owner: Address,
    pub id: PackId,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct MoonNftPackOpenedEvent {
    pub owner: Address,
    pub pack_id: PackId,
    pub nft_ids: Vec<NftId>,
}

/// An NFT entered or left the catalog.
#[derive(Debug, Serialize, SchemaType)]
pub struct CatalogNftEvent {
    pub id: NftId,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct ReleaseDepositedEvent {
    pub id: String,
    pub pack_uuids: Vec<String>,
    pub price: Amount,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct ReleaseWithdrawnEvent {
    pub id: String,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct PackWithdrawnFromReleaseEvent {
    pub release_id: String,
    pub pack_uuid: String,
    pub pack_id: PackId,
}

/// Assets discarded for good.
#[derive(Debug, Serialize, SchemaType)]
pub struct AssetsDestroyedEvent {
    pub nft_ids: Vec<NftId>,
    pub pack_ids: Vec<PackId>,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct CollectionCreatedEvent {
    pub owner: Address,
}

/// Tagged event to be serialized for the event log.
#[derive(Debug)]
pub enum MoonNftEvent {
    Minted(MoonNftMintedEvent),
    PackCreated(MoonNftPackCreatedEvent),
    PackReleaseCreated(MoonNftPackReleaseCreatedEvent),
    GroupCreated(NftGroupEvent),
    GroupUpdated(NftGroupEvent),
    NftsPicked(MoonNftsPickedEvent),
    NftDeposit(CollectionNftEvent),
    NftPackDeposit(CollectionPackEvent),
    NftWithdrawn(CollectionNftEvent),
    NftPackWithdrawn(CollectionPackEvent),
    PackOpened(MoonNftPackOpenedEvent),
    CatalogNftDeposited(CatalogNftEvent),
    CatalogNftWithdrawn(CatalogNftEvent),
    ReleaseDeposited(ReleaseDepositedEvent),
    ReleaseWithdrawn(ReleaseWithdrawnEvent),
    PackWithdrawnFromRelease(PackWithdrawnFromReleaseEvent),
    AssetsDestroyed(AssetsDestroyedEvent),
    CollectionCreated(CollectionCreatedEvent),
}

impl Serial for MoonNftEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            MoonNftEvent::Minted(event) => {
                out.write_u8(MOON_NFT_MINTED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::PackCreated(event) => {
                out.write_u8(MOON_NFT_PACK_CREATED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::PackReleaseCreated(event) => {
                out.write_u8(MOON_NFT_PACK_RELEASE_CREATED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::GroupCreated(event) => {
                out.write_u8(NFT_GROUP_CREATED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::GroupUpdated(event) => {
                out.write_u8(NFT_GROUP_UPDATED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::NftsPicked(event) => {
                out.write_u8(MOON_NFTS_PICKED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::NftDeposit(event) => {
                out.write_u8(NFT_DEPOSIT_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::NftPackDeposit(event) => {
                out.write_u8(NFT_PACK_DEPOSIT_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::NftWithdrawn(event) => {
                out.write_u8(NFT_WITHDRAWN_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::NftPackWithdrawn(event) => {
                out.write_u8(NFT_PACK_WITHDRAWN_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::PackOpened(event) => {
                out.write_u8(MOON_NFT_PACK_OPENED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::CatalogNftDeposited(event) => {
                out.write_u8(CATALOG_NFT_DEPOSITED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::CatalogNftWithdrawn(event) => {
                out.write_u8(CATALOG_NFT_WITHDRAWN_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::ReleaseDeposited(event) => {
                out.write_u8(RELEASE_DEPOSITED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::ReleaseWithdrawn(event) => {
                out.write_u8(RELEASE_WITHDRAWN_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::PackWithdrawnFromRelease(event) => {
                out.write_u8(PACK_WITHDRAWN_FROM_RELEASE_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::AssetsDestroyed(event) => {
                out.write_u8(ASSETS_DESTROYED_TAG)?;
                event.serial(out)
            }
            MoonNftEvent::CollectionCreated(event) => {
                out.write_u8(COLLECTION_CREATED_TAG)?;
                event.serial(out)
            }
        }
    }
}
