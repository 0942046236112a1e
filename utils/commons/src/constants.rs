// Tags u8::MAX down to u8::MAX - 4 are reserved by CIS-2.

/// Tag for the MoonNftMinted event.
pub const MOON_NFT_MINTED_TAG: u8 = u8::MAX - 5;

/// Tag for the MoonNftPackCreated event.
pub const MOON_NFT_PACK_CREATED_TAG: u8 = u8::MAX - 6;

/// Tag for the MoonNftPackReleaseCreated event.
pub const MOON_NFT_PACK_RELEASE_CREATED_TAG: u8 = u8::MAX - 7;

/// Tag for the NftGroupCreated event of the admin collection.
pub const NFT_GROUP_CREATED_TAG: u8 = u8::MAX - 8;

/// Tag for the NftGroupUpdated event of the admin collection.
pub const NFT_GROUP_UPDATED_TAG: u8 = u8::MAX - 9;

/// Tag for the MoonNftsPicked event of the admin collection.
pub const MOON_NFTS_PICKED_TAG: u8 = u8::MAX - 10;

/// Tag for the collection NftDeposit event.
pub const NFT_DEPOSIT_TAG: u8 = u8::MAX - 11;

/// Tag for the collection NftPackDeposit event.
pub const NFT_PACK_DEPOSIT_TAG: u8 = u8::MAX - 12;

/// Tag for the collection NftWithdrawn event.
pub const NFT_WITHDRAWN_TAG: u8 = u8::MAX - 13;

/// Tag for the collection NftPackWithdrawn event.
pub const NFT_PACK_WITHDRAWN_TAG: u8 = u8::MAX - 14;

/// Tag for the collection MoonNftPackOpened event.
pub const MOON_NFT_PACK_OPENED_TAG: u8 = u8::MAX - 15;

/// Tag for the catalog NftDeposited event.
pub const CATALOG_NFT_DEPOSITED_TAG: u8 = u8::MAX - 16;

/// Tag for the catalog NftWithdrawn event.
pub const CATALOG_NFT_WITHDRAWN_TAG: u8 = u8::MAX - 17;

/// Tag for the catalog ReleaseDeposited event.
pub const RELEASE_DEPOSITED_TAG: u8 = u8::MAX - 18;

/// Tag for the catalog ReleaseWithdrawn event.
pub const RELEASE_WITHDRAWN_TAG: u8 = u8::MAX - 19;

/// Tag for the catalog PackWithdrawnFromRelease event.
pub const PACK_WITHDRAWN_FROM_RELEASE_TAG: u8 = u8::MAX - 20;

/// Tag for the AssetsDestroyed event.
pub const ASSETS_DESTROYED_TAG: u8 = u8::MAX - 21;

/// Tag for the CollectionCreated event.
pub const COLLECTION_CREATED_TAG: u8 = u8::MAX - 22;
