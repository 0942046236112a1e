use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

/// Identifier of a minted NFT. Assigned by the minter, never reused.
pub type NftId = u64;

/// Identifier of a pack. Packs draw from their own counter.
pub type PackId = u64;

/// Numeric identifier of a content creator, always positive.
pub type CreatorId = u32;
