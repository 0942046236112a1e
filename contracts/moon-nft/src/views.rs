use crate::admin::*;
use crate::collection::*;
use crate::external::*;
use crate::nft::*;
use crate::seller::*;
use crate::state::State;
use commons::{ContractResult, CreatorId, NftId, PackId};
use concordium_std::*;

#[receive(
    contract = "MoonNFT",
    name = "hasCollection",
    parameter = "Address",
    return_value = "bool"
)]
fn has_collection<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let owner: Address = ctx.parameter_cursor().get()?;
    Ok(host.state().has_collection(&owner))
}

/// It rejects if:
/// - Fails to parse parameter;
/// - The owner has no collection.
#[receive(
    contract = "MoonNFT",
    name = "nftIdExists",
    parameter = "OwnedNftParams",
    return_value = "bool"
)]
fn nft_id_exists<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let params: OwnedNftParams = ctx.parameter_cursor().get()?;
    let exists = host.state().collection(&params.owner)?.nft_id_exists(params.id);
    Ok(exists)
}

#[receive(
    contract = "MoonNFT",
    name = "packIdExists",
    parameter = "OwnedPackParams",
    return_value = "bool"
)]
fn pack_id_exists<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let params: OwnedPackParams = ctx.parameter_cursor().get()?;
    let exists = host.state().collection(&params.owner)?.pack_id_exists(params.id);
    Ok(exists)
}

#[receive(
    contract = "MoonNFT",
    name = "getDataForAllNfts",
    parameter = "Address",
    return_value = "Vec<MoonNftData>"
)]
fn get_data_for_all_nfts<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftData>> {
    let owner: Address = ctx.parameter_cursor().get()?;
    let data = host.state().collection(&owner)?.get_data_for_all_nfts();
    Ok(data)
}

#[receive(
    contract = "MoonNFT",
    name = "getNftPackIds",
    parameter = "Address",
    return_value = "Vec<PackId>"
)]
fn get_nft_pack_ids<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<PackId>> {
    let owner: Address = ctx.parameter_cursor().get()?;
    let ids = host.state().collection(&owner)?.get_nft_pack_ids();
    Ok(ids)
}

#[receive(
    contract = "MoonNFT",
    name = "getNftPackData",
    parameter = "OwnedPackParams",
    return_value = "MoonNftPackData"
)]
fn get_nft_pack_data<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<MoonNftPackData> {
    let params: OwnedPackParams = ctx.parameter_cursor().get()?;
    let data = host.state().collection(&params.owner)?.get_nft_pack_data(params.id);
    data
}

#[receive(
    contract = "MoonNFT",
    name = "getDataForAllPacks",
    parameter = "Address",
    return_value = "Vec<MoonNftPackData>"
)]
fn get_data_for_all_packs<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftPackData>> {
    let owner: Address = ctx.parameter_cursor().get()?;
    let data = host.state().collection(&owner)?.get_data_for_all_packs();
    Ok(data)
}

#[receive(
    contract = "MoonNFT",
    name = "borrowMoonNft",
    parameter = "OwnedNftParams",
    return_value = "MoonNftData"
)]
fn borrow_moon_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<MoonNftData> {
    let params: OwnedNftParams = ctx.parameter_cursor().get()?;
    let data = host.state().collection(&params.owner)?.borrow_moon_nft(params.id);
    data
}

/// Ids of the NFTs held by an address.
#[receive(
    contract = "MoonNFT",
    name = "getIDs",
    parameter = "Address",
    return_value = "Vec<NftId>"
)]
fn get_ids<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<NftId>> {
    let owner: Address = ctx.parameter_cursor().get()?;
    let ids = host.state().collection(&owner)?.get_ids();
    Ok(ids)
}

/// Token id and metadata url of an NFT held by an address.
#[receive(
    contract = "MoonNFT",
    name = "borrowNFT",
    parameter = "OwnedNftParams",
    return_value = "GenericNftView"
)]
fn borrow_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<GenericNftView> {
    let params: OwnedNftParams = ctx.parameter_cursor().get()?;
    let view = host.state().collection(&params.owner)?.borrow_nft(params.id);
    view
}

#[receive(
    contract = "MoonNFT",
    name = "getAllGroups",
    return_value = "Vec<NftGroupData>"
)]
fn get_all_groups<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<NftGroupData>> {
    Ok(host.state().admin_collection.get_all_groups())
}

#[receive(
    contract = "MoonNFT",
    name = "getGroupInfo",
    parameter = "String",
    return_value = "NftGroupData"
)]
fn get_group_info<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<NftGroupData> {
    let group_id: String = ctx.parameter_cursor().get()?;
    host.state().admin_collection.get_group_info(&group_id)
}

/// Ids of every staged NFT.
#[receive(
    contract = "MoonNFT",
    name = "getAllNftIds",
    return_value = "Vec<NftId>"
)]
fn get_all_nft_ids<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<NftId>> {
    Ok(host.state().admin_collection.get_all_nft_ids())
}

#[receive(
    contract = "MoonNFT",
    name = "groupIdExists",
    parameter = "String",
    return_value = "bool"
)]
fn group_id_exists<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let group_id: String = ctx.parameter_cursor().get()?;
    Ok(host.state().admin_collection.group_id_exists(&group_id))
}

#[receive(
    contract = "MoonNFT",
    name = "getGroupInfoByCreator",
    parameter = "String",
    return_value = "Vec<NftGroupData>"
)]
fn get_group_info_by_creator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<NftGroupData>> {
    let creator: String = ctx.parameter_cursor().get()?;
    host.state().admin_collection.get_group_info_by_creator(&creator)
}

#[receive(
    contract = "MoonNFT",
    name = "getGroupInfoByCreatorId",
    parameter = "CreatorId",
    return_value = "Vec<NftGroupData>"
)]
fn get_group_info_by_creator_id<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<NftGroupData>> {
    let creator_id: CreatorId = ctx.parameter_cursor().get()?;
    host.state()
        .admin_collection
        .get_group_info_by_creator_id(creator_id)
}

#[receive(
    contract = "MoonNFT",
    name = "getDataForAllReleases",
    return_value = "Vec<MoonNftReleaseData>"
)]
fn get_data_for_all_releases<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftReleaseData>> {
    Ok(host.state().seller.get_data_for_all_releases())
}

#[receive(
    contract = "MoonNFT",
    name = "getTotalPackReleaseCount",
    return_value = "u64"
)]
fn get_total_pack_release_count<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    Ok(host.state().seller.get_total_pack_release_count())
}

#[receive(
    contract = "MoonNFT",
    name = "packReleaseExists",
    parameter = "String",
    return_value = "bool"
)]
fn pack_release_exists<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let id: String = ctx.parameter_cursor().get()?;
    Ok(host.state().seller.pack_release_exists(&id))
}

#[receive(
    contract = "MoonNFT",
    name = "getPackReleaseData",
    parameter = "String",
    return_value = "MoonNftReleaseData"
)]
fn get_pack_release_data<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<MoonNftReleaseData> {
    let id: String = ctx.parameter_cursor().get()?;
    host.state().seller.get_pack_release_data(&id)
}

#[receive(
    contract = "MoonNFT",
    name = "getNftData",
    parameter = "NftId",
    return_value = "MoonNftData"
)]
fn get_nft_data<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<MoonNftData> {
    let id: NftId = ctx.parameter_cursor().get()?;
    host.state().seller.get_nft_data(id)
}

/// Data of every NFT on sale. Collections are queried through
/// `getDataForAllNfts`.
#[receive(
    contract = "MoonNFT",
    name = "getDataForAllCatalogNfts",
    return_value = "Vec<MoonNftData>"
)]
fn get_data_for_all_catalog_nfts<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftData>> {
    Ok(host.state().seller.get_data_for_all_nfts())
}

#[receive(
    contract = "MoonNFT",
    name = "getTotalNFTCount",
    return_value = "u64"
)]
fn get_total_nft_count<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    Ok(host.state().seller.get_total_nft_count())
}

#[receive(
    contract = "MoonNFT",
    name = "nftExists",
    parameter = "NftId",
    return_value = "bool"
)]
fn nft_exists<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let id: NftId = ctx.parameter_cursor().get()?;
    Ok(host.state().seller.nft_exists(id))
}

#[receive(
    contract = "MoonNFT",
    name = "getNftsByCreatorId",
    parameter = "CreatorId",
    return_value = "Vec<MoonNftData>"
)]
fn get_nfts_by_creator_id<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftData>> {
    let creator_id: CreatorId = ctx.parameter_cursor().get()?;
    host.state().seller.get_nfts_by_creator_id(creator_id)
}

#[receive(
    contract = "MoonNFT",
    name = "getNftsByCreator",
    parameter = "String",
    return_value = "Vec<MoonNftData>"
)]
fn get_nfts_by_creator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftData>> {
    let creator: String = ctx.parameter_cursor().get()?;
    host.state().seller.get_nfts_by_creator(&creator)
}

#[receive(
    contract = "MoonNFT",
    name = "getPackReleasesByCreatorId",
    parameter = "CreatorId",
    return_value = "Vec<MoonNftReleaseData>"
)]
fn get_pack_releases_by_creator_id<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftReleaseData>> {
    let creator_id: CreatorId = ctx.parameter_cursor().get()?;
    host.state().seller.get_pack_releases_by_creator_id(creator_id)
}

#[receive(
    contract = "MoonNFT",
    name = "getPackReleasesByCreator",
    parameter = "String",
    return_value = "Vec<MoonNftReleaseData>"
)]
fn get_pack_releases_by_creator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<MoonNftReleaseData>> {
    let creator: String = ctx.parameter_cursor().get()?;
    host.state().seller.get_pack_releases_by_creator(&creator)
}

/// Grouping keys of a release that still hold a pack.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - The release is not listed.
#[receive(
    contract = "MoonNFT",
    name = "getCurrentPackIdsAvailableWithinRelease",
    parameter = "String",
    return_value = "Vec<String>"
)]
fn get_current_pack_ids_available_within_release<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<String>> {
    let id: String = ctx.parameter_cursor().get()?;
    host.state()
        .seller
        .get_current_pack_ids_available_within_release(&id)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::contract::tests::*;
    use crate::test_utils::*;
    use commons::*;
    use concordium_std::test_infrastructure::*;

    fn install_collection(host: &mut TestHost<State<TestStateApi>>, owner: AccountAddress) {
        let mut logger = TestLogger::init();
        let (state, state_builder) = host.state_and_builder();
        let result = state.create_empty_collection(Address::Account(owner), state_builder, &mut logger);
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_collection_views() {
        let mut host = new_host();
        let owner = Address::Account(ALICE);
        let bytes = to_bytes(&owner);

        claim_eq!(has_collection(&receive_ctx(BOB, &bytes), &host), Ok(false));
        claim_eq!(
            get_ids(&receive_ctx(BOB, &bytes), &host),
            Err(CustomContractError::CollectionNotInstalled.into())
        );

        install_collection(&mut host, ALICE);
        let mut logger = TestLogger::init();
        let (state, state_builder) = host.state_and_builder();
        let params = MintNftParams {
            data: mint_data("alice", 1),
            destination: NftDestination::Collection(owner),
        };
        claim_eq!(state.mint_nft(params, state_builder, &mut logger), Ok(()));

        claim_eq!(has_collection(&receive_ctx(BOB, &bytes), &host), Ok(true));
        claim_eq!(get_ids(&receive_ctx(BOB, &bytes), &host), Ok(vec![1]));
        claim_eq!(get_nft_pack_ids(&receive_ctx(BOB, &bytes), &host), Ok(Vec::new()));
        claim_eq!(get_data_for_all_packs(&receive_ctx(BOB, &bytes), &host), Ok(Vec::new()));
        claim_eq!(
            get_data_for_all_nfts(&receive_ctx(BOB, &bytes), &host).map(|data| data.len()),
            Ok(1)
        );

        let held = to_bytes(&OwnedNftParams { owner, id: 1 });
        let missing = to_bytes(&OwnedNftParams { owner, id: 2 });
        claim_eq!(nft_id_exists(&receive_ctx(BOB, &held), &host), Ok(true));
        claim_eq!(nft_id_exists(&receive_ctx(BOB, &missing), &host), Ok(false));
        claim_eq!(
            borrow_moon_nft(&receive_ctx(BOB, &held), &host).map(|nft| nft.creator_id),
            Ok(1)
        );
        claim_eq!(
            borrow_nft(&receive_ctx(BOB, &held), &host).map(|nft| nft.metadata_url.url),
            Ok("url".to_string())
        );
        claim_eq!(
            borrow_nft(&receive_ctx(BOB, &missing), &host).map(|nft| nft.token_id),
            Err(CustomContractError::NotFound.into())
        );

        let pack = to_bytes(&OwnedPackParams { owner, id: 1 });
        claim_eq!(pack_id_exists(&receive_ctx(BOB, &pack), &host), Ok(false));
        claim_eq!(
            get_nft_pack_data(&receive_ctx(BOB, &pack), &host),
            Err(CustomContractError::NotFound.into())
        );
    }

    #[concordium_test]
    fn test_group_views() {
        let mut host = new_host();
        stage_group(&mut host, "G1", mint_data("alice", 1), 2);
        stage_group(&mut host, "G2", mint_data("bob", 2), 1);

        let ctx = TestReceiveContext::empty();
        claim_eq!(
            get_all_groups(&ctx, &host).map(|groups| groups.len()),
            Ok(2)
        );
        claim_eq!(get_all_nft_ids(&ctx, &host), Ok(vec![1, 2, 3]));

        let bytes = to_bytes(&"G2".to_string());
        claim_eq!(group_id_exists(&receive_ctx(BOB, &bytes), &host), Ok(true));
        claim_eq!(
            get_group_info(&receive_ctx(BOB, &bytes), &host).map(|group| group.nft_ids),
            Ok(vec![3])
        );

        let bytes = to_bytes(&"bob".to_string());
        claim_eq!(
            get_group_info_by_creator(&receive_ctx(BOB, &bytes), &host)
                .map(|groups| groups[0].group_id.clone()),
            Ok("G2".to_string())
        );

        let bytes = to_bytes(&3u32);
        claim_eq!(
            get_group_info_by_creator_id(&receive_ctx(BOB, &bytes), &host),
            Err(CustomContractError::NotFound.into())
        );
    }

    #[concordium_test]
    fn test_catalog_views() {
        let mut host = new_host();
        let mut logger = TestLogger::init();
        let (state, state_builder) = host.state_and_builder();
        let params = BulkMintNftsParams {
            nfts: vec![mint_data("alice", 1), mint_data("bob", 2)],
            destination: NftDestination::Catalog,
        };
        claim_eq!(state.bulk_mint_nfts(params, state_builder, &mut logger), Ok(()));
        let params = CreateReleaseParams {
            id: "R1".to_string(),
            groupings: vec![ReleaseGrouping {
                pack_uuid: "k1".to_string(),
                source: NftSource::Mint(vec![mint_data("bob", 2)]),
            }],
            pack: pack_info("bob", 2),
            price: Amount::from_ccd(5),
        };
        claim_eq!(
            state.create_nft_pack_release(params, state_builder, &mut logger),
            Ok(())
        );

        let ctx = TestReceiveContext::empty();
        claim_eq!(get_total_nft_count(&ctx, &host), Ok(2));
        claim_eq!(get_total_pack_release_count(&ctx, &host), Ok(1));
        claim_eq!(
            get_data_for_all_catalog_nfts(&ctx, &host).map(|data| data.len()),
            Ok(2)
        );
        claim_eq!(
            get_data_for_all_releases(&ctx, &host).map(|data| data[0].price),
            Ok(Amount::from_ccd(5))
        );

        let bytes = to_bytes(&2u64);
        claim_eq!(nft_exists(&receive_ctx(BOB, &bytes), &host), Ok(true));
        claim_eq!(
            get_nft_data(&receive_ctx(BOB, &bytes), &host).map(|nft| nft.creator),
            Ok("bob".to_string())
        );

        let bytes = to_bytes(&2u32);
        claim_eq!(
            get_nfts_by_creator_id(&receive_ctx(BOB, &bytes), &host).map(|nfts| nfts[0].id),
            Ok(2)
        );
        claim_eq!(
            get_pack_releases_by_creator_id(&receive_ctx(BOB, &bytes), &host)
                .map(|releases| releases[0].id.clone()),
            Ok("R1".to_string())
        );

        let bytes = to_bytes(&"alice".to_string());
        claim_eq!(
            get_nfts_by_creator(&receive_ctx(BOB, &bytes), &host).map(|nfts| nfts[0].id),
            Ok(1)
        );
        claim_eq!(
            get_pack_releases_by_creator(&receive_ctx(BOB, &bytes), &host),
            Err(CustomContractError::NotFound.into())
        );

        let bytes = to_bytes(&"R1".to_string());
        claim_eq!(pack_release_exists(&receive_ctx(BOB, &bytes), &host), Ok(true));
        claim_eq!(
            get_pack_release_data(&receive_ctx(BOB, &bytes), &host).map(|data| data.pack_uuids),
            Ok(vec!["k1".to_string()])
        );
        claim_eq!(
            get_current_pack_ids_available_within_release(&receive_ctx(BOB, &bytes), &host),
            Ok(vec!["k1".to_string()])
        );

        let bytes = to_bytes(&"R2".to_string());
        claim_eq!(
            get_current_pack_ids_available_within_release(&receive_ctx(BOB, &bytes), &host),
            Err(CustomContractError::NotFound.into())
        );
    }
}
