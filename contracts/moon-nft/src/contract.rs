use crate::external::*;
use crate::state::State;
use commons::{AuthorityUpdateParams, AuthorityViewParams, ContractResult, PackId};
use concordium_std::*;

/// Initialize the contract with empty containers. The sender becomes the only
/// admin.
#[init(contract = "MoonNFT")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    // Construct the initial contract state.
    let state = State::new(state_builder, ctx.init_origin());
    Ok(state)
}

/// Mint one NFT and hand it to the destination.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have maintainer rights;
/// - The mint data is invalid;
/// - The destination does not accept the NFT;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "mintNft",
    parameter = "MintNftParams",
    enable_logger
)]
fn mint_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: MintNftParams = ctx.parameter_cursor().get()?;
    let (state, state_builder) = host.state_and_builder();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.mint_nft(params, state_builder, logger)
}

/// Mint a list of NFTs and hand them to the destination. Nothing is minted
/// unless every element is valid.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have maintainer rights;
/// - The list is empty or any element is invalid;
/// - The destination does not accept the NFTs;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "bulkMintNfts",
    parameter = "BulkMintNftsParams",
    enable_logger
)]
fn bulk_mint_nfts<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: BulkMintNftsParams = ctx.parameter_cursor().get()?;
    let (state, state_builder) = host.state_and_builder();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.bulk_mint_nfts(params, state_builder, logger)
}

/// Take the entire stock of the listed groups.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have maintainer rights;
/// - The list is empty;
/// - A group was never deposited, is used up or is listed twice;
/// - The destination does not accept the NFTs;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "pickNfts",
    parameter = "PickNftsParams",
    enable_logger
)]
fn pick_nfts<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: PickNftsParams = ctx.parameter_cursor().get()?;
    let (state, state_builder) = host.state_and_builder();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.pick_nfts(params, state_builder, logger)
}

#[receive(
    mutable,
    contract = "MoonNFT",
    name = "withdrawAllNftsForGroup",
    parameter = "WithdrawGroupParams",
    enable_logger
)]
fn withdraw_all_nfts_for_group<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: WithdrawGroupParams = ctx.parameter_cursor().get()?;
    let (state, state_builder) = host.state_and_builder();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.withdraw_all_nfts_for_group(params, state_builder, logger)
}

/// Build a pack from minted or picked NFTs and deposit it into the
/// recipient's collection. Returns the id of the pack.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have maintainer rights;
/// - The source is empty or cannot be drained;
/// - The pack would hold more than `MAX_NFTS_PER_PACK` NFTs;
/// - The pack info is invalid;
/// - The recipient has no collection;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "createNftPack",
    parameter = "CreatePackParams",
    return_value = "PackId",
    enable_logger
)]
fn create_nft_pack<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<PackId> {
    let params: CreatePackParams = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.create_nft_pack(params, logger)
}

/// Build a release and list it in the catalog.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have maintainer rights;
/// - The id, a grouping key or the pack info is invalid;
/// - There are no groupings, or a grouping lists nothing;
/// - A grouping key repeats or the release id is listed already;
/// - A source cannot be drained or yields more than `MAX_NFTS_PER_PACK` NFTs;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "createNftPackRelease",
    parameter = "CreateReleaseParams",
    enable_logger
)]
fn create_nft_pack_release<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: CreateReleaseParams = ctx.parameter_cursor().get()?;
    let (state, state_builder) = host.state_and_builder();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.create_nft_pack_release(params, state_builder, logger)
}

/// Same as `createNftPackRelease` for a list of releases, all or none.
///
/// Note: every pack and release logs an event, so a call is bounded by the
/// number of logs a contract function may produce.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "bulkCreateNftPackReleases",
    parameter = "Vec<CreateReleaseParams>",
    enable_logger
)]
fn bulk_create_nft_pack_releases<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: Vec<CreateReleaseParams> = ctx.parameter_cursor().get()?;
    let (state, state_builder) = host.state_and_builder();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.bulk_create_nft_pack_releases(params, state_builder, logger)
}

#[receive(
    mutable,
    contract = "MoonNFT",
    name = "withdrawNftFromCatalog",
    parameter = "CatalogNftParams",
    enable_logger
)]
fn withdraw_nft_from_catalog<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: CatalogNftParams = ctx.parameter_cursor().get()?;
    let (state, state_builder) = host.state_and_builder();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.withdraw_nft_from_catalog(params, state_builder, logger)
}

/// Take a release off sale with all of its remaining packs.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have maintainer rights;
/// - The release is not listed;
/// - The transfer target has no collection;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "withdrawRelease",
    parameter = "WithdrawReleaseParams",
    enable_logger
)]
fn withdraw_release<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: WithdrawReleaseParams = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.withdraw_release(params, logger)
}

/// Take one pack out of a listed release.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender does not have maintainer rights;
/// - The release is not listed;
/// - The given grouping key has no pack left, or no key was given and the
///   release is used up;
/// - The transfer target has no collection;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "withdrawPackFromWithinRelease",
    parameter = "WithdrawPackFromReleaseParams",
    enable_logger
)]
fn withdraw_pack_from_within_release<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: WithdrawPackFromReleaseParams = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    state.authority.ensure_maintainer(&ctx.sender())?;

    state.withdraw_pack_from_within_release(params, logger)
}

/// Install an empty collection for the sender. Calling it again is a no-op.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "createEmptyCollection",
    enable_logger
)]
fn create_empty_collection<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let (state, state_builder) = host.state_and_builder();
    state.create_empty_collection(ctx.sender(), state_builder, logger)
}

/// Move an NFT out of the sender's collection.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - The sender or the transfer target has no collection;
/// - The NFT is not in the sender's collection;
/// - Fails to log an event.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "withdrawNft",
    parameter = "WithdrawAssetParams",
    enable_logger
)]
fn withdraw_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: WithdrawAssetParams = ctx.parameter_cursor().get()?;
    host.state_mut().withdraw_nft(ctx.sender(), params, logger)
}

/// Move a pack out of the sender's collection.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "withdrawPack",
    parameter = "WithdrawAssetParams",
    enable_logger
)]
fn withdraw_pack<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: WithdrawAssetParams = ctx.parameter_cursor().get()?;
    host.state_mut().withdraw_pack(ctx.sender(), params, logger)
}

/// Replace a pack of the sender's collection by the NFTs inside it.
#[receive(
    mutable,
    contract = "MoonNFT",
    name = "openPackAndDepositNfts",
    parameter = "PackId",
    enable_logger
)]
fn open_pack_and_deposit_nfts<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let pack_id: PackId = ctx.parameter_cursor().get()?;
    host.state_mut().open_pack(ctx.sender(), pack_id, logger)
}

#[receive(
    mutable,
    contract = "MoonNFT",
    name = "updateAuthority",
    parameter = "AuthorityUpdateParams"
)]
fn update_authority<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let params: AuthorityUpdateParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();
    host.state_mut().authority.handle_update(sender, params)
}

#[receive(
    contract = "MoonNFT",
    name = "viewAuthority",
    parameter = "AuthorityViewParams",
    return_value = "Vec<Address>"
)]
fn view_authority<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<Address>> {
    let params: AuthorityViewParams = ctx.parameter_cursor().get()?;
    Ok(host.state().authority.handle_view(params))
}

#[concordium_cfg_test]
pub(crate) mod tests {
    use super::*;
    use crate::admin::QueryMintedCollection;
    use crate::collection::MoonCollectionPublic;
    use crate::nft::{MintData, PackInfo, MAX_NFTS_PER_GROUP};
    use crate::seller::SellerCatalog;
    use crate::test_utils::*;
    use commons::*;
    use concordium_std::test_infrastructure::*;

    pub(crate) const ADMIN: AccountAddress = AccountAddress([1; 32]);
    pub(crate) const ALICE: AccountAddress = AccountAddress([2; 32]);
    pub(crate) const BOB: AccountAddress = AccountAddress([3; 32]);

    pub(crate) fn new_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ADMIN);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_MoonNFT");

        TestHost::new(state, state_builder)
    }

    pub(crate) fn receive_ctx(sender: AccountAddress, parameter: &[u8]) -> TestReceiveContext {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_parameter(parameter);
        ctx
    }

    fn install_collection(host: &mut TestHost<State<TestStateApi>>, owner: AccountAddress) {
        let mut logger = TestLogger::init();
        let result = create_empty_collection(&receive_ctx(owner, &[]), host, &mut logger);
        claim_eq!(result, Ok(()));
    }

    pub(crate) fn stage_group(
        host: &mut TestHost<State<TestStateApi>>,
        group_id: &str,
        data: MintData,
        count: usize,
    ) {
        let params = BulkMintNftsParams {
            nfts: vec![data.clone(); count],
            destination: NftDestination::NewGroup(NewGroupParams {
                group_id: group_id.to_string(),
                metadata: data,
            }),
        };
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result = bulk_mint_nfts(&receive_ctx(ADMIN, &bytes), host, &mut logger);
        claim_eq!(result, Ok(()));
    }

    fn release_params(id: &str, groupings: Vec<(&str, NftSource)>, pack: PackInfo) -> CreateReleaseParams {
        CreateReleaseParams {
            id: id.to_string(),
            groupings: groupings
                .into_iter()
                .map(|(pack_uuid, source)| ReleaseGrouping {
                    pack_uuid: pack_uuid.to_string(),
                    source,
                })
                .collect(),
            pack,
            price: Amount::from_ccd(20),
        }
    }

    #[concordium_test]
    fn test_init() {
        let host = new_host();
        let state = host.state();

        claim!(state.authority.has_admin_rights(&Address::Account(ADMIN)));
        claim!(!state.authority.has_maintainer_rights(&Address::Account(ALICE)));
        claim_eq!(state.minter.next_nft_id(), 1);
        claim_eq!(state.minter.next_pack_id(), 1);
        claim_eq!(state.seller.get_total_nft_count(), 0);
        claim_eq!(state.admin_collection.get_all_groups(), Vec::new());
    }

    #[concordium_test]
    fn test_platform_operations_need_maintainer() {
        let mut host = new_host();
        let mut logger = TestLogger::init();

        let params = MintNftParams {
            data: mint_data("alice", 1),
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        let result = mint_nft(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));

        let params = WithdrawReleaseParams {
            id: "R1".to_string(),
            disposal: Disposal::Burn,
        };
        let bytes = to_bytes(&params);
        let result = withdraw_release(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));

        // Maintainers get access once the admin adds them
        let params = AuthorityUpdateParams {
            field: AuthorityField::Maintainer,
            kind: AuthorityUpdateKind::Add,
            address: Address::Account(ALICE),
        };
        let bytes = to_bytes(&params);
        let result = update_authority(&receive_ctx(ALICE, &bytes), &mut host);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        let result = update_authority(&receive_ctx(ADMIN, &bytes), &mut host);
        claim_eq!(result, Ok(()));

        let params = MintNftParams {
            data: mint_data("alice", 1),
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        let result = mint_nft(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(logger.logs.len(), 2);

        let params = AuthorityViewParams {
            field: AuthorityField::Maintainer,
            skip: 0,
            show: 10,
        };
        let bytes = to_bytes(&params);
        let maintainers = view_authority(&receive_ctx(BOB, &bytes), &host)
            .expect_report("Viewing authority failed");
        claim_eq!(maintainers, vec![Address::Account(ALICE)]);
    }

    #[concordium_test]
    fn test_mint_scenario() {
        let mut host = new_host();

        let params = MintNftParams {
            data: mint_data("testCreator", 1),
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result = mint_nft(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(count_events(&logger.logs, MOON_NFT_MINTED_TAG), 1);
        claim_eq!(count_events(&logger.logs, CATALOG_NFT_DEPOSITED_TAG), 1);
        claim!(host.state().seller.nft_exists(1));

        let params = MintNftParams {
            data: mint_data("", 1),
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result = mint_nft(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));
        claim_eq!(count_events(&logger.logs, MOON_NFT_MINTED_TAG), 0);
        claim_eq!(host.state().minter.next_nft_id(), 2);
    }

    #[concordium_test]
    fn test_bulk_mint_mints_nothing_on_invalid_element() {
        let mut host = new_host();
        let mut logger = TestLogger::init();

        let params = BulkMintNftsParams {
            nfts: vec![mint_data("alice", 1), mint_data("alice", 0)],
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        let result = bulk_mint_nfts(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        claim_eq!(host.state().minter.next_nft_id(), 1);
        claim_eq!(host.state().seller.get_total_nft_count(), 0);
        claim_eq!(logger.logs.len(), 0);
    }

    #[concordium_test]
    fn test_mint_into_missing_collection() {
        let mut host = new_host();
        let mut logger = TestLogger::init();

        let params = MintNftParams {
            data: mint_data("alice", 1),
            destination: NftDestination::Collection(Address::Account(BOB)),
        };
        let bytes = to_bytes(&params);
        let result = mint_nft(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::CollectionNotInstalled.into()));
        claim_eq!(host.state().minter.next_nft_id(), 1);

        let params = WithdrawAssetParams {
            id: 1,
            disposal: Disposal::Burn,
        };
        let bytes = to_bytes(&params);
        let result = withdraw_nft(&receive_ctx(BOB, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::CollectionNotInstalled.into()));

        install_collection(&mut host, BOB);
        let params = MintNftParams {
            data: mint_data("alice", 1),
            destination: NftDestination::Collection(Address::Account(BOB)),
        };
        let bytes = to_bytes(&params);
        let result = mint_nft(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        let has_nft = host
            .state()
            .collection(&Address::Account(BOB))
            .map(|collection| collection.nft_id_exists(1));
        claim_eq!(has_nft, Ok(true));
    }

    #[concordium_test]
    fn test_create_empty_collection_is_idempotent() {
        let mut host = new_host();
        let mut logger = TestLogger::init();

        for _ in 0..2 {
            let result = create_empty_collection(&receive_ctx(ALICE, &[]), &mut host, &mut logger);
            claim_eq!(result, Ok(()));
        }

        claim!(host.state().has_collection(&Address::Account(ALICE)));
        claim!(!host.state().has_collection(&Address::Account(BOB)));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&crate::events::MoonNftEvent::CollectionCreated(
                crate::events::CollectionCreatedEvent {
                    owner: Address::Account(ALICE),
                }
            ))]
        );
    }

    #[concordium_test]
    fn test_release_scenario() {
        let mut host = new_host();
        install_collection(&mut host, ALICE);
        stage_group(&mut host, "G1", mint_data("alice", 1), 2);
        stage_group(&mut host, "G2", mint_data("alice", 1), 2);

        let params = release_params(
            "R1",
            vec![
                ("k1", NftSource::Pick(vec!["G1".to_string()])),
                ("k2", NftSource::Pick(vec!["G2".to_string()])),
            ],
            pack_info("alice", 1),
        );
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result = create_nft_pack_release(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(count_events(&logger.logs, MOON_NFT_PACK_CREATED_TAG), 2);
        claim_eq!(count_events(&logger.logs, MOON_NFT_PACK_RELEASE_CREATED_TAG), 1);
        claim_eq!(count_events(&logger.logs, RELEASE_DEPOSITED_TAG), 1);
        claim!(!host.state().admin_collection.group_id_exists(&"G1".to_string()));

        let release_id = "R1".to_string();
        claim_eq!(
            host.state()
                .seller
                .get_current_pack_ids_available_within_release(&release_id),
            Ok(vec!["k1".to_string(), "k2".to_string()])
        );

        let withdraw = |host: &mut TestHost<State<TestStateApi>>, pack_uuid: Option<&str>| {
            let params = WithdrawPackFromReleaseParams {
                release_id: "R1".to_string(),
                pack_uuid: pack_uuid.map(|key| key.to_string()),
                disposal: Disposal::Transfer(Address::Account(ALICE)),
            };
            let bytes = to_bytes(&params);
            let ctx = receive_ctx(ADMIN, &bytes);
            let mut logger = TestLogger::init();
            withdraw_pack_from_within_release(&ctx, host, &mut logger)
        };

        claim_eq!(withdraw(&mut host, Some("k1")), Ok(()));
        claim_eq!(
            host.state()
                .seller
                .get_current_pack_ids_available_within_release(&release_id),
            Ok(vec!["k2".to_string()])
        );
        claim_eq!(
            withdraw(&mut host, Some("k1")),
            Err(CustomContractError::NotFound.into())
        );

        claim_eq!(withdraw(&mut host, None), Ok(()));
        claim_eq!(
            host.state()
                .seller
                .get_current_pack_ids_available_within_release(&release_id),
            Ok(Vec::new())
        );
        claim_eq!(
            withdraw(&mut host, None),
            Err(CustomContractError::Exhausted.into())
        );

        let pack_ids = host
            .state()
            .collection(&Address::Account(ALICE))
            .map(|collection| collection.get_nft_pack_ids());
        claim_eq!(pack_ids, Ok(vec![1, 2]));
    }

    #[concordium_test]
    fn test_pick_same_group_twice_fails() {
        let mut host = new_host();
        stage_group(&mut host, "G1", mint_data("alice", 1), 2);
        let mut logger = TestLogger::init();

        let params = PickNftsParams {
            group_ids: vec!["G1".to_string(), "G1".to_string()],
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        let result = pick_nfts(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Exhausted.into()));
        claim!(host.state().admin_collection.group_id_exists(&"G1".to_string()));
        claim_eq!(logger.logs.len(), 0);

        let params = PickNftsParams {
            group_ids: vec!["G1".to_string()],
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        let result = pick_nfts(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().seller.get_total_nft_count(), 2);
        claim_eq!(count_events(&logger.logs, MOON_NFTS_PICKED_TAG), 1);
    }

    #[concordium_test]
    fn test_pick_group_into_itself_fails() {
        let mut host = new_host();
        stage_group(&mut host, "G1", mint_data("alice", 1), 2);
        let mut logger = TestLogger::init();

        let params = PickNftsParams {
            group_ids: vec!["G1".to_string()],
            destination: NftDestination::ExistingGroup("G1".to_string()),
        };
        let bytes = to_bytes(&params);
        let result = pick_nfts(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Exhausted.into()));
        claim_eq!(
            host.state()
                .admin_collection
                .get_group_info(&"G1".to_string())
                .map(|group| group.nft_ids),
            Ok(vec![1, 2])
        );
        claim_eq!(logger.logs.len(), 0);
    }

    #[concordium_test]
    fn test_groups_stay_withdrawable_at_the_size_cap() {
        let mut host = new_host();
        stage_group(&mut host, "G1", mint_data("alice", 1), 40);

        // Growing G1 to 80 NFTs is refused before anything is minted
        let params = BulkMintNftsParams {
            nfts: vec![mint_data("alice", 1); 40],
            destination: NftDestination::ExistingGroup("G1".to_string()),
        };
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result = bulk_mint_nfts(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::TooManyNfts.into()));
        claim_eq!(host.state().minter.next_nft_id(), 41);
        claim_eq!(logger.logs.len(), 0);

        let params = BulkMintNftsParams {
            nfts: vec![mint_data("alice", 1); MAX_NFTS_PER_GROUP - 40],
            destination: NftDestination::ExistingGroup("G1".to_string()),
        };
        let bytes = to_bytes(&params);
        let result = bulk_mint_nfts(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        // Merging picked groups into a new group is capped as well
        stage_group(&mut host, "G2", mint_data("bob", 2), 30);
        stage_group(&mut host, "G3", mint_data("bob", 2), 30);
        let params = PickNftsParams {
            group_ids: vec!["G2".to_string(), "G3".to_string()],
            destination: NftDestination::NewGroup(NewGroupParams {
                group_id: "G4".to_string(),
                metadata: mint_data("bob", 2),
            }),
        };
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result = pick_nfts(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::TooManyNfts.into()));
        claim!(host.state().admin_collection.group_id_exists(&"G2".to_string()));
        claim!(host.state().admin_collection.group_id_exists(&"G3".to_string()));

        // Packing both groups together would exceed the pack cap
        install_collection(&mut host, ALICE);
        let params = CreatePackParams {
            source: NftSource::Pick(vec!["G2".to_string(), "G3".to_string()]),
            pack: pack_info("bob", 2),
            recipient: Address::Account(ALICE),
        };
        let bytes = to_bytes(&params);
        let result = create_nft_pack(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::TooManyNfts.into()));
        claim_eq!(logger.logs.len(), 0);

        let params = WithdrawGroupParams {
            group_id: "G1".to_string(),
            destination: NftDestination::Burn,
        };
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result =
            withdraw_all_nfts_for_group(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(count_events(&logger.logs, MOON_NFTS_PICKED_TAG), 1);
        claim_eq!(count_events(&logger.logs, ASSETS_DESTROYED_TAG), 1);
        claim!(!host.state().admin_collection.group_id_exists(&"G1".to_string()));
    }

    #[concordium_test]
    fn test_open_pack_and_transfer() {
        let mut host = new_host();
        install_collection(&mut host, ALICE);
        install_collection(&mut host, BOB);
        let mut logger = TestLogger::init();

        let params = CreatePackParams {
            source: NftSource::Mint(vec![mint_data("alice", 1); 3]),
            pack: pack_info("alice", 1),
            recipient: Address::Account(ALICE),
        };
        let bytes = to_bytes(&params);
        let pack_id = create_nft_pack(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger)
            .expect_report("Pack creation failed");
        claim_eq!(pack_id, 1);

        let bytes = to_bytes(&pack_id);
        let result = open_pack_and_deposit_nfts(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        let alice = Address::Account(ALICE);
        claim_eq!(
            host.state().collection(&alice).map(|collection| collection.get_ids()),
            Ok(vec![1, 2, 3])
        );
        claim_eq!(
            host.state().collection(&alice).map(|collection| collection.pack_id_exists(1)),
            Ok(false)
        );

        // A pack opens once
        let result = open_pack_and_deposit_nfts(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));

        let params = WithdrawAssetParams {
            id: 2,
            disposal: Disposal::Transfer(Address::Account(BOB)),
        };
        let bytes = to_bytes(&params);
        let result = withdraw_nft(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        let result = withdraw_nft(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));
        claim_eq!(
            host.state()
                .collection(&Address::Account(BOB))
                .map(|collection| collection.get_ids()),
            Ok(vec![2])
        );

        let params = WithdrawAssetParams {
            id: 2,
            disposal: Disposal::Burn,
        };
        let bytes = to_bytes(&params);
        let mut logger = TestLogger::init();
        let result = withdraw_nft(&receive_ctx(BOB, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(count_events(&logger.logs, ASSETS_DESTROYED_TAG), 1);
        claim_eq!(
            host.state()
                .collection(&Address::Account(BOB))
                .map(|collection| collection.get_ids()),
            Ok(Vec::new())
        );
    }

    #[concordium_test]
    fn test_transfer_pack_between_collections() {
        let mut host = new_host();
        install_collection(&mut host, ALICE);
        let mut logger = TestLogger::init();

        let params = CreatePackParams {
            source: NftSource::Mint(vec![mint_data("alice", 1)]),
            pack: pack_info("alice", 1),
            recipient: Address::Account(ALICE),
        };
        let bytes = to_bytes(&params);
        let pack_id = create_nft_pack(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger)
            .expect_report("Pack creation failed");

        let params = WithdrawAssetParams {
            id: pack_id,
            disposal: Disposal::Transfer(Address::Account(BOB)),
        };
        let bytes = to_bytes(&params);
        let result = withdraw_pack(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::CollectionNotInstalled.into()));

        install_collection(&mut host, BOB);
        let result = withdraw_pack(&receive_ctx(ALICE, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state()
                .collection(&Address::Account(BOB))
                .map(|collection| collection.pack_id_exists(pack_id)),
            Ok(true)
        );
        claim_eq!(
            host.state()
                .collection(&Address::Account(ALICE))
                .map(|collection| collection.pack_id_exists(pack_id)),
            Ok(false)
        );
    }

    #[concordium_test]
    fn test_duplicate_release_id() {
        let mut host = new_host();
        let mut logger = TestLogger::init();

        let params = release_params(
            "R1",
            vec![("k1", NftSource::Mint(vec![mint_data("alice", 1)]))],
            pack_info("alice", 1),
        );
        let bytes = to_bytes(&params);
        let result = create_nft_pack_release(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let result = create_nft_pack_release(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::DuplicateId.into()));
        claim_eq!(host.state().minter.next_nft_id(), 2, "Nothing should be minted");
        claim_eq!(host.state().minter.next_pack_id(), 2);
    }

    #[concordium_test]
    fn test_bulk_create_releases() {
        let mut host = new_host();
        stage_group(&mut host, "G1", mint_data("alice", 1), 1);
        stage_group(&mut host, "G2", mint_data("bob", 2), 1);
        let mut logger = TestLogger::init();

        // G1 cannot feed two releases
        let params = vec![
            release_params(
                "R1",
                vec![("k1", NftSource::Pick(vec!["G1".to_string()]))],
                pack_info("alice", 1),
            ),
            release_params(
                "R2",
                vec![("k1", NftSource::Pick(vec!["G1".to_string(), "G2".to_string()]))],
                pack_info("bob", 2),
            ),
        ];
        let bytes = to_bytes(&params);
        let result =
            bulk_create_nft_pack_releases(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Exhausted.into()));
        claim!(host.state().admin_collection.group_id_exists(&"G1".to_string()));

        let params = vec![
            release_params(
                "R1",
                vec![("k1", NftSource::Pick(vec!["G1".to_string()]))],
                pack_info("alice", 1),
            ),
            release_params(
                "R2",
                vec![
                    ("k1", NftSource::Pick(vec!["G2".to_string()])),
                    ("k2", NftSource::Mint(vec![mint_data("bob", 2)])),
                ],
                pack_info("bob", 2),
            ),
        ];
        let bytes = to_bytes(&params);
        let result =
            bulk_create_nft_pack_releases(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().seller.get_total_pack_release_count(), 2);
        claim_eq!(
            host.state()
                .seller
                .get_pack_releases_by_creator_id(2)
                .map(|releases| releases[0].pack_uuids.clone()),
            Ok(vec!["k1".to_string(), "k2".to_string()])
        );

        let params: Vec<CreateReleaseParams> = Vec::new();
        let bytes = to_bytes(&params);
        let result =
            bulk_create_nft_pack_releases(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));
    }

    #[concordium_test]
    fn test_withdraw_release_to_collection() {
        let mut host = new_host();
        install_collection(&mut host, ALICE);
        let mut logger = TestLogger::init();

        let params = release_params(
            "R1",
            vec![
                ("k1", NftSource::Mint(vec![mint_data("alice", 1)])),
                ("k2", NftSource::Mint(vec![mint_data("alice", 1)])),
            ],
            pack_info("alice", 1),
        );
        let bytes = to_bytes(&params);
        let result = create_nft_pack_release(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let params = WithdrawReleaseParams {
            id: "R1".to_string(),
            disposal: Disposal::Transfer(Address::Account(ALICE)),
        };
        let bytes = to_bytes(&params);
        let result = withdraw_release(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(!host.state().seller.pack_release_exists(&"R1".to_string()));
        claim_eq!(
            host.state()
                .collection(&Address::Account(ALICE))
                .map(|collection| collection.get_nft_pack_ids()),
            Ok(vec![1, 2])
        );

        let result = withdraw_release(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));
    }

    #[concordium_test]
    fn test_withdraw_group_then_burn() {
        let mut host = new_host();
        stage_group(&mut host, "G1", mint_data("alice", 1), 2);
        let mut logger = TestLogger::init();

        let params = WithdrawGroupParams {
            group_id: "G1".to_string(),
            destination: NftDestination::Burn,
        };
        let bytes = to_bytes(&params);
        let result =
            withdraw_all_nfts_for_group(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![
                to_bytes(&crate::events::MoonNftEvent::NftsPicked(
                    crate::events::MoonNftsPickedEvent {
                        nft_ids: vec![1, 2],
                    }
                )),
                to_bytes(&crate::events::MoonNftEvent::AssetsDestroyed(
                    crate::events::AssetsDestroyedEvent {
                        nft_ids: vec![1, 2],
                        pack_ids: Vec::new(),
                    }
                )),
            ]
        );

        let result =
            withdraw_all_nfts_for_group(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Exhausted.into()));

        let params = MintNftParams {
            data: mint_data("alice", 1),
            destination: NftDestination::NewGroup(NewGroupParams {
                group_id: "G1".to_string(),
                metadata: mint_data("alice", 1),
            }),
        };
        let bytes = to_bytes(&params);
        let result = mint_nft(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::DuplicateGroup.into()));
    }

    #[concordium_test]
    fn test_catalog_nft_to_existing_group() {
        let mut host = new_host();
        stage_group(&mut host, "G1", mint_data("alice", 1), 1);
        let mut logger = TestLogger::init();

        let params = MintNftParams {
            data: mint_data("alice", 1),
            destination: NftDestination::Catalog,
        };
        let bytes = to_bytes(&params);
        claim_eq!(mint_nft(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger), Ok(()));

        let params = CatalogNftParams {
            id: 2,
            destination: NftDestination::ExistingGroup("G1".to_string()),
        };
        let bytes = to_bytes(&params);
        let result =
            withdraw_nft_from_catalog(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(!host.state().seller.nft_exists(2));
        claim_eq!(
            host.state()
                .admin_collection
                .get_group_info(&"G1".to_string())
                .map(|group| group.nft_ids),
            Ok(vec![1, 2])
        );

        let result =
            withdraw_nft_from_catalog(&receive_ctx(ADMIN, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));
    }
}
