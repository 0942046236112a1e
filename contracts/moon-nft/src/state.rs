use crate::admin::*;
use crate::collection::*;
use crate::events::*;
use crate::external::*;
use crate::minter::{ensure_release_layout, NftMinter};
use crate::nft::*;
use crate::seller::*;
use commons::{Authority, ContractResult, CustomContractError, NftId, PackId};
use concordium_std::*;

/// The contract state.
///
/// Every asset lives in exactly one of the containers below. Operations check
/// their whole input first and only then move assets.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Addresses allowed to operate the platform inventory.
    pub authority: Authority<S>,
    pub minter: NftMinter,
    /// Staged groups of freshly minted NFTs.
    pub admin_collection: AdminMintedCollection<S>,
    /// NFTs and releases on sale.
    pub seller: SinglePlatformSeller<S>,
    /// Collections of accounts and contracts.
    pub collections: StateMap<Address, AssetCollection<S>, S>,
}

impl<S: HasStateApi> State<S> {
    pub fn new(state_builder: &mut StateBuilder<S>, origin: AccountAddress) -> Self {
        Self {
            authority: Authority::new(state_builder, Address::Account(origin)),
            minter: NftMinter::new(),
            admin_collection: AdminMintedCollection::empty(state_builder),
            seller: SinglePlatformSeller::empty(state_builder),
            collections: state_builder.new_map(),
        }
    }

    /// Installs an empty collection for `owner`. Does nothing if there is one.
    pub fn create_empty_collection(
        &mut self,
        owner: Address,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        if self.has_collection(&owner) {
            return Ok(());
        }

        self.collections
            .insert(owner, AssetCollection::empty(owner, state_builder));
        logger.log(&MoonNftEvent::CollectionCreated(CollectionCreatedEvent { owner }))?;

        Ok(())
    }

    pub fn has_collection(&self, owner: &Address) -> bool {
        self.collections.get(owner).is_some()
    }

    pub fn collection(&self, owner: &Address) -> ContractResult<StateRef<AssetCollection<S>>> {
        self.collections
            .get(owner)
            .ok_or_else(|| CustomContractError::CollectionNotInstalled.into())
    }

    fn collection_mut(
        &mut self,
        owner: &Address,
    ) -> ContractResult<StateRefMut<AssetCollection<S>, S>> {
        self.collections
            .get_mut(owner)
            .ok_or_else(|| CustomContractError::CollectionNotInstalled.into())
    }

    fn ensure_collection(&self, owner: &Address) -> ContractResult<()> {
        ensure!(
            self.has_collection(owner),
            CustomContractError::CollectionNotInstalled.into()
        );
        Ok(())
    }

    /// Checks that `destination` accepts `incoming` NFTs.
    fn ensure_nft_destination(
        &self,
        destination: &NftDestination,
        incoming: usize,
    ) -> ContractResult<()> {
        match destination {
            NftDestination::NewGroup(group) => {
                self.admin_collection
                    .ensure_new_group(&group.group_id, &group.metadata)?;
                ensure!(
                    incoming <= MAX_NFTS_PER_GROUP,
                    CustomContractError::TooManyNfts.into()
                );
                Ok(())
            }
            NftDestination::ExistingGroup(group_id) => {
                self.admin_collection.ensure_room(group_id, incoming)
            }
            NftDestination::Collection(owner) => self.ensure_collection(owner),
            NftDestination::Catalog | NftDestination::Burn => Ok(()),
        }
    }

    fn ensure_disposal(&self, disposal: &Disposal) -> ContractResult<()> {
        match disposal {
            Disposal::Transfer(owner) => self.ensure_collection(owner),
            Disposal::Burn => Ok(()),
        }
    }

    /// Checks that every source can be drained. Picks are checked across all
    /// sources, so a group listed twice fails `Exhausted`.
    fn ensure_sources<'a>(
        &self,
        sources: impl Iterator<Item = &'a NftSource>,
    ) -> ContractResult<()> {
        let mut picks: Vec<String> = Vec::new();
        for source in sources {
            match source {
                NftSource::Mint(data) => {
                    ensure!(!data.is_empty(), CustomContractError::EmptyInput.into());
                    for item in data.iter() {
                        item.validate()?;
                    }
                }
                NftSource::Pick(group_ids) => {
                    ensure!(!group_ids.is_empty(), CustomContractError::EmptyInput.into());
                    picks.extend(group_ids.iter().cloned());
                }
            }
        }

        if picks.is_empty() {
            return Ok(());
        }
        self.admin_collection.ensure_pickable(&picks)
    }

    /// Number of NFTs a checked source yields.
    fn source_size(&self, source: &NftSource) -> usize {
        match source {
            NftSource::Mint(data) => data.len(),
            NftSource::Pick(group_ids) => self.admin_collection.held_count(group_ids),
        }
    }

    fn ensure_pack_size(&self, source: &NftSource) -> ContractResult<()> {
        ensure!(
            self.source_size(source) <= MAX_NFTS_PER_PACK,
            CustomContractError::TooManyNfts.into()
        );
        Ok(())
    }

    fn ensure_release(&self, params: &CreateReleaseParams) -> ContractResult<()> {
        ensure_release_layout(
            &params.id,
            params
                .groupings
                .iter()
                .map(|grouping| (&grouping.pack_uuid, grouping.source.len())),
        )?;
        params.pack.validate()
    }

    fn take_nfts(
        &mut self,
        source: NftSource,
        logger: &mut impl HasLogger,
    ) -> ContractResult<Vec<MoonNft>> {
        match source {
            NftSource::Mint(data) => self.minter.bulk_mint_nfts(data, logger),
            NftSource::Pick(group_ids) => self.admin_collection.pick_nfts(group_ids, logger),
        }
    }

    fn deliver_nfts(
        &mut self,
        nfts: Vec<MoonNft>,
        destination: NftDestination,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        match destination {
            NftDestination::NewGroup(group) => {
                self.admin_collection
                    .deposit_group(group.group_id, group.metadata, nfts, logger)
            }
            NftDestination::ExistingGroup(group_id) => self
                .admin_collection
                .add_more_nfts_to_deposited_group(group_id, nfts, logger),
            NftDestination::Catalog => self.seller.bulk_deposit_nft(nfts, state_builder, logger),
            NftDestination::Collection(owner) => {
                self.collection_mut(&owner)?.bulk_deposit_nfts(nfts, logger)
            }
            NftDestination::Burn => destroy(nfts, Vec::new(), logger),
        }
    }

    fn deliver_nft(
        &mut self,
        nft: MoonNft,
        disposal: Disposal,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        match disposal {
            Disposal::Transfer(owner) => self.collection_mut(&owner)?.deposit_nft(nft, logger),
            Disposal::Burn => destroy(vec![nft], Vec::new(), logger),
        }
    }

    fn deliver_packs(
        &mut self,
        packs: Vec<MoonNftPack>,
        disposal: Disposal,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        match disposal {
            Disposal::Transfer(owner) => {
                let mut collection = self.collection_mut(&owner)?;
                for pack in packs {
                    collection.deposit_nft_pack(pack, logger)?;
                }
                Ok(())
            }
            Disposal::Burn => destroy(Vec::new(), packs, logger),
        }
    }

    pub fn mint_nft(
        &mut self,
        params: MintNftParams,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        params.data.validate()?;
        self.ensure_nft_destination(&params.destination, 1)?;

        let nft = self.minter.mint_nft(params.data, logger)?;
        self.deliver_nfts(vec![nft], params.destination, state_builder, logger)
    }

    pub fn bulk_mint_nfts(
        &mut self,
        params: BulkMintNftsParams,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_nft_destination(&params.destination, params.nfts.len())?;

        let nfts = self.minter.bulk_mint_nfts(params.nfts, logger)?;
        self.deliver_nfts(nfts, params.destination, state_builder, logger)
    }

    pub fn pick_nfts(
        &mut self,
        params: PickNftsParams,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.admin_collection.ensure_pickable(&params.group_ids)?;
        if let NftDestination::ExistingGroup(group_id) = &params.destination {
            ensure!(
                !params.group_ids.contains(group_id),
                CustomContractError::Exhausted.into()
            );
        }
        let incoming = self.admin_collection.held_count(&params.group_ids);
        self.ensure_nft_destination(&params.destination, incoming)?;

        let nfts = self.admin_collection.pick_nfts(params.group_ids, logger)?;
        self.deliver_nfts(nfts, params.destination, state_builder, logger)
    }

    pub fn withdraw_all_nfts_for_group(
        &mut self,
        params: WithdrawGroupParams,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        ensure!(!is_blank(&params.group_id), CustomContractError::InvalidInput.into());
        self.admin_collection.ensure_held(&params.group_id)?;
        if let NftDestination::ExistingGroup(group_id) = &params.destination {
            ensure!(group_id != &params.group_id, CustomContractError::Exhausted.into());
        }
        let incoming = self
            .admin_collection
            .held_count(core::slice::from_ref(&params.group_id));
        self.ensure_nft_destination(&params.destination, incoming)?;

        let nfts = self
            .admin_collection
            .withdraw_all_nfts_for_group(params.group_id, logger)?;
        self.deliver_nfts(nfts, params.destination, state_builder, logger)
    }

    /// Builds a pack and deposits it into the recipient's collection.
    pub fn create_nft_pack(
        &mut self,
        params: CreatePackParams,
        logger: &mut impl HasLogger,
    ) -> ContractResult<PackId> {
        self.ensure_sources(core::iter::once(&params.source))?;
        self.ensure_pack_size(&params.source)?;
        params.pack.validate()?;
        self.ensure_collection(&params.recipient)?;

        let nfts = self.take_nfts(params.source, logger)?;
        let pack = self.minter.create_nft_pack(nfts, params.pack, logger)?;
        let pack_id = pack.id();
        self.collection_mut(&params.recipient)?
            .deposit_nft_pack(pack, logger)?;

        Ok(pack_id)
    }

    /// Builds a release and lists it in the catalog.
    pub fn create_nft_pack_release(
        &mut self,
        params: CreateReleaseParams,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_release(&params)?;
        self.seller.ensure_release_ids_free(&[&params.id])?;
        self.ensure_sources(params.groupings.iter().map(|grouping| &grouping.source))?;
        for grouping in params.groupings.iter() {
            self.ensure_pack_size(&grouping.source)?;
        }

        let release = self.assemble_release(params, logger)?;
        self.seller.deposit_release(release, state_builder, logger)
    }

    pub fn bulk_create_nft_pack_releases(
        &mut self,
        params: Vec<CreateReleaseParams>,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        ensure!(!params.is_empty(), CustomContractError::EmptyInput.into());
        for release in params.iter() {
            self.ensure_release(release)?;
        }
        let ids: Vec<&String> = params.iter().map(|release| &release.id).collect();
        self.seller.ensure_release_ids_free(&ids)?;
        self.ensure_sources(
            params
                .iter()
                .flat_map(|release| release.groupings.iter())
                .map(|grouping| &grouping.source),
        )?;
        for grouping in params.iter().flat_map(|release| release.groupings.iter()) {
            self.ensure_pack_size(&grouping.source)?;
        }

        let mut releases = Vec::with_capacity(params.len());
        for release in params {
            releases.push(self.assemble_release(release, logger)?);
        }
        self.seller
            .bulk_deposit_release(releases, state_builder, logger)
    }

    fn assemble_release(
        &mut self,
        params: CreateReleaseParams,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNftRelease> {
        let mut groupings = Vec::with_capacity(params.groupings.len());
        for grouping in params.groupings {
            let nfts = self.take_nfts(grouping.source, logger)?;
            groupings.push((grouping.pack_uuid, nfts));
        }

        self.minter
            .create_nft_pack_release(params.id, groupings, params.pack, params.price, logger)
    }

    pub fn withdraw_nft_from_catalog(
        &mut self,
        params: CatalogNftParams,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_nft_destination(&params.destination, 1)?;

        let nft = self.seller.withdraw_nft(params.id, logger)?;
        self.deliver_nfts(vec![nft], params.destination, state_builder, logger)
    }

    /// Takes a release off sale. Its remaining packs are transferred or
    /// destroyed.
    pub fn withdraw_release(
        &mut self,
        params: WithdrawReleaseParams,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_disposal(&params.disposal)?;

        let release = self.seller.withdraw_release(&params.id, logger)?;
        self.deliver_packs(release.into_packs(), params.disposal, logger)
    }

    pub fn withdraw_pack_from_within_release(
        &mut self,
        params: WithdrawPackFromReleaseParams,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_disposal(&params.disposal)?;

        let pack = self.seller.withdraw_pack_from_within_release(
            &params.release_id,
            params.pack_uuid.as_deref(),
            logger,
        )?;
        self.deliver_packs(vec![pack], params.disposal, logger)
    }

    /// Moves an NFT out of the collection of `owner`.
    pub fn withdraw_nft(
        &mut self,
        owner: Address,
        params: WithdrawAssetParams,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_collection(&owner)?;
        self.ensure_disposal(&params.disposal)?;

        let nft = self
            .collection_mut(&owner)?
            .withdraw_nft(params.id, logger)?;
        self.deliver_nft(nft, params.disposal, logger)
    }

    /// Moves a pack out of the collection of `owner`.
    pub fn withdraw_pack(
        &mut self,
        owner: Address,
        params: WithdrawAssetParams,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_collection(&owner)?;
        self.ensure_disposal(&params.disposal)?;

        let pack = self
            .collection_mut(&owner)?
            .withdraw_pack(params.id, logger)?;
        self.deliver_packs(vec![pack], params.disposal, logger)
    }

    pub fn open_pack(
        &mut self,
        owner: Address,
        pack_id: PackId,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.collection_mut(&owner)?
            .open_pack_and_deposit_nfts(pack_id, logger)
    }
}

/// Consumes the assets and logs their ids.
fn destroy(
    nfts: Vec<MoonNft>,
    packs: Vec<MoonNftPack>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let mut nft_ids: Vec<NftId> = nfts.iter().map(MoonNft::id).collect();
    for pack in packs.iter() {
        nft_ids.extend(pack.nft_ids());
    }

    logger.log(&MoonNftEvent::AssetsDestroyed(AssetsDestroyedEvent {
        nft_ids,
        pack_ids: packs.iter().map(MoonNftPack::id).collect(),
    }))?;

    Ok(())
}
