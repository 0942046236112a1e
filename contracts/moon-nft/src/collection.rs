use crate::events::*;
use crate::nft::*;
use commons::{ContractResult, CustomContractError, NftId, PackId};
use concordium_std::*;

/// Deposit side of a collection, the only part other parties get to use.
pub trait NftReceiver {
    fn deposit_nft(&mut self, nft: MoonNft, logger: &mut impl HasLogger) -> ContractResult<()>;

    fn bulk_deposit_nfts(
        &mut self,
        nfts: Vec<MoonNft>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()>;

    fn deposit_nft_pack(
        &mut self,
        pack: MoonNftPack,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()>;
}

/// Read-only side of a collection.
pub trait MoonCollectionPublic {
    fn nft_id_exists(&self, id: NftId) -> bool;

    fn pack_id_exists(&self, id: PackId) -> bool;

    fn get_data_for_all_nfts(&self) -> Vec<MoonNftData>;

    fn get_nft_pack_ids(&self) -> Vec<PackId>;

    fn get_nft_pack_data(&self, id: PackId) -> ContractResult<MoonNftPackData>;

    fn get_data_for_all_packs(&self) -> Vec<MoonNftPackData>;

    fn borrow_moon_nft(&self, id: NftId) -> ContractResult<MoonNftData>;

    /// Ids of the held NFTs, for token-standard clients.
    fn get_ids(&self) -> Vec<NftId>;

    fn borrow_nft(&self, id: NftId) -> ContractResult<GenericNftView>;
}

/// NFTs and packs held by one address.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct AssetCollection<S: HasStateApi> {
    owner: Address,
    nfts: StateMap<NftId, MoonNft, S>,
    packs: StateMap<PackId, MoonNftPack, S>,
}

impl<S: HasStateApi> AssetCollection<S> {
    pub fn empty(owner: Address, state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            owner,
            nfts: state_builder.new_map(),
            packs: state_builder.new_map(),
        }
    }

    pub fn withdraw_nft(&mut self, id: NftId, logger: &mut impl HasLogger) -> ContractResult<MoonNft> {
        let nft = self
            .nfts
            .remove_and_get(&id)
            .ok_or(CustomContractError::NotFound)?;

        logger.log(&MoonNftEvent::NftWithdrawn(CollectionNftEvent {
            owner: self.owner,
            id,
        }))?;

        Ok(nft)
    }

    pub fn withdraw_pack(
        &mut self,
        id: PackId,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNftPack> {
        let pack = self
            .packs
            .remove_and_get(&id)
            .ok_or(CustomContractError::NotFound)?;

        logger.log(&MoonNftEvent::NftPackWithdrawn(CollectionPackEvent {
            owner: self.owner,
            id,
        }))?;

        Ok(pack)
    }

    /// Replaces the pack by its NFTs. Nothing changes unless every NFT fits.
    pub fn open_pack_and_deposit_nfts(
        &mut self,
        pack_id: PackId,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        let nft_ids = self
            .packs
            .get(&pack_id)
            .map(|pack| pack.nft_ids())
            .ok_or(CustomContractError::NotFound)?;
        self.ensure_vacant(&nft_ids)?;

        let pack = self
            .packs
            .remove_and_get(&pack_id)
            .ok_or(CustomContractError::NotFound)?;
        for nft in pack.into_nfts() {
            self.nfts.insert(nft.id(), nft);
        }

        logger.log(&MoonNftEvent::PackOpened(MoonNftPackOpenedEvent {
            owner: self.owner,
            pack_id,
            nft_ids,
        }))?;

        Ok(())
    }

    /// Rejects with `DuplicateId` if any id is held already or repeats.
    fn ensure_vacant(&self, ids: &[NftId]) -> ContractResult<()> {
        for (index, id) in ids.iter().enumerate() {
            ensure!(
                self.nfts.get(id).is_none() && !ids[..index].contains(id),
                CustomContractError::DuplicateId.into()
            );
        }
        Ok(())
    }
}

impl<S: HasStateApi> NftReceiver for AssetCollection<S> {
    fn deposit_nft(&mut self, nft: MoonNft, logger: &mut impl HasLogger) -> ContractResult<()> {
        let id = nft.id();
        self.ensure_vacant(&[id])?;
        self.nfts.insert(id, nft);

        logger.log(&MoonNftEvent::NftDeposit(CollectionNftEvent {
            owner: self.owner,
            id,
        }))?;

        Ok(())
    }

    fn bulk_deposit_nfts(
        &mut self,
        nfts: Vec<MoonNft>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        ensure!(!nfts.is_empty(), CustomContractError::EmptyInput.into());
        let ids: Vec<NftId> = nfts.iter().map(MoonNft::id).collect();
        self.ensure_vacant(&ids)?;

        for nft in nfts {
            let id = nft.id();
            self.nfts.insert(id, nft);
            logger.log(&MoonNftEvent::NftDeposit(CollectionNftEvent {
                owner: self.owner,
                id,
            }))?;
        }

        Ok(())
    }

    fn deposit_nft_pack(
        &mut self,
        pack: MoonNftPack,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        let id = pack.id();
        ensure!(
            self.packs.get(&id).is_none(),
            CustomContractError::DuplicateId.into()
        );
        self.packs.insert(id, pack);

        logger.log(&MoonNftEvent::NftPackDeposit(CollectionPackEvent {
            owner: self.owner,
            id,
        }))?;

        Ok(())
    }
}

impl<S: HasStateApi> MoonCollectionPublic for AssetCollection<S> {
    fn nft_id_exists(&self, id: NftId) -> bool {
        self.nfts.get(&id).is_some()
    }

    fn pack_id_exists(&self, id: PackId) -> bool {
        self.packs.get(&id).is_some()
    }

    fn get_data_for_all_nfts(&self) -> Vec<MoonNftData> {
        let mut data: Vec<MoonNftData> = self.nfts.iter().map(|(_, nft)| nft.view()).collect();
        data.sort_unstable_by_key(|nft| nft.id);
        data
    }

    fn get_nft_pack_ids(&self) -> Vec<PackId> {
        let mut ids: Vec<PackId> = self.packs.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids
    }

    fn get_nft_pack_data(&self, id: PackId) -> ContractResult<MoonNftPackData> {
        self.packs
            .get(&id)
            .map(|pack| pack.view())
            .ok_or_else(|| CustomContractError::NotFound.into())
    }

    fn get_data_for_all_packs(&self) -> Vec<MoonNftPackData> {
        let mut data: Vec<MoonNftPackData> =
            self.packs.iter().map(|(_, pack)| pack.view()).collect();
        data.sort_unstable_by_key(|pack| pack.id);
        data
    }

    fn borrow_moon_nft(&self, id: NftId) -> ContractResult<MoonNftData> {
        self.nfts
            .get(&id)
            .map(|nft| nft.view())
            .ok_or_else(|| CustomContractError::NotFound.into())
    }

    fn get_ids(&self) -> Vec<NftId> {
        let mut ids: Vec<NftId> = self.nfts.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids
    }

    fn borrow_nft(&self, id: NftId) -> ContractResult<GenericNftView> {
        self.borrow_moon_nft(id).map(GenericNftView::from)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::minter::NftMinter;
    use crate::test_utils::*;
    use commons::*;
    use concordium_std::test_infrastructure::*;

    const OWNER: Address = Address::Account(AccountAddress([5; 32]));

    fn new_collection(state_builder: &mut TestStateBuilder) -> AssetCollection<TestStateApi> {
        AssetCollection::empty(OWNER, state_builder)
    }

    fn mint(minter: &mut NftMinter, count: usize) -> Vec<MoonNft> {
        let mut logger = TestLogger::init();
        minter
            .bulk_mint_nfts(vec![mint_data("creator", 1); count], &mut logger)
            .expect_report("Bulk minting failed")
    }

    #[concordium_test]
    fn test_deposit_withdraw_round_trip() {
        let mut state_builder = TestStateBuilder::new();
        let mut collection = new_collection(&mut state_builder);
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let nft = mint(&mut minter, 1).remove(0);
        let original = nft.view();
        collection
            .deposit_nft(nft, &mut logger)
            .expect_report("Deposit failed");
        claim!(collection.nft_id_exists(original.id));
        claim_eq!(collection.borrow_moon_nft(original.id), Ok(original.clone()));

        let nft = collection
            .withdraw_nft(original.id, &mut logger)
            .expect_report("Withdrawal failed");
        claim_eq!(nft.view(), original);
        claim!(!collection.nft_id_exists(original.id));

        let result = collection.withdraw_nft(original.id, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));

        claim_eq!(
            logger.logs,
            vec![
                to_bytes(&MoonNftEvent::NftDeposit(CollectionNftEvent {
                    owner: OWNER,
                    id: original.id,
                })),
                to_bytes(&MoonNftEvent::NftWithdrawn(CollectionNftEvent {
                    owner: OWNER,
                    id: original.id,
                })),
            ]
        );
    }

    #[concordium_test]
    fn test_duplicate_deposit_is_rejected() {
        let mut state_builder = TestStateBuilder::new();
        let mut collection = new_collection(&mut state_builder);
        let mut logger = TestLogger::init();

        // Two minters hand out overlapping ids
        let first = mint(&mut NftMinter::new(), 1).remove(0);
        let clash = mint(&mut NftMinter::new(), 1).remove(0);

        collection
            .deposit_nft(first, &mut logger)
            .expect_report("Deposit failed");
        let result = collection.deposit_nft(clash, &mut logger);
        claim_eq!(result, Err(CustomContractError::DuplicateId.into()));
        claim_eq!(collection.get_ids(), vec![1]);
    }

    #[concordium_test]
    fn test_bulk_deposit() {
        let mut state_builder = TestStateBuilder::new();
        let mut collection = new_collection(&mut state_builder);
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let result = collection.bulk_deposit_nfts(Vec::new(), &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));

        collection
            .bulk_deposit_nfts(mint(&mut minter, 3), &mut logger)
            .expect_report("Bulk deposit failed");
        claim_eq!(collection.get_ids(), vec![1, 2, 3]);
        claim_eq!(count_events(&logger.logs, NFT_DEPOSIT_TAG), 3);

        // A batch overlapping the held ids leaves the collection untouched
        let mut batch = mint(&mut minter, 1);
        batch.extend(mint(&mut NftMinter::new(), 1));
        let result = collection.bulk_deposit_nfts(batch, &mut logger);
        claim_eq!(result, Err(CustomContractError::DuplicateId.into()));
        claim_eq!(collection.get_ids(), vec![1, 2, 3]);
    }

    #[concordium_test]
    fn test_open_pack_moves_every_nft() {
        let mut state_builder = TestStateBuilder::new();
        let mut collection = new_collection(&mut state_builder);
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let nfts = mint(&mut minter, 3);
        let pack = minter
            .create_nft_pack(nfts, pack_info("creator", 1), &mut logger)
            .expect_report("Pack creation failed");
        let pack_id = pack.id();
        collection
            .deposit_nft_pack(pack, &mut logger)
            .expect_report("Pack deposit failed");
        claim!(collection.pack_id_exists(pack_id));
        claim_eq!(collection.get_nft_pack_ids(), vec![pack_id]);
        claim_eq!(
            collection.get_nft_pack_data(pack_id).map(|data| data.collection_nft_ids),
            Ok(vec![1, 2, 3])
        );

        let mut logger = TestLogger::init();
        collection
            .open_pack_and_deposit_nfts(pack_id, &mut logger)
            .expect_report("Opening the pack failed");

        claim!(!collection.pack_id_exists(pack_id));
        claim_eq!(collection.get_ids(), vec![1, 2, 3]);
        claim_eq!(collection.get_data_for_all_packs(), Vec::new());
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MoonNftEvent::PackOpened(MoonNftPackOpenedEvent {
                owner: OWNER,
                pack_id,
                nft_ids: vec![1, 2, 3],
            }))]
        );

        let result = collection.open_pack_and_deposit_nfts(pack_id, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));
    }

    #[concordium_test]
    fn test_queries() {
        let mut state_builder = TestStateBuilder::new();
        let mut collection = new_collection(&mut state_builder);
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        collection
            .bulk_deposit_nfts(mint(&mut minter, 2), &mut logger)
            .expect_report("Bulk deposit failed");

        let data = collection.get_data_for_all_nfts();
        claim_eq!(data.len(), 2);
        claim_eq!(data[0].id, 1);
        claim_eq!(data[1].creator, "creator".to_string());

        let view = collection.borrow_nft(2).expect_report("NFT 2 is held");
        claim_eq!(view.token_id, concordium_cis2::TokenIdU64(2));
        claim_eq!(view.metadata_url.url, "url".to_string());

        claim_eq!(
            collection.borrow_moon_nft(9),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            collection.get_nft_pack_data(9),
            Err(CustomContractError::NotFound.into())
        );
        claim!(!collection.pack_id_exists(1));
    }
}
