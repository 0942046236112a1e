use crate::events::*;
use crate::index::*;
use crate::nft::*;
use commons::{ContractResult, CreatorId, CustomContractError, NftId};
use concordium_std::*;

/// Read access to the catalog.
pub trait SellerCatalog {
    fn get_data_for_all_releases(&self) -> Vec<MoonNftReleaseData>;

    fn get_total_pack_release_count(&self) -> u64;

    fn pack_release_exists(&self, id: &String) -> bool;

    fn get_pack_release_data(&self, id: &String) -> ContractResult<MoonNftReleaseData>;

    fn get_nft_data(&self, id: NftId) -> ContractResult<MoonNftData>;

    fn get_data_for_all_nfts(&self) -> Vec<MoonNftData>;

    fn get_total_nft_count(&self) -> u64;

    fn nft_exists(&self, id: NftId) -> bool;

    fn get_nfts_by_creator_id(&self, creator_id: CreatorId) -> ContractResult<Vec<MoonNftData>>;

    fn get_nfts_by_creator(&self, creator: &String) -> ContractResult<Vec<MoonNftData>>;

    fn get_pack_releases_by_creator_id(
        &self,
        creator_id: CreatorId,
    ) -> ContractResult<Vec<MoonNftReleaseData>>;

    fn get_pack_releases_by_creator(
        &self,
        creator: &String,
    ) -> ContractResult<Vec<MoonNftReleaseData>>;

    /// Grouping keys of the release that still hold a pack.
    fn get_current_pack_ids_available_within_release(
        &self,
        id: &String,
    ) -> ContractResult<Vec<String>>;
}

/// Catalog of NFTs and releases offered by the platform.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct SinglePlatformSeller<S: HasStateApi> {
    nfts: StateMap<NftId, MoonNft, S>,
    releases: StateMap<String, MoonNftRelease, S>,
    nfts_by_creator: Index<String, NftId, S>,
    nfts_by_creator_id: Index<CreatorId, NftId, S>,
    releases_by_creator: Index<String, String, S>,
    releases_by_creator_id: Index<CreatorId, String, S>,
}

impl<S: HasStateApi> SinglePlatformSeller<S> {
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            nfts: state_builder.new_map(),
            releases: state_builder.new_map(),
            nfts_by_creator: state_builder.new_map(),
            nfts_by_creator_id: state_builder.new_map(),
            releases_by_creator: state_builder.new_map(),
            releases_by_creator_id: state_builder.new_map(),
        }
    }

    /// Rejects with `DuplicateId` if a release id is listed already or repeats.
    pub fn ensure_release_ids_free(&self, ids: &[&String]) -> ContractResult<()> {
        for (index, id) in ids.iter().enumerate() {
            ensure!(
                self.releases.get(*id).is_none() && !ids[..index].contains(id),
                CustomContractError::DuplicateId.into()
            );
        }
        Ok(())
    }

    fn ensure_nft_ids_free(&self, ids: &[NftId]) -> ContractResult<()> {
        for (index, id) in ids.iter().enumerate() {
            ensure!(
                self.nfts.get(id).is_none() && !ids[..index].contains(id),
                CustomContractError::DuplicateId.into()
            );
        }
        Ok(())
    }

    pub fn deposit_nft(
        &mut self,
        nft: MoonNft,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_nft_ids_free(&[nft.id()])?;
        self.insert_nft(nft, state_builder, logger)
    }

    pub fn bulk_deposit_nft(
        &mut self,
        nfts: Vec<MoonNft>,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        ensure!(!nfts.is_empty(), CustomContractError::EmptyInput.into());
        let ids: Vec<NftId> = nfts.iter().map(MoonNft::id).collect();
        self.ensure_nft_ids_free(&ids)?;

        for nft in nfts {
            self.insert_nft(nft, state_builder, logger)?;
        }
        Ok(())
    }

    pub fn deposit_release(
        &mut self,
        release: MoonNftRelease,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        self.ensure_release_ids_free(&[release.id()])?;
        self.insert_release(release, state_builder, logger)
    }

    pub fn bulk_deposit_release(
        &mut self,
        releases: Vec<MoonNftRelease>,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        ensure!(!releases.is_empty(), CustomContractError::EmptyInput.into());
        let ids: Vec<&String> = releases.iter().map(MoonNftRelease::id).collect();
        self.ensure_release_ids_free(&ids)?;

        for release in releases {
            self.insert_release(release, state_builder, logger)?;
        }
        Ok(())
    }

    pub fn withdraw_nft(&mut self, id: NftId, logger: &mut impl HasLogger) -> ContractResult<MoonNft> {
        let nft = self
            .nfts
            .remove_and_get(&id)
            .ok_or(CustomContractError::NotFound)?;
        index_remove(&mut self.nfts_by_creator, &nft.data().creator, &id);
        index_remove(&mut self.nfts_by_creator_id, &nft.data().creator_id, &id);

        logger.log(&MoonNftEvent::CatalogNftWithdrawn(CatalogNftEvent { id }))?;

        Ok(nft)
    }

    pub fn withdraw_release(
        &mut self,
        id: &String,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNftRelease> {
        let release = self
            .releases
            .remove_and_get(id)
            .ok_or(CustomContractError::NotFound)?;
        index_remove(&mut self.releases_by_creator, &release.info().creator, id);
        index_remove(&mut self.releases_by_creator_id, &release.info().creator_id, id);

        logger.log(&MoonNftEvent::ReleaseWithdrawn(ReleaseWithdrawnEvent { id: id.clone() }))?;

        Ok(release)
    }

    /// Takes the pack under `pack_uuid`, or the first remaining one. The
    /// release stays listed even once it has no packs left.
    pub fn withdraw_pack_from_within_release(
        &mut self,
        release_id: &String,
        pack_uuid: Option<&str>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNftPack> {
        let mut release = self
            .releases
            .get_mut(release_id)
            .ok_or(CustomContractError::NotFound)?;
        let taken = release.take_pack(pack_uuid)?;
        drop(release);

        logger.log(&MoonNftEvent::PackWithdrawnFromRelease(PackWithdrawnFromReleaseEvent {
            release_id: release_id.clone(),
            pack_uuid: taken.pack_uuid,
            pack_id: taken.pack.id(),
        }))?;

        Ok(taken.pack)
    }

    fn insert_nft(
        &mut self,
        nft: MoonNft,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        let id = nft.id();
        index_insert(
            &mut self.nfts_by_creator,
            nft.data().creator.clone(),
            id,
            state_builder,
        );
        index_insert(
            &mut self.nfts_by_creator_id,
            nft.data().creator_id,
            id,
            state_builder,
        );
        self.nfts.insert(id, nft);

        logger.log(&MoonNftEvent::CatalogNftDeposited(CatalogNftEvent { id }))?;

        Ok(())
    }

    fn insert_release(
        &mut self,
        release: MoonNftRelease,
        state_builder: &mut StateBuilder<S>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        let id = release.id().clone();
        let view = release.view();
        index_insert(
            &mut self.releases_by_creator,
            view.info.creator,
            id.clone(),
            state_builder,
        );
        index_insert(
            &mut self.releases_by_creator_id,
            view.info.creator_id,
            id.clone(),
            state_builder,
        );
        let pack_uuids = release.available_pack_uuids();
        self.releases.insert(id.clone(), release);

        logger.log(&MoonNftEvent::ReleaseDeposited(ReleaseDepositedEvent {
            id,
            pack_uuids,
            price: view.price,
        }))?;

        Ok(())
    }

    fn nfts_data(&self, ids: Vec<NftId>) -> Vec<MoonNftData> {
        let mut data: Vec<MoonNftData> = ids
            .iter()
            .filter_map(|id| self.nfts.get(id).map(|nft| nft.view()))
            .collect();
        data.sort_unstable_by_key(|nft| nft.id);
        data
    }

    fn releases_data(&self, ids: Vec<String>) -> Vec<MoonNftReleaseData> {
        let mut data: Vec<MoonNftReleaseData> = ids
            .iter()
            .filter_map(|id| self.releases.get(id).map(|release| release.view()))
            .collect();
        data.sort_unstable_by(|left, right| left.id.cmp(&right.id));
        data
    }
}

impl<S: HasStateApi> SellerCatalog for SinglePlatformSeller<S> {
    fn get_data_for_all_releases(&self) -> Vec<MoonNftReleaseData> {
        let ids = self.releases.iter().map(|(id, _)| id.clone()).collect();
        self.releases_data(ids)
    }

    fn get_total_pack_release_count(&self) -> u64 {
        self.releases.iter().count() as u64
    }

    fn pack_release_exists(&self, id: &String) -> bool {
        self.releases.get(id).is_some()
    }

    fn get_pack_release_data(&self, id: &String) -> ContractResult<MoonNftReleaseData> {
        self.releases
            .get(id)
            .map(|release| release.view())
            .ok_or_else(|| CustomContractError::NotFound.into())
    }

    fn get_nft_data(&self, id: NftId) -> ContractResult<MoonNftData> {
        self.nfts
            .get(&id)
            .map(|nft| nft.view())
            .ok_or_else(|| CustomContractError::NotFound.into())
    }

    fn get_data_for_all_nfts(&self) -> Vec<MoonNftData> {
        let ids = self.nfts.iter().map(|(id, _)| *id).collect();
        self.nfts_data(ids)
    }

    fn get_total_nft_count(&self) -> u64 {
        self.nfts.iter().count() as u64
    }

    fn nft_exists(&self, id: NftId) -> bool {
        self.nfts.get(&id).is_some()
    }

    fn get_nfts_by_creator_id(&self, creator_id: CreatorId) -> ContractResult<Vec<MoonNftData>> {
        let ids = index_values(&self.nfts_by_creator_id, &creator_id)?;
        Ok(self.nfts_data(ids))
    }

    fn get_nfts_by_creator(&self, creator: &String) -> ContractResult<Vec<MoonNftData>> {
        let ids = index_values(&self.nfts_by_creator, creator)?;
        Ok(self.nfts_data(ids))
    }

    fn get_pack_releases_by_creator_id(
        &self,
        creator_id: CreatorId,
    ) -> ContractResult<Vec<MoonNftReleaseData>> {
        let ids = index_values(&self.releases_by_creator_id, &creator_id)?;
        Ok(self.releases_data(ids))
    }

    fn get_pack_releases_by_creator(
        &self,
        creator: &String,
    ) -> ContractResult<Vec<MoonNftReleaseData>> {
        let ids = index_values(&self.releases_by_creator, creator)?;
        Ok(self.releases_data(ids))
    }

    fn get_current_pack_ids_available_within_release(
        &self,
        id: &String,
    ) -> ContractResult<Vec<String>> {
        self.releases
            .get(id)
            .map(|release| release.available_pack_uuids())
            .ok_or_else(|| CustomContractError::NotFound.into())
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::minter::NftMinter;
    use crate::test_utils::*;
    use commons::*;
    use concordium_std::test_infrastructure::*;

    fn release(
        minter: &mut NftMinter,
        id: &str,
        creator: &str,
        creator_id: CreatorId,
        pack_uuids: &[&str],
    ) -> MoonNftRelease {
        let mut logger = TestLogger::init();
        let mut groupings = Vec::new();
        for pack_uuid in pack_uuids {
            let nfts = minter
                .bulk_mint_nfts(vec![mint_data(creator, creator_id); 2], &mut logger)
                .expect_report("Bulk minting failed");
            groupings.push((pack_uuid.to_string(), nfts));
        }
        minter
            .create_nft_pack_release(
                id.to_string(),
                groupings,
                pack_info(creator, creator_id),
                Amount::from_ccd(20),
                &mut logger,
            )
            .expect_report("Release creation failed")
    }

    #[concordium_test]
    fn test_catalog_nfts_and_indices() {
        let mut state_builder = TestStateBuilder::new();
        let mut seller = SinglePlatformSeller::empty(&mut state_builder);
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let alice = minter
            .bulk_mint_nfts(vec![mint_data("alice", 1); 2], &mut logger)
            .expect_report("Bulk minting failed");
        let bob = minter
            .mint_nft(mint_data("bob", 2), &mut logger)
            .expect_report("Minting failed");

        let mut logger = TestLogger::init();
        let result = seller.bulk_deposit_nft(Vec::new(), &mut state_builder, &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));
        seller
            .bulk_deposit_nft(alice, &mut state_builder, &mut logger)
            .expect_report("Bulk deposit failed");
        seller
            .deposit_nft(bob, &mut state_builder, &mut logger)
            .expect_report("Deposit failed");
        claim_eq!(count_events(&logger.logs, CATALOG_NFT_DEPOSITED_TAG), 3);

        claim_eq!(seller.get_total_nft_count(), 3);
        claim!(seller.nft_exists(3));
        claim_eq!(seller.get_nft_data(3).map(|nft| nft.creator), Ok("bob".to_string()));
        claim_eq!(
            seller
                .get_nfts_by_creator(&"alice".to_string())
                .map(|nfts| nfts.iter().map(|nft| nft.id).collect::<Vec<_>>()),
            Ok(vec![1, 2])
        );
        claim_eq!(seller.get_nfts_by_creator_id(2).map(|nfts| nfts.len()), Ok(1));

        let nft = seller.withdraw_nft(3, &mut logger).expect_report("Withdrawal failed");
        claim_eq!(nft.id(), 3);
        claim!(!seller.nft_exists(3));
        claim_eq!(
            seller.get_nfts_by_creator(&"bob".to_string()),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            seller.get_nfts_by_creator_id(2),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            seller.withdraw_nft(3, &mut logger).map(|nft| nft.id()),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(seller.get_data_for_all_nfts().len(), 2);
    }

    #[concordium_test]
    fn test_release_packs_run_out() {
        let mut state_builder = TestStateBuilder::new();
        let mut seller = SinglePlatformSeller::empty(&mut state_builder);
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let release = release(&mut minter, "R1", "alice", 1, &["k1", "k2"]);
        seller
            .deposit_release(release, &mut state_builder, &mut logger)
            .expect_report("Release deposit failed");
        let release_id = "R1".to_string();

        claim_eq!(
            seller.get_current_pack_ids_available_within_release(&release_id),
            Ok(vec!["k1".to_string(), "k2".to_string()])
        );

        let pack = seller
            .withdraw_pack_from_within_release(&release_id, Some("k2"), &mut logger)
            .expect_report("Withdrawing k2 failed");
        claim_eq!(pack.nft_ids(), vec![3, 4]);
        claim_eq!(
            seller.get_current_pack_ids_available_within_release(&release_id),
            Ok(vec!["k1".to_string()])
        );

        let result = seller.withdraw_pack_from_within_release(&release_id, Some("k2"), &mut logger);
        claim_eq!(result.map(|pack| pack.id()), Err(CustomContractError::NotFound.into()));

        seller
            .withdraw_pack_from_within_release(&release_id, None, &mut logger)
            .expect_report("Withdrawing any pack failed");
        claim_eq!(
            seller.get_current_pack_ids_available_within_release(&release_id),
            Ok(Vec::new())
        );

        let result = seller.withdraw_pack_from_within_release(&release_id, None, &mut logger);
        claim_eq!(result.map(|pack| pack.id()), Err(CustomContractError::Exhausted.into()));

        // The exhausted release is still listed with its original keys
        claim!(seller.pack_release_exists(&release_id));
        claim_eq!(
            seller.get_pack_release_data(&release_id).map(|data| data.pack_uuids),
            Ok(vec!["k1".to_string(), "k2".to_string()])
        );
        claim_eq!(count_events(&logger.logs, PACK_WITHDRAWN_FROM_RELEASE_TAG), 2);

        let result =
            seller.withdraw_pack_from_within_release(&"R9".to_string(), None, &mut logger);
        claim_eq!(result.map(|pack| pack.id()), Err(CustomContractError::NotFound.into()));
    }

    #[concordium_test]
    fn test_release_deposit_and_withdrawal() {
        let mut state_builder = TestStateBuilder::new();
        let mut seller = SinglePlatformSeller::empty(&mut state_builder);
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let releases = vec![
            release(&mut minter, "R1", "alice", 1, &["k1"]),
            release(&mut minter, "R2", "alice", 1, &["k1"]),
        ];
        let result = seller.bulk_deposit_release(Vec::new(), &mut state_builder, &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));
        seller
            .bulk_deposit_release(releases, &mut state_builder, &mut logger)
            .expect_report("Bulk release deposit failed");
        claim_eq!(seller.get_total_pack_release_count(), 2);

        let duplicate = release(&mut minter, "R1", "bob", 2, &["k1"]);
        let result = seller.deposit_release(duplicate, &mut state_builder, &mut logger);
        claim_eq!(result, Err(CustomContractError::DuplicateId.into()));

        let twins = vec![
            release(&mut minter, "R3", "bob", 2, &["k1"]),
            release(&mut minter, "R3", "bob", 2, &["k1"]),
        ];
        let result = seller.bulk_deposit_release(twins, &mut state_builder, &mut logger);
        claim_eq!(result, Err(CustomContractError::DuplicateId.into()));
        claim!(!seller.pack_release_exists(&"R3".to_string()));

        let by_creator = seller
            .get_pack_releases_by_creator(&"alice".to_string())
            .expect_report("alice has releases");
        claim_eq!(by_creator.len(), 2);
        claim_eq!(by_creator[0].id, "R1".to_string());
        claim_eq!(by_creator[0].price, Amount::from_ccd(20));

        let withdrawn = seller
            .withdraw_release(&"R1".to_string(), &mut logger)
            .expect_report("Release withdrawal failed");
        claim_eq!(withdrawn.id(), "R1");
        claim_eq!(
            seller.get_pack_releases_by_creator_id(1).map(|releases| releases.len()),
            Ok(1)
        );
        claim_eq!(
            seller.get_pack_release_data(&"R1".to_string()),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            seller
                .withdraw_release(&"R1".to_string(), &mut logger)
                .map(|release| release.view()),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            seller.get_pack_releases_by_creator(&"bob".to_string()),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(seller.get_data_for_all_releases().len(), 1);
    }
}
