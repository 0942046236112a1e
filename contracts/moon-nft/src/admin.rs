use crate::events::*;
use crate::nft::*;
use commons::{ContractResult, CreatorId, CustomContractError, NftId};
use concordium_std::*;

/// Freshly minted NFTs staged under one group id.
#[derive(Debug, Serialize)]
pub struct NftGroup {
    group_id: String,
    metadata: MintData,
    nfts: Vec<MoonNft>,
}

impl NftGroup {
    pub fn nft_ids(&self) -> Vec<NftId> {
        self.nfts.iter().map(MoonNft::id).collect()
    }

    pub fn view(&self) -> NftGroupData {
        NftGroupData {
            group_id: self.group_id.clone(),
            nft_ids: self.nft_ids(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Query result describing one group.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct NftGroupData {
    pub group_id: String,
    pub nft_ids: Vec<NftId>,
    pub metadata: MintData,
}

/// Queries over the staged groups.
pub trait QueryMintedCollection {
    fn get_all_groups(&self) -> Vec<NftGroupData>;

    fn get_group_info(&self, group_id: &String) -> ContractResult<NftGroupData>;

    fn get_all_nft_ids(&self) -> Vec<NftId>;

    fn group_id_exists(&self, group_id: &String) -> bool;

    fn get_group_info_by_creator(&self, creator: &str) -> ContractResult<Vec<NftGroupData>>;

    fn get_group_info_by_creator_id(&self, creator_id: CreatorId)
        -> ContractResult<Vec<NftGroupData>>;
}

/// Platform staging inventory.
///
/// A group id is reserved forever once deposited: emptying a group removes it
/// from `groups` but never from `used_group_ids`.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct AdminMintedCollection<S: HasStateApi> {
    groups: StateMap<String, NftGroup, S>,
    used_group_ids: StateSet<String, S>,
}

impl<S: HasStateApi> AdminMintedCollection<S> {
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            groups: state_builder.new_map(),
            used_group_ids: state_builder.new_set(),
        }
    }

    /// Checks that a deposit of a new group would be accepted.
    pub fn ensure_new_group(&self, group_id: &str, metadata: &MintData) -> ContractResult<()> {
        ensure!(!is_blank(group_id), CustomContractError::InvalidInput.into());
        metadata.validate()?;
        ensure!(
            !self.used_group_ids.contains(&group_id.to_string()),
            CustomContractError::DuplicateGroup.into()
        );
        Ok(())
    }

    pub fn deposit_group(
        &mut self,
        group_id: String,
        metadata: MintData,
        nfts: Vec<MoonNft>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        ensure!(!nfts.is_empty(), CustomContractError::InvalidInput.into());
        self.ensure_new_group(&group_id, &metadata)?;
        ensure!(
            nfts.len() <= MAX_NFTS_PER_GROUP,
            CustomContractError::TooManyNfts.into()
        );

        let group = NftGroup {
            group_id: group_id.clone(),
            metadata,
            nfts,
        };
        logger.log(&MoonNftEvent::GroupCreated(NftGroupEvent {
            group_id: group_id.clone(),
            nft_ids: group.nft_ids(),
        }))?;

        self.used_group_ids.insert(group_id.clone());
        self.groups.insert(group_id, group);

        Ok(())
    }

    pub fn add_more_nfts_to_deposited_group(
        &mut self,
        group_id: String,
        nfts: Vec<MoonNft>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<()> {
        let mut group = self
            .groups
            .get_mut(&group_id)
            .ok_or(CustomContractError::NotFound)?;
        ensure!(!nfts.is_empty(), CustomContractError::EmptyInput.into());
        ensure!(
            group.nfts.len() + nfts.len() <= MAX_NFTS_PER_GROUP,
            CustomContractError::TooManyNfts.into()
        );

        let nft_ids: Vec<NftId> = nfts.iter().map(MoonNft::id).collect();
        group.nfts.extend(nfts);
        drop(group);

        logger.log(&MoonNftEvent::GroupUpdated(NftGroupEvent { group_id, nft_ids }))?;

        Ok(())
    }

    /// Checks that `incoming` more NFTs fit into the held group `group_id`.
    pub fn ensure_room(&self, group_id: &String, incoming: usize) -> ContractResult<()> {
        let group = self
            .groups
            .get(group_id)
            .ok_or(CustomContractError::NotFound)?;
        ensure!(
            group.nfts.len() + incoming <= MAX_NFTS_PER_GROUP,
            CustomContractError::TooManyNfts.into()
        );
        Ok(())
    }

    /// Number of NFTs the held groups among `group_ids` contain.
    pub fn held_count(&self, group_ids: &[String]) -> usize {
        group_ids
            .iter()
            .filter_map(|group_id| self.groups.get(group_id).map(|group| group.nfts.len()))
            .sum()
    }

    /// Rejects with `Exhausted` for an id whose group was emptied and with
    /// `NotFound` for an id that was never deposited.
    pub fn ensure_held(&self, group_id: &String) -> ContractResult<()> {
        if self.groups.get(group_id).is_some() {
            return Ok(());
        }
        if self.used_group_ids.contains(group_id) {
            bail!(CustomContractError::Exhausted.into());
        }
        bail!(CustomContractError::NotFound.into())
    }

    /// Checks a whole pick before anything is taken. A repeated id would
    /// find its group already consumed.
    pub fn ensure_pickable(&self, group_ids: &[String]) -> ContractResult<()> {
        ensure!(!group_ids.is_empty(), CustomContractError::EmptyInput.into());
        for (index, group_id) in group_ids.iter().enumerate() {
            ensure!(
                !group_ids[..index].contains(group_id),
                CustomContractError::Exhausted.into()
            );
            self.ensure_held(group_id)?;
        }
        Ok(())
    }

    /// Takes the entire stock of every listed group.
    pub fn pick_nfts(
        &mut self,
        group_ids: Vec<String>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<Vec<MoonNft>> {
        self.ensure_pickable(&group_ids)?;

        let mut nfts = Vec::new();
        for group_id in group_ids.iter() {
            let group = self
                .groups
                .remove_and_get(group_id)
                .ok_or(CustomContractError::NotFound)?;
            nfts.extend(group.nfts);
        }

        logger.log(&MoonNftEvent::NftsPicked(MoonNftsPickedEvent {
            nft_ids: nfts.iter().map(MoonNft::id).collect(),
        }))?;

        Ok(nfts)
    }

    pub fn withdraw_all_nfts_for_group(
        &mut self,
        group_id: String,
        logger: &mut impl HasLogger,
    ) -> ContractResult<Vec<MoonNft>> {
        ensure!(!is_blank(&group_id), CustomContractError::InvalidInput.into());
        self.pick_nfts(vec![group_id], logger)
    }

    fn collect_groups(&self, filter: impl Fn(&NftGroup) -> bool) -> Vec<NftGroupData> {
        let mut groups: Vec<NftGroupData> = self
            .groups
            .iter()
            .filter(|(_, group)| filter(group))
            .map(|(_, group)| group.view())
            .collect();
        groups.sort_unstable_by(|left, right| left.group_id.cmp(&right.group_id));
        groups
    }
}

impl<S: HasStateApi> QueryMintedCollection for AdminMintedCollection<S> {
    fn get_all_groups(&self) -> Vec<NftGroupData> {
        self.collect_groups(|_| true)
    }

    fn get_group_info(&self, group_id: &String) -> ContractResult<NftGroupData> {
        ensure!(!is_blank(group_id), CustomContractError::NotFound.into());
        self.groups
            .get(group_id)
            .map(|group| group.view())
            .ok_or_else(|| CustomContractError::NotFound.into())
    }

    fn get_all_nft_ids(&self) -> Vec<NftId> {
        let mut ids: Vec<NftId> = self
            .groups
            .iter()
            .flat_map(|(_, group)| group.nft_ids())
            .collect();
        ids.sort_unstable();
        ids
    }

    fn group_id_exists(&self, group_id: &String) -> bool {
        self.groups.get(group_id).is_some()
    }

    fn get_group_info_by_creator(&self, creator: &str) -> ContractResult<Vec<NftGroupData>> {
        let groups = self.collect_groups(|group| group.metadata.creator == creator);
        ensure!(!groups.is_empty(), CustomContractError::NotFound.into());
        Ok(groups)
    }

    fn get_group_info_by_creator_id(
        &self,
        creator_id: CreatorId,
    ) -> ContractResult<Vec<NftGroupData>> {
        let groups = self.collect_groups(|group| group.metadata.creator_id == creator_id);
        ensure!(!groups.is_empty(), CustomContractError::NotFound.into());
        Ok(groups)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::minter::NftMinter;
    use crate::test_utils::*;
    use commons::*;
    use concordium_std::test_infrastructure::*;

    fn mint(minter: &mut NftMinter, creator: &str, creator_id: CreatorId, count: usize) -> Vec<MoonNft> {
        let mut logger = TestLogger::init();
        minter
            .bulk_mint_nfts(vec![mint_data(creator, creator_id); count], &mut logger)
            .expect_report("Bulk minting failed")
    }

    fn staged(
        state_builder: &mut TestStateBuilder,
        minter: &mut NftMinter,
    ) -> AdminMintedCollection<TestStateApi> {
        let mut collection = AdminMintedCollection::empty(state_builder);
        let mut logger = TestLogger::init();
        collection
            .deposit_group(
                "G1".to_string(),
                mint_data("alice", 1),
                mint(minter, "alice", 1, 2),
                &mut logger,
            )
            .expect_report("Depositing G1 failed");
        collection
            .deposit_group(
                "G2".to_string(),
                mint_data("bob", 2),
                mint(minter, "bob", 2, 1),
                &mut logger,
            )
            .expect_report("Depositing G2 failed");
        collection
    }

    #[concordium_test]
    fn test_deposit_group() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = AdminMintedCollection::empty(&mut state_builder);
        let mut logger = TestLogger::init();

        let nfts = mint(&mut minter, "alice", 1, 2);
        collection
            .deposit_group("G1".to_string(), mint_data("alice", 1), nfts, &mut logger)
            .expect_report("Deposit failed");

        claim!(collection.group_id_exists(&"G1".to_string()));
        claim_eq!(
            collection.get_group_info(&"G1".to_string()),
            Ok(NftGroupData {
                group_id: "G1".to_string(),
                nft_ids: vec![1, 2],
                metadata: mint_data("alice", 1),
            })
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MoonNftEvent::GroupCreated(NftGroupEvent {
                group_id: "G1".to_string(),
                nft_ids: vec![1, 2],
            }))]
        );
    }

    #[concordium_test]
    fn test_deposit_group_rejects_bad_input() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = staged(&mut state_builder, &mut minter);
        let mut logger = TestLogger::init();

        let result = collection.deposit_group(
            String::new(),
            mint_data("alice", 1),
            mint(&mut minter, "alice", 1, 1),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        let result =
            collection.deposit_group("G3".to_string(), mint_data("alice", 1), Vec::new(), &mut logger);
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        let result = collection.deposit_group(
            "G3".to_string(),
            mint_data("alice", 0),
            mint(&mut minter, "alice", 1, 1),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        let result = collection.deposit_group(
            "G1".to_string(),
            mint_data("alice", 1),
            mint(&mut minter, "alice", 1, 1),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::DuplicateGroup.into()));
        claim_eq!(logger.logs.len(), 0);
    }

    #[concordium_test]
    fn test_add_more_nfts() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = staged(&mut state_builder, &mut minter);
        let mut logger = TestLogger::init();

        let extra = mint(&mut minter, "alice", 1, 1);
        collection
            .add_more_nfts_to_deposited_group("G1".to_string(), extra, &mut logger)
            .expect_report("Adding NFTs failed");
        claim_eq!(
            collection.get_group_info(&"G1".to_string()).map(|group| group.nft_ids),
            Ok(vec![1, 2, 4])
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MoonNftEvent::GroupUpdated(NftGroupEvent {
                group_id: "G1".to_string(),
                nft_ids: vec![4],
            }))]
        );

        let result =
            collection.add_more_nfts_to_deposited_group("G1".to_string(), Vec::new(), &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));

        let missing = mint(&mut minter, "alice", 1, 1);
        let result =
            collection.add_more_nfts_to_deposited_group("G9".to_string(), missing, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));
    }

    #[concordium_test]
    fn test_group_size_is_capped() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = staged(&mut state_builder, &mut minter);
        let mut logger = TestLogger::init();

        let oversized = mint(&mut minter, "carol", 3, MAX_NFTS_PER_GROUP + 1);
        let result =
            collection.deposit_group("G3".to_string(), mint_data("carol", 3), oversized, &mut logger);
        claim_eq!(result, Err(CustomContractError::TooManyNfts.into()));
        claim!(!collection.group_id_exists(&"G3".to_string()));

        let filling = mint(&mut minter, "alice", 1, MAX_NFTS_PER_GROUP - 2);
        collection
            .add_more_nfts_to_deposited_group("G1".to_string(), filling, &mut logger)
            .expect_report("Filling G1 failed");
        claim_eq!(collection.ensure_room(&"G1".to_string(), 0), Ok(()));
        claim_eq!(
            collection.ensure_room(&"G1".to_string(), 1),
            Err(CustomContractError::TooManyNfts.into())
        );

        let extra = mint(&mut minter, "alice", 1, 1);
        let result = collection.add_more_nfts_to_deposited_group("G1".to_string(), extra, &mut logger);
        claim_eq!(result, Err(CustomContractError::TooManyNfts.into()));
        claim_eq!(collection.held_count(&["G1".to_string()]), MAX_NFTS_PER_GROUP);

        // A full group still leaves in one call
        let mut logger = TestLogger::init();
        let nfts = collection
            .withdraw_all_nfts_for_group("G1".to_string(), &mut logger)
            .expect_report("Withdrawing a full group failed");
        claim_eq!(nfts.len(), MAX_NFTS_PER_GROUP);
        claim_eq!(count_events(&logger.logs, MOON_NFTS_PICKED_TAG), 1);
    }

    #[concordium_test]
    fn test_pick_nfts() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = staged(&mut state_builder, &mut minter);
        let mut logger = TestLogger::init();

        let picked = collection
            .pick_nfts(vec!["G2".to_string(), "G1".to_string()], &mut logger)
            .expect_report("Picking failed");
        let ids: Vec<NftId> = picked.iter().map(MoonNft::id).collect();
        claim_eq!(ids, vec![3, 1, 2]);
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MoonNftEvent::NftsPicked(MoonNftsPickedEvent {
                nft_ids: vec![3, 1, 2],
            }))]
        );
        claim_eq!(collection.get_all_groups(), Vec::new());
        claim_eq!(collection.get_all_nft_ids(), Vec::new());

        // Emptied ids stay reserved
        let result = collection.pick_nfts(vec!["G1".to_string()], &mut logger);
        claim_eq!(result, Err(CustomContractError::Exhausted.into()));
        let result = collection.deposit_group(
            "G1".to_string(),
            mint_data("alice", 1),
            mint(&mut minter, "alice", 1, 1),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::DuplicateGroup.into()));
    }

    #[concordium_test]
    fn test_pick_nfts_is_all_or_nothing() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = staged(&mut state_builder, &mut minter);
        let mut logger = TestLogger::init();

        let result = collection.pick_nfts(vec!["G1".to_string(), "G1".to_string()], &mut logger);
        claim_eq!(result, Err(CustomContractError::Exhausted.into()));

        let result = collection.pick_nfts(vec!["G1".to_string(), "G9".to_string()], &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));

        let result = collection.pick_nfts(Vec::new(), &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));

        claim_eq!(collection.get_all_nft_ids(), vec![1, 2, 3]);
        claim_eq!(logger.logs.len(), 0);
    }

    #[concordium_test]
    fn test_withdraw_all_nfts_for_group() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = staged(&mut state_builder, &mut minter);
        let mut logger = TestLogger::init();

        let result = collection.withdraw_all_nfts_for_group(String::new(), &mut logger);
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        let result = collection.withdraw_all_nfts_for_group("G9".to_string(), &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));

        let nfts = collection
            .withdraw_all_nfts_for_group("G1".to_string(), &mut logger)
            .expect_report("Withdrawal failed");
        claim_eq!(nfts.len(), 2);
        claim!(!collection.group_id_exists(&"G1".to_string()));

        let result = collection.withdraw_all_nfts_for_group("G1".to_string(), &mut logger);
        claim_eq!(result, Err(CustomContractError::Exhausted.into()));
        claim_eq!(count_events(&logger.logs, MOON_NFTS_PICKED_TAG), 1);
    }

    #[concordium_test]
    fn test_group_queries() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let collection = staged(&mut state_builder, &mut minter);

        let groups = collection.get_all_groups();
        claim_eq!(groups.len(), 2);
        claim_eq!(groups[0].group_id, "G1".to_string());
        claim_eq!(collection.get_all_nft_ids(), vec![1, 2, 3]);

        let by_creator = collection
            .get_group_info_by_creator("bob")
            .expect_report("bob has a group");
        claim_eq!(by_creator.len(), 1);
        claim_eq!(by_creator[0].group_id, "G2".to_string());

        let by_creator_id = collection
            .get_group_info_by_creator_id(1)
            .expect_report("Creator 1 has a group");
        claim_eq!(by_creator_id[0].nft_ids, vec![1, 2]);

        claim_eq!(
            collection.get_group_info_by_creator("carol"),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            collection.get_group_info_by_creator_id(7),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            collection.get_group_info(&String::new()),
            Err(CustomContractError::NotFound.into())
        );
    }
    #[concordium_test]
    fn test_withdrawn_group_is_gone_for_queries_and_additions() {
        let mut state_builder = TestStateBuilder::new();
        let mut minter = NftMinter::new();
        let mut collection = staged(&mut state_builder, &mut minter);
        let mut logger = TestLogger::init();

        collection
            .withdraw_all_nfts_for_group("G2".to_string(), &mut logger)
            .expect_report("Withdrawing G2 failed");

        claim_eq!(
            collection.get_group_info_by_creator("bob"),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            collection.get_group_info_by_creator_id(2),
            Err(CustomContractError::NotFound.into())
        );
        claim_eq!(
            collection.get_group_info(&"G2".to_string()),
            Err(CustomContractError::NotFound.into())
        );

        let extra = mint(&mut minter, "bob", 2, 1);
        let result = collection.add_more_nfts_to_deposited_group("G2".to_string(), extra, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotFound.into()));
        claim_eq!(collection.get_all_nft_ids(), vec![1, 2]);

        // alice still has her group
        claim_eq!(
            collection
                .get_group_info_by_creator("alice")
                .map(|groups| groups.len()),
            Ok(1)
        );
    }
}
