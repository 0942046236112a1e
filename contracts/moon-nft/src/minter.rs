use crate::events::*;
use crate::nft::*;
use commons::{ContractResult, CustomContractError, NftId, PackId};
use concordium_std::*;

/// Issues NFTs, packs and releases. The two counters are the only source of
/// ids in the contract.
#[derive(Debug, Serialize, SchemaType)]
pub struct NftMinter {
    next_nft_id: NftId,
    next_pack_id: PackId,
}

impl NftMinter {
    pub fn new() -> Self {
        Self {
            next_nft_id: 1,
            next_pack_id: 1,
        }
    }

    /// Id the next minted NFT will get.
    pub fn next_nft_id(&self) -> NftId {
        self.next_nft_id
    }

    pub fn next_pack_id(&self) -> PackId {
        self.next_pack_id
    }

    pub fn mint_nft(
        &mut self,
        data: MintData,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNft> {
        data.validate()?;
        self.mint_validated(data, logger)
    }

    /// Mints every element or nothing: the whole list is validated before the
    /// first id is handed out.
    pub fn bulk_mint_nfts(
        &mut self,
        data: Vec<MintData>,
        logger: &mut impl HasLogger,
    ) -> ContractResult<Vec<MoonNft>> {
        ensure!(!data.is_empty(), CustomContractError::EmptyInput.into());
        for item in data.iter() {
            item.validate()?;
        }

        data.into_iter()
            .map(|item| self.mint_validated(item, logger))
            .collect()
    }

    /// Seals `nfts` into a new pack.
    pub fn create_nft_pack(
        &mut self,
        nfts: Vec<MoonNft>,
        info: PackInfo,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNftPack> {
        ensure!(!nfts.is_empty(), CustomContractError::EmptyInput.into());
        ensure!(
            nfts.len() <= MAX_NFTS_PER_PACK,
            CustomContractError::TooManyNfts.into()
        );
        info.validate()?;
        self.pack_validated(nfts, info, logger)
    }

    /// Builds a release holding one pack per grouping key. Every pack shares
    /// `info`.
    pub fn create_nft_pack_release(
        &mut self,
        id: String,
        groupings: Vec<(String, Vec<MoonNft>)>,
        info: PackInfo,
        price: Amount,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNftRelease> {
        ensure_release_layout(&id, groupings.iter().map(|(key, nfts)| (key, nfts.len())))?;
        info.validate()?;

        let mut packs = Vec::with_capacity(groupings.len());
        for (pack_uuid, nfts) in groupings {
            let pack = self.pack_validated(nfts, info.clone(), logger)?;
            packs.push(ReleasePack { pack_uuid, pack });
        }

        let release = MoonNftRelease::new(id, info, price, packs);
        logger.log(&MoonNftEvent::PackReleaseCreated(MoonNftPackReleaseCreatedEvent {
            id: release.id().clone(),
            pack_uuids: release.available_pack_uuids(),
            price,
        }))?;

        Ok(release)
    }

    fn mint_validated(
        &mut self,
        data: MintData,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNft> {
        let id = self.next_nft_id;
        logger.log(&MoonNftEvent::Minted(MoonNftMintedEvent {
            id,
            creator: data.creator.clone(),
            creator_id: data.creator_id,
        }))?;

        self.next_nft_id += 1;
        Ok(MoonNft::new(id, data))
    }

    fn pack_validated(
        &mut self,
        nfts: Vec<MoonNft>,
        info: PackInfo,
        logger: &mut impl HasLogger,
    ) -> ContractResult<MoonNftPack> {
        let id = self.next_pack_id;
        let pack = MoonNftPack::new(id, info, nfts);
        logger.log(&MoonNftEvent::PackCreated(MoonNftPackCreatedEvent {
            id,
            collection_nft_ids: pack.nft_ids(),
        }))?;

        self.next_pack_id += 1;
        Ok(pack)
    }
}

/// Shape checks of a release: non-blank id, at least one grouping, and every
/// grouping key non-blank, distinct and backed by 1 to `MAX_NFTS_PER_PACK`
/// NFTs.
///
/// Takes `(key, nft count)` pairs so callers can check a release before they
/// gather its NFTs.
pub(crate) fn ensure_release_layout<'a>(
    id: &str,
    groupings: impl Iterator<Item = (&'a String, usize)>,
) -> ContractResult<()> {
    ensure!(!is_blank(id), CustomContractError::InvalidInput.into());

    let mut seen: Vec<&String> = Vec::new();
    for (pack_uuid, nft_count) in groupings {
        ensure!(!is_blank(pack_uuid), CustomContractError::InvalidInput.into());
        ensure!(nft_count > 0, CustomContractError::EmptyInput.into());
        ensure!(
            nft_count <= MAX_NFTS_PER_PACK,
            CustomContractError::TooManyNfts.into()
        );
        ensure!(!seen.contains(&pack_uuid), CustomContractError::DuplicateId.into());
        seen.push(pack_uuid);
    }
    ensure!(!seen.is_empty(), CustomContractError::EmptyInput.into());

    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use commons::*;
    use concordium_std::test_infrastructure::*;

    #[concordium_test]
    fn test_mint_nft() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let nft = minter
            .mint_nft(mint_data("testCreator", 1), &mut logger)
            .expect_report("Minting valid data failed");

        claim_eq!(nft.id(), 1);
        claim_eq!(nft.data(), &mint_data("testCreator", 1));
        claim_eq!(logger.logs.len(), 1, "One event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&MoonNftEvent::Minted(MoonNftMintedEvent {
                id: 1,
                creator: "testCreator".to_string(),
                creator_id: 1,
            }))
        );
    }

    #[concordium_test]
    fn test_mint_nft_rejects_invalid_data() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let mut blank_url = mint_data("testCreator", 1);
        blank_url.media_url = "  ".to_string();

        for data in vec![mint_data("", 1), mint_data("testCreator", 0), blank_url] {
            let result = minter.mint_nft(data, &mut logger);
            claim_eq!(result, Err(CustomContractError::InvalidInput.into()));
        }

        claim_eq!(logger.logs.len(), 0, "No event should be logged");
        claim_eq!(minter.next_nft_id(), 1, "No id should be consumed");
    }

    #[concordium_test]
    fn test_minted_ids_are_unique() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let single = minter
            .mint_nft(mint_data("a", 1), &mut logger)
            .expect_report("Minting failed");
        let batch = minter
            .bulk_mint_nfts(vec![mint_data("b", 2), mint_data("c", 3)], &mut logger)
            .expect_report("Bulk minting failed");

        let mut ids: Vec<NftId> = batch.iter().map(MoonNft::id).collect();
        ids.push(single.id());
        ids.sort_unstable();
        ids.dedup();
        claim_eq!(ids, vec![1, 2, 3]);
    }

    #[concordium_test]
    fn test_bulk_mint_is_all_or_nothing() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let result = minter.bulk_mint_nfts(vec![mint_data("a", 1), mint_data("", 1)], &mut logger);
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        let result = minter.bulk_mint_nfts(Vec::new(), &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));

        claim_eq!(minter.next_nft_id(), 1, "Nothing should be minted");
        claim_eq!(count_events(&logger.logs, MOON_NFT_MINTED_TAG), 0);
    }

    #[concordium_test]
    fn test_create_nft_pack() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let nfts = minter
            .bulk_mint_nfts(vec![mint_data("a", 1), mint_data("a", 1)], &mut logger)
            .expect_report("Bulk minting failed");
        let pack = minter
            .create_nft_pack(nfts, pack_info("a", 1), &mut logger)
            .expect_report("Pack creation failed");

        claim_eq!(pack.id(), 1);
        claim_eq!(
            pack.view(),
            MoonNftPackData {
                id: 1,
                collection_nft_ids: vec![1, 2],
                info: pack_info("a", 1),
            }
        );
        claim_eq!(count_events(&logger.logs, MOON_NFT_PACK_CREATED_TAG), 1);
    }

    #[concordium_test]
    fn test_create_nft_pack_rejects_bad_input() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let result = minter.create_nft_pack(Vec::new(), pack_info("a", 1), &mut logger);
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));

        let nfts = minter
            .bulk_mint_nfts(vec![mint_data("a", 1)], &mut logger)
            .expect_report("Bulk minting failed");
        let mut untitled = pack_info("a", 1);
        untitled.title = String::new();
        let result = minter.create_nft_pack(nfts, untitled, &mut logger);
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        let mut mint_logger = TestLogger::init();
        let nfts = minter
            .bulk_mint_nfts(vec![mint_data("a", 1); MAX_NFTS_PER_PACK + 1], &mut mint_logger)
            .expect_report("Bulk minting failed");
        let result = minter.create_nft_pack(nfts, pack_info("a", 1), &mut logger);
        claim_eq!(result, Err(CustomContractError::TooManyNfts.into()));
        claim_eq!(minter.next_pack_id(), 1);
    }

    #[concordium_test]
    fn test_create_nft_pack_release() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();

        let first = minter
            .bulk_mint_nfts(vec![mint_data("a", 1); 3], &mut logger)
            .expect_report("Bulk minting failed");
        let second = minter
            .bulk_mint_nfts(vec![mint_data("a", 1); 3], &mut logger)
            .expect_report("Bulk minting failed");

        let mut logger = TestLogger::init();
        let release = minter
            .create_nft_pack_release(
                "release-1".to_string(),
                vec![("uuid-1".to_string(), first), ("uuid-2".to_string(), second)],
                pack_info("a", 1),
                Amount::from_ccd(20),
                &mut logger,
            )
            .expect_report("Release creation failed");

        claim_eq!(release.id(), "release-1");
        claim_eq!(
            release.available_pack_uuids(),
            vec!["uuid-1".to_string(), "uuid-2".to_string()]
        );
        claim_eq!(count_events(&logger.logs, MOON_NFT_PACK_CREATED_TAG), 2);
        claim_eq!(count_events(&logger.logs, MOON_NFT_PACK_RELEASE_CREATED_TAG), 1);
    }

    #[concordium_test]
    fn test_create_nft_pack_release_rejects_bad_layout() {
        let mut minter = NftMinter::new();
        let mut logger = TestLogger::init();
        let mint = |minter: &mut NftMinter, logger: &mut TestLogger| {
            minter
                .bulk_mint_nfts(vec![mint_data("a", 1)], logger)
                .expect_report("Bulk minting failed")
        };

        let nfts = mint(&mut minter, &mut logger);
        let result = minter.create_nft_pack_release(
            String::new(),
            vec![("uuid".to_string(), nfts)],
            pack_info("a", 1),
            Amount::zero(),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));

        let result = minter.create_nft_pack_release(
            "release".to_string(),
            Vec::new(),
            pack_info("a", 1),
            Amount::zero(),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));

        let nfts = mint(&mut minter, &mut logger);
        let result = minter.create_nft_pack_release(
            "release".to_string(),
            vec![("uuid".to_string(), nfts), ("empty".to_string(), Vec::new())],
            pack_info("a", 1),
            Amount::zero(),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::EmptyInput.into()));

        let (left, right) = (mint(&mut minter, &mut logger), mint(&mut minter, &mut logger));
        let result = minter.create_nft_pack_release(
            "release".to_string(),
            vec![("uuid".to_string(), left), ("uuid".to_string(), right)],
            pack_info("a", 1),
            Amount::zero(),
            &mut logger,
        );
        claim_eq!(result, Err(CustomContractError::DuplicateId.into()));

        claim_eq!(minter.next_pack_id(), 1, "No pack should be created");
    }
}
