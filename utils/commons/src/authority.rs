use crate::{ContractResult, CustomContractError};
use concordium_std::*;

/// Platform roles of a contract instance.
///
/// Admins manage both lists. Maintainers operate the platform inventory and may
/// manage the maintainer list only.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct Authority<S: HasStateApi> {
    admins: StateSet<Address, S>,
    maintainers: StateSet<Address, S>,
}

impl<S: HasStateApi> Authority<S> {
    /// Roles of a fresh instance: `admin` is the only admin, no maintainers.
    pub fn new(state_builder: &mut StateBuilder<S>, admin: Address) -> Self {
        let mut admins = state_builder.new_set();
        admins.insert(admin);
        Self {
            admins,
            maintainers: state_builder.new_set(),
        }
    }

    pub fn has_admin_rights(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    pub fn has_maintainer_rights(&self, address: &Address) -> bool {
        self.maintainers.contains(address) || self.has_admin_rights(address)
    }

    /// Rejects with `Unauthorized` unless `sender` may operate the platform.
    pub fn ensure_maintainer(&self, sender: &Address) -> ContractResult<()> {
        ensure!(
            self.has_maintainer_rights(sender),
            CustomContractError::Unauthorized.into()
        );
        Ok(())
    }

    fn role(&self, field: &AuthorityField) -> &StateSet<Address, S> {
        match field {
            AuthorityField::Maintainer => &self.maintainers,
            AuthorityField::Admin => &self.admins,
        }
    }

    /// Admins edit both lists, maintainers only their own.
    fn ensure_may_edit(&self, sender: &Address, field: &AuthorityField) -> ContractResult<()> {
        match field {
            AuthorityField::Maintainer => self.ensure_maintainer(sender),
            AuthorityField::Admin => {
                ensure!(
                    self.has_admin_rights(sender),
                    CustomContractError::Unauthorized.into()
                );
                Ok(())
            }
        }
    }

    /// Adds or removes an address. Adding a present address or removing a
    /// missing one is not an error.
    pub fn handle_update(
        &mut self,
        sender: Address,
        update: AuthorityUpdateParams,
    ) -> ContractResult<()> {
        self.ensure_may_edit(&sender, &update.field)?;

        let AuthorityUpdateParams {
            field,
            kind,
            address,
        } = update;
        let role = match field {
            AuthorityField::Maintainer => &mut self.maintainers,
            AuthorityField::Admin => &mut self.admins,
        };
        match kind {
            AuthorityUpdateKind::Add => role.insert(address),
            AuthorityUpdateKind::Remove => role.remove(&address),
        };

        Ok(())
    }

    /// Addresses `skip..skip + show` of the requested list.
    pub fn handle_view(&self, view: AuthorityViewParams) -> Vec<Address> {
        let mut page = Vec::new();
        for address in self.role(&view.field).iter().skip(view.skip as usize) {
            if page.len() == view.show as usize {
                break;
            }
            page.push(*address);
        }
        page
    }
}

#[derive(Debug, SchemaType, Serialize)]
pub enum AuthorityField {
    Maintainer,
    Admin,
}

#[derive(Debug, SchemaType, Serialize)]
pub enum AuthorityUpdateKind {
    Remove,
    Add,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct AuthorityUpdateParams {
    pub field: AuthorityField,
    pub kind: AuthorityUpdateKind,
    pub address: Address,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct AuthorityViewParams {
    pub field: AuthorityField,
    pub skip: u32,
    pub show: u32,
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const PLATFORM: Address = Address::Account(AccountAddress([1; 32]));
    const OPERATOR: Address = Address::Account(AccountAddress([2; 32]));
    const COLLECTOR: Address = Address::Account(AccountAddress([3; 32]));
    const MARKET: Address = Address::Contract(ContractAddress {
        index: 7,
        subindex: 0,
    });

    fn platform_authority() -> Authority<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        let mut authority = Authority::new(&mut state_builder, PLATFORM);
        authority.maintainers.insert(OPERATOR);
        authority
    }

    fn update(field: AuthorityField, kind: AuthorityUpdateKind, address: Address) -> AuthorityUpdateParams {
        AuthorityUpdateParams {
            field,
            kind,
            address,
        }
    }

    #[concordium_test]
    fn test_deployer_is_admin_and_maintainer() {
        let authority = platform_authority();

        claim!(authority.has_admin_rights(&PLATFORM));
        claim!(authority.has_maintainer_rights(&PLATFORM));
        claim!(!authority.has_admin_rights(&OPERATOR));
        claim!(authority.has_maintainer_rights(&OPERATOR));
        claim_eq!(authority.ensure_maintainer(&OPERATOR), Ok(()));
        claim_eq!(
            authority.ensure_maintainer(&COLLECTOR),
            Err(CustomContractError::Unauthorized.into())
        );
    }

    #[concordium_test]
    fn test_maintainer_manages_maintainers_only() {
        let mut authority = platform_authority();

        let result = authority.handle_update(
            OPERATOR,
            update(AuthorityField::Maintainer, AuthorityUpdateKind::Add, MARKET),
        );
        claim_eq!(result, Ok(()));
        claim!(authority.has_maintainer_rights(&MARKET));

        let result = authority.handle_update(
            OPERATOR,
            update(AuthorityField::Admin, AuthorityUpdateKind::Add, COLLECTOR),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(!authority.has_admin_rights(&COLLECTOR));
    }

    #[concordium_test]
    fn test_outsider_cannot_update() {
        let mut authority = platform_authority();

        let result = authority.handle_update(
            COLLECTOR,
            update(AuthorityField::Maintainer, AuthorityUpdateKind::Add, COLLECTOR),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(!authority.has_maintainer_rights(&COLLECTOR));
    }

    #[concordium_test]
    fn test_admin_removes_maintainer() {
        let mut authority = platform_authority();

        let result = authority.handle_update(
            PLATFORM,
            update(AuthorityField::Maintainer, AuthorityUpdateKind::Remove, OPERATOR),
        );
        claim_eq!(result, Ok(()));
        claim!(!authority.has_maintainer_rights(&OPERATOR));

        // Removing again changes nothing
        let result = authority.handle_update(
            PLATFORM,
            update(AuthorityField::Maintainer, AuthorityUpdateKind::Remove, OPERATOR),
        );
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_view_pages_through_maintainers() {
        let mut authority = platform_authority();
        for n in 10u8..40u8 {
            authority
                .maintainers
                .insert(Address::Account(AccountAddress([n; 32])));
        }

        let first = authority.handle_view(AuthorityViewParams {
            field: AuthorityField::Maintainer,
            skip: 0,
            show: 20,
        });
        let rest = authority.handle_view(AuthorityViewParams {
            field: AuthorityField::Maintainer,
            skip: 20,
            show: 20,
        });

        claim_eq!(first.len(), 20);
        claim_eq!(rest.len(), 11);
        claim!(first.iter().chain(rest.iter()).any(|a| *a == OPERATOR));

        let admins = authority.handle_view(AuthorityViewParams {
            field: AuthorityField::Admin,
            skip: 0,
            show: 10,
        });
        claim_eq!(admins, vec![PLATFORM]);

        let past_end = authority.handle_view(AuthorityViewParams {
            field: AuthorityField::Maintainer,
            skip: 40,
            show: 10,
        });
        claim_eq!(past_end, Vec::new());
    }
}
