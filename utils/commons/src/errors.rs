use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Unauthorized (Error code: -4)
    Unauthorized,
    /// Malformed input such as blank strings or a zero creator id
    /// (Error code: -5)
    InvalidInput,
    /// An empty list was given where at least one element is required
    /// (Error code: -6)
    EmptyInput,
    /// Not Found (Error code: -7)
    NotFound,
    /// The id is already held by the target container (Error code: -8)
    DuplicateId,
    /// The group id has been used before (Error code: -9)
    DuplicateGroup,
    /// The entity existed but nothing is left to withdraw (Error code: -10)
    Exhausted,
    /// The receiving address has no collection installed (Error code: -11)
    CollectionNotInstalled,
    /// A group or pack would hold more NFTs than its events can list
    /// (Error code: -12)
    TooManyNfts,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
