//! Secondary indices mapping a key (creator name or creator id) to the set of
//! primary keys stored under it. They are updated in the same call that
//! changes the primary map; an empty set is removed so that lookups of a key
//! with nothing left behave like lookups of an unknown key.

use commons::{ContractResult, CustomContractError};
use concordium_std::*;

pub(crate) type Index<K, V, S> = StateMap<K, StateSet<V, S>, S>;

pub(crate) fn index_insert<K, V, S>(
    index: &mut Index<K, V, S>,
    key: K,
    value: V,
    state_builder: &mut StateBuilder<S>,
) where
    K: Serialize,
    V: Serialize,
    S: HasStateApi,
{
    let mut entries = index.entry(key).or_insert_with(|| state_builder.new_set());
    entries.insert(value);
}

pub(crate) fn index_remove<K, V, S>(index: &mut Index<K, V, S>, key: &K, value: &V)
where
    K: Serialize,
    V: Serialize,
    S: HasStateApi,
{
    let drained = match index.get_mut(key) {
        Some(mut entries) => {
            entries.remove(value);
            let drained = entries.iter().next().is_none();
            drained
        }
        None => false,
    };

    if drained {
        index.remove(key);
    }
}

/// Values stored under `key`. Fails with `NotFound` when there are none.
pub(crate) fn index_values<K, V, S>(index: &Index<K, V, S>, key: &K) -> ContractResult<Vec<V>>
where
    K: Serialize,
    V: Serialize + Clone,
    S: HasStateApi,
{
    let entries = index.get(key).ok_or(CustomContractError::NotFound)?;
    let values: Vec<V> = entries.iter().map(|value| value.clone()).collect();
    ensure!(!values.is_empty(), CustomContractError::NotFound.into());
    Ok(values)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    #[concordium_test]
    fn test_index_drops_drained_keys() {
        let mut state_builder = TestStateBuilder::new();
        let mut index: Index<String, u64, TestStateApi> = state_builder.new_map();

        index_insert(&mut index, "alice".to_string(), 1, &mut state_builder);
        index_insert(&mut index, "alice".to_string(), 2, &mut state_builder);
        index_insert(&mut index, "bob".to_string(), 3, &mut state_builder);

        let mut alice = index_values(&index, &"alice".to_string()).expect_report("alice is indexed");
        alice.sort_unstable();
        claim_eq!(alice, vec![1, 2]);

        index_remove(&mut index, &"alice".to_string(), &1);
        claim_eq!(index_values(&index, &"alice".to_string()), Ok(vec![2]));

        index_remove(&mut index, &"alice".to_string(), &2);
        claim_eq!(
            index_values(&index, &"alice".to_string()),
            Err(CustomContractError::NotFound.into())
        );
        claim!(index.get(&"alice".to_string()).is_none(), "Drained key should be removed");
        claim_eq!(index_values(&index, &"bob".to_string()), Ok(vec![3]));

        // Removing from an unknown key is a no-op
        index_remove(&mut index, &"carol".to_string(), &9);
        claim_eq!(index.iter().count(), 1);
    }
}
