use std::collections::BTreeMap;

/// Merges the observed router addresses of pre-existing chains with the
/// addresses of a just-completed extension deployment into one coherent
/// `chain -> router address` map.
///
/// Pure data merge, no network calls. Addresses for existing chains are
/// authoritative and never overwritten by fresh deployments; only chains
/// absent from the observed set take the newly deployed address.
pub fn merge_all_routers(
    observed: &BTreeMap<String, String>,
    newly_deployed: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut routers = observed.clone();
    for (chain, address) in newly_deployed {
        routers.entry(chain.clone()).or_insert_with(|| address.clone());
    }
    routers
}
