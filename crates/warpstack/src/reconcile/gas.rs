use std::collections::BTreeMap;

use warpstack_cli_config::{RemoteRouterEntry, TokenRouterConfig};
use warpstack_cli_types::DomainId;

/// Explicit override-wins-over-default merge. The target's map, when set,
/// overrides the computed defaults key-by-key; unspecified keys keep their
/// defaults, and override-only keys are added.
pub fn merge_overrides<V: Clone>(
    defaults: BTreeMap<DomainId, V>,
    overrides: Option<&BTreeMap<DomainId, V>>,
) -> BTreeMap<DomainId, V> {
    let mut merged = defaults;
    if let Some(overrides) = overrides {
        for (domain, value) in overrides {
            merged.insert(*domain, value.clone());
        }
    }
    merged
}

/// Computes the remote-router and destination-gas maps chain `chain` should
/// have enrolled, covering every reachable remote chain with a deployed
/// router, then overlays the chain's explicit config overrides.
///
/// Default gas per destination: the destination chain's own `gas` override
/// if declared, else the protocol overhead for its token standard.
pub fn reconcile_router_and_gas_maps(
    chain: &str,
    remote_chains: &[String],
    domain_ids: &BTreeMap<String, DomainId>,
    deployed_routers: &BTreeMap<String, String>,
    targets: &BTreeMap<String, TokenRouterConfig>,
) -> (
    BTreeMap<DomainId, RemoteRouterEntry>,
    BTreeMap<DomainId, String>,
) {
    let mut default_routers = BTreeMap::new();
    let mut default_gas = BTreeMap::new();

    for other in remote_chains {
        if other == chain {
            continue;
        }
        // A chain without a deployed router cannot be a valid remote target.
        let Some(router) = deployed_routers.get(other) else {
            continue;
        };
        let Some(target) = targets.get(other) else {
            continue;
        };
        let Some(domain) = domain_ids.get(other) else {
            continue;
        };
        default_routers.insert(
            *domain,
            RemoteRouterEntry {
                address: router.clone(),
            },
        );
        let gas = target
            .gas
            .unwrap_or_else(|| target.standard.default_destination_gas());
        default_gas.insert(*domain, gas.to_string());
    }

    let config = targets.get(chain);
    let routers = merge_overrides(
        default_routers,
        config.and_then(|c| c.remote_routers.as_ref()),
    );
    let gas = merge_overrides(default_gas, config.and_then(|c| c.destination_gas.as_ref()));
    (routers, gas)
}

#[cfg(test)]
mod tests {
    use warpstack_cli_types::TokenStandard;

    use super::*;
    use crate::reconcile::testing::router_config;

    fn setup() -> (
        Vec<String>,
        BTreeMap<String, DomainId>,
        BTreeMap<String, String>,
        BTreeMap<String, TokenRouterConfig>,
    ) {
        let remotes = vec!["b".to_string(), "c".to_string()];
        let domains = BTreeMap::from([
            ("a".to_string(), DomainId(1)),
            ("b".to_string(), DomainId(2)),
            ("c".to_string(), DomainId(3)),
        ]);
        let routers = BTreeMap::from([
            ("a".to_string(), "0xa".to_string()),
            ("b".to_string(), "0xb".to_string()),
            ("c".to_string(), "0xc".to_string()),
        ]);
        let targets = BTreeMap::from([
            ("a".to_string(), router_config(TokenStandard::Collateral)),
            ("b".to_string(), router_config(TokenStandard::Synthetic)),
            ("c".to_string(), router_config(TokenStandard::Synthetic)),
        ]);
        (remotes, domains, routers, targets)
    }

    #[test]
    fn defaults_cover_all_deployed_remotes() {
        let (remotes, domains, routers, targets) = setup();
        let (remote_routers, gas) =
            reconcile_router_and_gas_maps("a", &remotes, &domains, &routers, &targets);

        assert_eq!(remote_routers.len(), 2);
        assert_eq!(remote_routers.get(&DomainId(2)).unwrap().address, "0xb");
        assert_eq!(
            gas.get(&DomainId(3)).unwrap(),
            &TokenStandard::Synthetic.default_destination_gas().to_string()
        );
    }

    #[test]
    fn undeployed_remote_is_excluded() {
        let (remotes, domains, mut routers, targets) = setup();
        routers.remove("c");
        let (remote_routers, gas) =
            reconcile_router_and_gas_maps("a", &remotes, &domains, &routers, &targets);

        assert!(remote_routers.get(&DomainId(3)).is_none());
        assert!(gas.get(&DomainId(3)).is_none());
    }

    #[test]
    fn destination_gas_override_on_destination_chain_applies() {
        let (remotes, domains, routers, mut targets) = setup();
        targets.get_mut("b").unwrap().gas = Some(123_456);
        let (_, gas) = reconcile_router_and_gas_maps("a", &remotes, &domains, &routers, &targets);

        assert_eq!(gas.get(&DomainId(2)).unwrap(), "123456");
    }

    #[test]
    fn partial_explicit_override_wins_key_by_key() {
        let (remotes, domains, routers, mut targets) = setup();
        targets.get_mut("a").unwrap().destination_gas =
            Some(BTreeMap::from([(DomainId(2), "999".to_string())]));
        targets.get_mut("a").unwrap().remote_routers = Some(BTreeMap::from([(
            DomainId(3),
            RemoteRouterEntry {
                address: "0xoverride".to_string(),
            },
        )]));

        let (remote_routers, gas) =
            reconcile_router_and_gas_maps("a", &remotes, &domains, &routers, &targets);

        // Overridden keys take the explicit value.
        assert_eq!(gas.get(&DomainId(2)).unwrap(), "999");
        assert_eq!(
            remote_routers.get(&DomainId(3)).unwrap().address,
            "0xoverride"
        );
        // Unmentioned keys keep the computed default.
        assert_eq!(
            gas.get(&DomainId(3)).unwrap(),
            &TokenStandard::Synthetic.default_destination_gas().to_string()
        );
        assert_eq!(remote_routers.get(&DomainId(2)).unwrap().address, "0xb");
    }
}
