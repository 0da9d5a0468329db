//! Feasibility scenarios validated against an in-memory unicast table.

use std::{net::Ipv4Addr, sync::Arc, thread};

use flowspec::{
    address::{Asn, Prefix},
    component::{Component, ComponentList},
    feasibility::{validate, Config, FeasibilityError, UnicastRib},
    route::{AsPath, FlowSpecRoute, UnicastRoute},
};

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

const LOCAL_ORIGINATOR: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);
const REMOTE_ORIGINATOR: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 10);

/// A unicast table answering queries by scanning all of its routes.
#[derive(Debug, Default)]
struct TableRib {
    routes: Vec<UnicastRoute>,
}

impl TableRib {
    fn with_route(
        mut self,
        prefix: &str,
        neighbor_as: u32,
        as_path: &[u32],
        originator_id: Ipv4Addr,
    ) -> TestResult<Self> {
        self.routes.push(UnicastRoute {
            prefix: prefix.parse()?,
            neighbor_as: Asn::new(neighbor_as),
            as_path: path(as_path),
            originator_id,
        });
        Ok(self)
    }
}

impl UnicastRib for TableRib {
    fn best_path(&self, prefix: Prefix) -> Option<UnicastRoute> {
        self.routes
            .iter()
            .filter(|route| route.prefix.covers(&prefix))
            .max_by_key(|route| route.prefix.bits())
            .cloned()
    }

    fn more_specifics(&self, prefix: Prefix) -> Vec<UnicastRoute> {
        self.routes
            .iter()
            .filter(|route| route.prefix.is_more_specific_than(&prefix))
            .cloned()
            .collect()
    }
}

fn path(asns: &[u32]) -> AsPath {
    asns.iter().copied().map(Asn::new).collect()
}

fn flowspec_rule(
    key: &ComponentList,
    from_ebgp: bool,
    as_path: &[u32],
    originator_id: Ipv4Addr,
) -> FlowSpecRoute {
    FlowSpecRoute {
        destination_prefix: key.destination_prefix().copied(),
        from_ebgp,
        neighbor_as: Asn::new(65001),
        as_path: path(as_path),
        originator_id,
    }
}

fn destination_key(prefix: &str) -> TestResult<ComponentList> {
    Ok(ComponentList::new(vec![Component::DestinationPrefix(
        prefix.parse()?,
    )])?)
}

fn upstream_rib() -> TestResult<TableRib> {
    TableRib::default()
        .with_route("0.0.0.0/0", 65010, &[65010], Ipv4Addr::new(192, 0, 2, 99))?
        .with_route("192.88.99.0/24", 65001, &[65001, 64496], REMOTE_ORIGINATOR)?
        .with_route("192.88.99.0/25", 65001, &[65001, 64496], REMOTE_ORIGINATOR)?
        .with_route("198.51.100.0/24", 65001, &[], LOCAL_ORIGINATOR)
}

#[test]
fn accepts_rule_from_best_path_originator() -> TestResult {
    let rib = upstream_rib()?;
    let rule = flowspec_rule(
        &destination_key("192.88.99.0/24")?,
        true,
        &[65001, 64512],
        REMOTE_ORIGINATOR,
    );

    assert_eq!(validate(&rule, &rib, None), Ok(()));
    Ok(())
}

#[test]
fn rejects_rule_without_covering_route() -> TestResult {
    let rib = TableRib::default().with_route(
        "198.51.100.0/24",
        65001,
        &[65001],
        REMOTE_ORIGINATOR,
    )?;
    let rule = flowspec_rule(
        &destination_key("192.0.2.0/24")?,
        false,
        &[65001],
        REMOTE_ORIGINATOR,
    );

    assert_eq!(
        validate(&rule, &rib, None),
        Err(FeasibilityError::NoBestUnicast)
    );
    Ok(())
}

#[test]
fn rejects_rule_without_destination_prefix() -> TestResult {
    let rib = upstream_rib()?;
    let key = ComponentList::new(vec![Component::SourcePrefix("203.0.113.0/24".parse()?)])?;
    let rule = flowspec_rule(&key, false, &[], LOCAL_ORIGINATOR);

    assert_eq!(
        validate(&rule, &rib, None),
        Err(FeasibilityError::NoDestinationPrefix)
    );

    let relaxed = Config {
        allow_no_destination_prefix: true,
        ..Config::default()
    };
    assert_eq!(validate(&rule, &rib, Some(&relaxed)), Ok(()));
    Ok(())
}

#[test]
fn rejects_rule_covering_more_specific_from_other_neighbor() -> TestResult {
    let rib = upstream_rib()?
        .with_route("192.88.99.128/25", 65002, &[65002], Ipv4Addr::new(192, 0, 2, 3))?;
    let rule = flowspec_rule(
        &destination_key("192.88.99.0/24")?,
        true,
        &[65001],
        REMOTE_ORIGINATOR,
    );

    assert_eq!(
        validate(&rule, &rib, None),
        Err(FeasibilityError::MoreSpecificFromOtherNeighbor)
    );
    Ok(())
}

#[test]
fn rejects_external_rule_with_other_left_most_as() -> TestResult {
    let rib = upstream_rib()?;
    let rule = flowspec_rule(
        &destination_key("192.88.99.0/24")?,
        true,
        &[65002, 65001],
        REMOTE_ORIGINATOR,
    );

    assert_eq!(
        validate(&rule, &rib, None),
        Err(FeasibilityError::LeftMostAsMismatch)
    );
    Ok(())
}

#[test]
fn rejects_external_rule_for_locally_originated_prefix() -> TestResult {
    let rib = upstream_rib()?;
    let rule = flowspec_rule(
        &destination_key("198.51.100.0/24")?,
        true,
        &[65001],
        LOCAL_ORIGINATOR,
    );

    assert_eq!(
        validate(&rule, &rib, None),
        Err(FeasibilityError::LeftMostAsMismatch)
    );
    Ok(())
}

#[test]
fn accepts_locally_originated_rule_for_any_originator() -> TestResult {
    let rib = upstream_rib()?;
    let rule = flowspec_rule(
        &destination_key("192.88.99.0/24")?,
        false,
        &[],
        LOCAL_ORIGINATOR,
    );

    assert_eq!(validate(&rule, &rib, None), Ok(()));

    let strict = Config {
        empty_as_path_relaxation: false,
        ..Config::default()
    };
    assert_eq!(
        validate(&rule, &rib, Some(&strict)),
        Err(FeasibilityError::OriginatorValidationFailed)
    );
    Ok(())
}

#[test]
fn falls_back_to_covering_route() -> TestResult {
    let rib = upstream_rib()?;
    let rule = flowspec_rule(
        &destination_key("203.0.113.0/24")?,
        false,
        &[65010],
        Ipv4Addr::new(192, 0, 2, 99),
    );

    assert_eq!(validate(&rule, &rib, None), Ok(()));
    Ok(())
}

#[test]
fn loaded_configuration_drives_validation() -> TestResult {
    let rib = upstream_rib()?;
    let config: Config = serde_json::from_str(
        r#"{ "allow_no_destination_prefix": false, "empty_as_path_relaxation": false }"#,
    )?;
    let rule = flowspec_rule(
        &destination_key("192.88.99.0/24")?,
        false,
        &[],
        LOCAL_ORIGINATOR,
    );

    assert_eq!(
        validate(&rule, &rib, Some(&config)),
        Err(FeasibilityError::OriginatorValidationFailed)
    );
    Ok(())
}

#[test]
fn concurrent_validations_agree() -> TestResult {
    let rib = Arc::new(upstream_rib()?);
    let rules = Arc::new(vec![
        flowspec_rule(&destination_key("192.88.99.0/24")?, true, &[65001], REMOTE_ORIGINATOR),
        flowspec_rule(&destination_key("192.88.99.0/24")?, true, &[65002], REMOTE_ORIGINATOR),
        flowspec_rule(&destination_key("198.51.100.0/24")?, true, &[65001], LOCAL_ORIGINATOR),
        flowspec_rule(&destination_key("192.0.2.0/24")?, false, &[], LOCAL_ORIGINATOR),
    ]);
    let expected: Vec<_> = rules
        .iter()
        .map(|rule| validate(rule, rib.as_ref(), None))
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let rib = Arc::clone(&rib);
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                rules
                    .iter()
                    .map(|rule| validate(rule, rib.as_ref(), None))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().map_err(|_| "validation thread panicked")?;
        assert_eq!(results, expected);
    }
    Ok(())
}

#[test]
fn error_messages_name_the_failed_rule() {
    assert!(FeasibilityError::NoDestinationPrefix
        .to_string()
        .contains("RFC 8955 6.a"));
    assert!(FeasibilityError::MoreSpecificFromOtherNeighbor
        .to_string()
        .contains("RFC 8955 6.c"));
    assert!(FeasibilityError::LeftMostAsMismatch
        .to_string()
        .contains("RFC 9117"));
}
