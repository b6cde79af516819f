mod util;

use nodecut::prelude::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use util::gid;

#[derive(Clone, Debug)]
struct Case {
    mesh: MeshModel,
    parts: Vec<usize>,
    n_parts: usize,
}

/// Random element lists over a small node range, a few explicit slave →
/// master links, and a random assignment.
fn case() -> impl Strategy<Value = Case> {
    (2usize..20, 1usize..5)
        .prop_flat_map(|(node_count, n_parts)| {
            let elements =
                prop::collection::vec(prop::collection::vec(0..node_count, 1..5), 1..16);
            let links = prop::collection::vec((0..node_count, 0..node_count), 0..6);
            (Just(node_count), Just(n_parts), elements, links)
        })
        .prop_flat_map(|(node_count, n_parts, elements, links)| {
            let parts = prop::collection::vec(0..n_parts, elements.len());
            (Just(node_count), Just(n_parts), Just(elements), Just(links), parts)
        })
        .prop_map(|(node_count, n_parts, elements, links, parts)| {
            let mut mesh = MeshModel::from_element_nodes(node_count, elements).unwrap();
            let mut masters: BTreeMap<usize, Vec<GlobalId>> = BTreeMap::new();
            for (s, m) in links.into_iter().filter(|(s, m)| s != m) {
                masters.entry(s).or_default().push(gid(m as u64 + 1));
            }
            for (s, ids) in masters {
                mesh.set_constraint(s, Constraint::ExplicitMasters(ids));
            }
            Case {
                mesh,
                parts,
                n_parts,
            }
        })
}

fn run_case(case: &Case, mode: ClosureMode) -> PartitionedMesh {
    util::run(&case.mesh, case.parts.clone(), case.n_parts, mode)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_meshed_node_is_emitted(case in case()) {
        let run = run_case(&case, ClosureMode::FixedPoint);
        let conn = ConnectivityIndex::build(&case.mesh);
        for n in 0..case.mesh.node_count() {
            if !conn.incident(n).is_empty() {
                prop_assert!(run.partitions.iter().any(|l| l.is_accessible(n)), "node {} missing", n);
            }
        }
    }

    #[test]
    fn local_nodes_are_exclusive(case in case()) {
        let run = run_case(&case, ClosureMode::FixedPoint);
        let conn = ConnectivityIndex::build(&case.mesh);
        let mut owner: BTreeMap<usize, usize> = BTreeMap::new();
        for list in &run.partitions {
            for &n in &list.local_nodes {
                prop_assert!(owner.insert(n, list.partition).is_none(), "node {} local twice", n);
                prop_assert!(!list.is_shared(n));
                for &e in conn.incident(n) {
                    prop_assert_eq!(case.parts[e], list.partition);
                }
            }
        }
    }

    #[test]
    fn masters_reachable_after_fixed_point(case in case()) {
        let run = run_case(&case, ClosureMode::FixedPoint);
        prop_assert!(run.closure.converged);
        let deps = DependencyResolver::new(&case.mesh).resolve_all().unwrap();
        for (s, dep) in deps.iter() {
            for p in &run.classification.partitions[s] {
                let list = &run.partitions[*p];
                prop_assert!(list.is_accessible(s));
                for &m in &dep.masters {
                    prop_assert!(list.is_accessible(m), "master {} of {} missing in {}", m, s, p);
                }
            }
        }
    }

    #[test]
    fn shared_annotations_come_from_incident_elements(case in case()) {
        let run = run_case(&case, ClosureMode::FixedPoint);
        let conn = ConnectivityIndex::build(&case.mesh);
        for list in &run.partitions {
            for (&n, remote) in &list.shared_nodes {
                let mut expected = conn.incident_partitions(n, &run.assignment);
                expected.remove(&list.partition);
                prop_assert_eq!(remote, &expected);
            }
        }
    }

    #[test]
    fn classification_is_idempotent(case in case(), single in any::<bool>()) {
        let mode = if single { ClosureMode::SinglePass } else { ClosureMode::FixedPoint };
        let first = run_case(&case, mode);
        let second = run_case(&case, mode);
        prop_assert_eq!(&first.classification, &second.classification);
        prop_assert_eq!(&first.partitions, &second.partitions);
    }

    #[test]
    fn fixed_point_only_grows_single_pass(case in case()) {
        let single = run_case(&case, ClosureMode::SinglePass);
        let fixed = run_case(&case, ClosureMode::FixedPoint);
        for (a, b) in single.classification.partitions.iter().zip(&fixed.classification.partitions) {
            prop_assert!(a.is_subset(b));
        }
        // statuses may still differ: a later pass can mark a master shared
        // because its slave became shared
        if single.closure.converged {
            prop_assert_eq!(&single.classification.partitions, &fixed.classification.partitions);
        }
    }
}

#[test]
fn single_pass_counterexample_exists() {
    // n2 → n1 → n0, each node alone in its element; n0, n1 in partition 0
    let mut mesh = util::mesh_from(3, &[&[0], &[1], &[2]]);
    mesh.set_constraint(1, Constraint::ExplicitMasters(vec![gid(1)]));
    mesh.set_constraint(2, Constraint::ExplicitMasters(vec![gid(2)]));
    let single = util::run(&mesh, vec![0, 0, 1], 2, ClosureMode::SinglePass);
    assert!(!single.closure.converged);
    assert_eq!(single.classification.partitions[0], BTreeSet::from([0]));
    let fixed = util::run(&mesh, vec![0, 0, 1], 2, ClosureMode::FixedPoint);
    assert_eq!(fixed.classification.partitions[0], BTreeSet::from([0, 1]));
}
