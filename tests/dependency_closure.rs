mod util;

use nodecut::prelude::*;
use std::collections::BTreeSet;
use util::*;

/// chain4 plus e4(n5,n6) in partition 1.
fn chain_with_tail() -> MeshModel {
    mesh_from(7, &[&[0, 1], &[1, 2], &[2, 3], &[3, 4], &[5, 6]])
}

#[test]
fn slave_in_one_partition_shares_its_master() {
    let mut mesh = chain_with_tail();
    mesh.set_constraint(5, Constraint::ExplicitMasters(vec![gid(3)]));
    let (cls, _, _) = closed(&mesh, vec![0, 0, 1, 1, 1], 2, ClosureMode::FixedPoint);
    assert!(cls.partitions[2].contains(&1));
    assert_eq!(cls.status[2], NodeStatus::Shared);
}

#[test]
fn local_master_becomes_shared() {
    // n1 is local to partition 0 until n5 (partition 1) depends on it
    let mut mesh = chain_with_tail();
    mesh.set_constraint(5, Constraint::ExplicitMasters(vec![gid(2)]));
    let (cls, _, report) = closed(&mesh, vec![0, 0, 1, 1, 1], 2, ClosureMode::FixedPoint);
    assert_eq!(cls.status[1], NodeStatus::Shared);
    assert_eq!(cls.partitions[1], BTreeSet::from([0, 1]));
    assert!(report.converged);
}

#[test]
fn rigid_arm_master_reaches_remote_partition() {
    let mut mesh = chain_with_tail();
    mesh.set_constraint(6, Constraint::RigidArm(vec![gid(1)]));
    let run = run(&mesh, vec![0, 0, 1, 1, 1], 2, ClosureMode::FixedPoint);
    assert_eq!(run.classification.partitions[0], BTreeSet::from([0, 1]));
    let p1 = &run.partitions[1];
    assert!(p1.is_shared(0));
    assert_eq!(p1.shared_nodes[&0], BTreeSet::from([0]));
}

#[test]
fn hanging_node_masters_are_the_element_nodes() {
    // n5 hangs on e1 = (n1, n2)
    let mut mesh = chain_with_tail();
    mesh.set_constraint(5, Constraint::HangingOnElement(Some(gid(2))));
    let deps = DependencyResolver::new(&mesh).resolve_all().unwrap();
    assert_eq!(deps.masters(5), &[1, 2]);

    let run = run(&mesh, vec![0, 0, 1, 1, 1], 2, ClosureMode::FixedPoint);
    let p1 = &run.partitions[1];
    assert!(p1.is_local(5));
    assert!(p1.is_shared(1));
    assert!(p1.is_shared(2));
}

#[test]
fn hanging_node_without_element_is_unsupported() {
    let mut mesh = chain_with_tail();
    mesh.set_constraint(5, Constraint::HangingOnElement(None));
    let cfg = NodeCutConfig::new(2).unwrap();
    let err = partition_mesh(&mesh, &ManualPartitioner::new(vec![0, 0, 1, 1, 1]), &cfg)
        .unwrap_err();
    assert_eq!(err, NodeCutError::UnsupportedConstraint { node: 6 });
}

#[test]
fn unknown_master_is_reported() {
    let mut mesh = chain_with_tail();
    mesh.set_constraint(5, Constraint::ExplicitMasters(vec![gid(42)]));
    assert!(matches!(
        DependencyResolver::new(&mesh).resolve_all(),
        Err(NodeCutError::UnknownNode { id: 42, .. })
    ));
}

/// Three single-node elements; n1 slave of n0, n2 slave of n1.
/// The pass visits n1 before n2, so partition 1 only reaches n0 through a
/// second pass.
fn reversed_chain() -> MeshModel {
    let mut mesh = mesh_from(3, &[&[0], &[1], &[2]]);
    mesh.set_constraint(1, Constraint::ExplicitMasters(vec![gid(1)]));
    mesh.set_constraint(2, Constraint::ExplicitMasters(vec![gid(2)]));
    mesh
}

#[test]
fn single_pass_leaves_two_level_chain_open() {
    let (cls, deps, report) = closed(&reversed_chain(), vec![0, 0, 1], 2, ClosureMode::SinglePass);
    assert!(!report.converged);
    assert!(!cls.is_accessible(0, 1));
    assert_eq!(nodecut::algs::closure::unsatisfied(&cls, &deps).unwrap(), vec![(1, 0)]);
}

#[test]
fn fixed_point_closes_two_level_chain() {
    let (cls, deps, report) = closed(&reversed_chain(), vec![0, 0, 1], 2, ClosureMode::FixedPoint);
    assert!(report.converged);
    assert!(cls.is_accessible(0, 1));
    assert!(nodecut::algs::closure::unsatisfied(&cls, &deps).unwrap().is_empty());

    let run = run(&reversed_chain(), vec![0, 0, 1], 2, ClosureMode::FixedPoint);
    assert!(run.partitions[1].is_accessible(0));
}

#[test]
fn closure_is_idempotent() {
    let mesh = reversed_chain();
    let (mut cls, deps, _) = closed(&mesh, vec![0, 0, 1], 2, ClosureMode::FixedPoint);
    let before = cls.clone();
    let report = propagate(&mut cls, &deps, ClosureMode::FixedPoint).unwrap();
    assert_eq!(report.passes, 1);
    assert_eq!(cls, before);
}
