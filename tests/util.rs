#![allow(dead_code)]
use nodecut::prelude::*;

pub fn gid(u: u64) -> GlobalId {
    GlobalId::new(u).unwrap()
}

/// Build a mesh from element node lists (local indices); ids are 1-based.
pub fn mesh_from(node_count: usize, elements: &[&[usize]]) -> MeshModel {
    MeshModel::from_element_nodes(node_count, elements.iter().map(|e| e.to_vec())).unwrap()
}

/// e0(n0,n1) e1(n1,n2) e2(n2,n3) e3(n3,n4).
pub fn chain4() -> MeshModel {
    mesh_from(5, &[&[0, 1], &[1, 2], &[2, 3], &[3, 4]])
}

/// Classification and closure for a fixed assignment.
pub fn closed(
    mesh: &MeshModel,
    parts: Vec<usize>,
    n_parts: usize,
    mode: ClosureMode,
) -> (NodeClassification, DependencyTable, ClosureReport) {
    let conn = ConnectivityIndex::build(mesh);
    let assignment = PartitionAssignment::new(parts, n_parts).unwrap();
    let deps = DependencyResolver::new(mesh).resolve_all().unwrap();
    let mut cls = classify(&conn, &assignment).unwrap();
    let report = propagate(&mut cls, &deps, mode).unwrap();
    (cls, deps, report)
}

/// Full pipeline run with a fixed assignment.
pub fn run(mesh: &MeshModel, parts: Vec<usize>, n_parts: usize, mode: ClosureMode) -> PartitionedMesh {
    let cfg = NodeCutConfig::new(n_parts).unwrap().with_closure(mode);
    partition_mesh(mesh, &ManualPartitioner::new(parts), &cfg).unwrap()
}

/// `nx` × `ny` grid of 4-node quads; node (i, j) has index `j * (nx + 1) + i`.
pub fn quad_grid(nx: usize, ny: usize) -> MeshModel {
    let row = nx + 1;
    let elements = (0..ny).flat_map(|j| {
        (0..nx).map(move |i| {
            let n0 = j * row + i;
            vec![n0, n0 + 1, n0 + row + 1, n0 + row]
        })
    });
    MeshModel::from_element_nodes(row * (ny + 1), elements).unwrap()
}
