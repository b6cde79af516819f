use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use nodecut::prelude::*;

/// `n` × `n` quad grid where every node above the bottom row is slaved to
/// the node below it, giving a dependency chain down each column.
fn constrained_grid(n: usize) -> MeshModel {
    let row = n + 1;
    let elements = (0..n).flat_map(|j| {
        (0..n).map(move |i| {
            let n0 = j * row + i;
            vec![n0, n0 + 1, n0 + row + 1, n0 + row]
        })
    });
    let mut mesh = MeshModel::from_element_nodes(row * row, elements).expect("grid mesh");
    for j in 1..row {
        for i in 0..row {
            let below = GlobalId::new(((j - 1) * row + i + 1) as u64).expect("nonzero id");
            mesh.set_constraint(j * row + i, Constraint::ExplicitMasters(vec![below]));
        }
    }
    mesh
}

fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");

    for &n in &[16usize, 48] {
        let mesh = constrained_grid(n);
        let conn = ConnectivityIndex::build(&mesh);
        let deps = DependencyResolver::new(&mesh)
            .resolve_all()
            .expect("constraints resolve");
        let graph = build_dual(&mesh, &conn);
        let assignment = BlockPartitioner
            .partition(&graph, 4)
            .expect("block partition")
            .assignment;

        for mode in [ClosureMode::SinglePass, ClosureMode::FixedPoint] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        let mut cls = classify(&conn, &assignment).expect("classify");
                        black_box(propagate(&mut cls, &deps, mode).expect("closure"))
                    });
                },
            );
        }

        let cfg = NodeCutConfig::new(4).expect("config");
        group.bench_with_input(BenchmarkId::new("pipeline", n), &n, |b, _| {
            b.iter(|| black_box(partition_mesh(&mesh, &BlockPartitioner, &cfg).expect("run")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_closure);
criterion_main!(benches);
