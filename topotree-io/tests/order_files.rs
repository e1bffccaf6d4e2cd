//! Integration tests for topotree-io
//!
//! A decomposition is computed, written to disk, read back and replayed.

use topotree_core::{ContourTreeData, ScalarDomain};
use topotree_io::*;
use topotree_simplification::{Persistence, ReplayCriterion, SimplifyCt};

fn make_tree() -> ContourTreeData {
    // three minima joining through two saddles, then splitting into two maxima
    ContourTreeData::new(
        vec![0.0, 1.0, 2.0, 3.0, 5.0, 6.0, 9.0, 20.0],
        vec![(0, 3), (1, 3), (3, 4), (2, 4), (4, 5), (5, 6), (5, 7)],
    )
    .unwrap()
}

fn temp_prefix(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("topotree_it_{}_{}", name, std::process::id()))
}

#[test]
fn test_write_read_replay() -> anyhow::Result<()> {
    let tree = make_tree();
    let mut p = Persistence::new(&tree);
    let mut sim = SimplifyCt::new(&tree);
    sim.simplify(&mut p)?;
    let out = sim.simplification_order(&p)?;

    let prefix = temp_prefix("replay");
    write_order(&prefix, &out)?;
    let loaded = read_order(&prefix)?;
    assert_eq!(loaded, out);

    let mut replay = SimplifyCt::new(&tree);
    let removed = replay.simplify_with_order(&loaded.order, &loaded.weights, ReplayCriterion::TopK(2))?;
    assert_eq!(removed, loaded.len() - 2);
    for &b in loaded.top_k(2) {
        assert!(!replay.is_removed(b));
    }

    let (dat, bin) = order_paths(&prefix);
    std::fs::remove_file(dat)?;
    std::fs::remove_file(bin)?;
    Ok(())
}

#[test]
fn test_expected_order() -> anyhow::Result<()> {
    let tree = make_tree();
    let mut p = Persistence::new(&tree);
    let mut sim = SimplifyCt::new(&tree);
    // span 2 first, then the two span 3 leaves with the shorter index span first
    assert_eq!(sim.simplify(&mut p)?, &[1, 5, 3, 0]);
    let out = sim.simplification_order(&p)?;
    let expected = [0.1, 0.15, 0.15, 1.0];
    for (w, e) in out.weights.iter().zip(expected) {
        approx::assert_relative_eq!(*w, e);
    }
    Ok(())
}

#[test]
fn test_read_scalar_mesh() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("topotree_it_mesh_{}.txt", std::process::id()));
    std::fs::write(
        &path,
        "TRI\n5 4\n0 0 0 0.5\n1 0 0 1.5\n1 1 0 2.5\n0 1 0 3.5\n0.5 0.5 1 9\n\
         0 0 1 4\n0 1 2 4\n1 2 3 4\n1 3 0 4\n",
    )?;
    let mesh = ScalarMeshReader::read_mesh(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.max_degree(), 4);
    assert_eq!(mesh.star(4), vec![0, 1, 2, 3]);
    assert_eq!(mesh.sorted_vertices(), vec![0, 1, 2, 3, 4]);
    assert_eq!(mesh.partitions, vec![0, 0, 1, 1]);
    Ok(())
}
