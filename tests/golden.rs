//! Golden tests for the network analysis kernel.
//!
//! These tests verify determinism and correctness of the traversal engines
//! through the analyser session.

use std::collections::BTreeSet;

use network_analysis_kernel::{
    canonical_hash_hex, routing_query, AnalyserConfig, Analyser, AnalysisError, ConnectionRecord,
    Direction, Gfid, GraphError, Path, InMemoryBlockedStore, JsonFileBlockedStore,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn id(v: i64) -> Gfid {
    Gfid::new(v)
}

fn ids(vs: &[i64]) -> Vec<Gfid> {
    vs.iter().copied().map(Gfid::new).collect()
}

fn vertices(path: &Path) -> Vec<Gfid> {
    path.vertices().collect()
}

fn diamond_records() -> Vec<ConnectionRecord> {
    //   1 --1-- 2
    //   |       |
    //  10       2
    //   |       |
    //   3 ------+
    //   |
    //   1
    //   |
    //   4
    vec![
        ConnectionRecord::bidirectional(1, 2, 12, 1.0),
        ConnectionRecord::bidirectional(2, 3, 23, 2.0),
        ConnectionRecord::bidirectional(1, 3, 13, 10.0),
        ConnectionRecord::bidirectional(3, 4, 34, 1.0),
    ]
}

fn diamond() -> Analyser<InMemoryBlockedStore> {
    let mut analyser = Analyser::new(InMemoryBlockedStore::new(), AnalyserConfig::default());
    let report = analyser.prepare_graph(diamond_records()).unwrap();
    assert!(report.is_clean());
    analyser
}

// ─────────────────────────────────────────────────────────────────────────────
// CORRECTNESS TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_golden_shortest_path() {
    let analyser = diamond();
    let path = analyser.shortest_path(id(1), id(4)).unwrap();

    assert_eq!(vertices(&path), ids(&[1, 2, 3, 4]));
    assert_eq!(path.edges().collect::<Vec<_>>(), ids(&[12, 23, 34]));
    assert_eq!(analyser.path_cost(&path).unwrap(), 4.0);
}

#[test]
fn test_golden_second_shortest_path() {
    let mut analyser = diamond();
    let paths = analyser.k_shortest_paths(id(1), id(4), 2).unwrap();

    assert_eq!(paths.len(), 2);
    assert_eq!(vertices(&paths[0]), ids(&[1, 2, 3, 4]));
    assert_eq!(vertices(&paths[1]), ids(&[1, 3, 4]));
    assert_eq!(analyser.path_cost(&paths[1]).unwrap(), 11.0);
}

#[test]
fn test_golden_blocked_interior_reroutes() {
    let mut analyser = diamond();
    analyser.block(id(2)).unwrap();

    let path = analyser.shortest_path(id(1), id(4)).unwrap();
    assert_eq!(vertices(&path), ids(&[1, 3, 4]));
    assert_eq!(analyser.path_cost(&path).unwrap(), 11.0);
}

#[test]
fn test_golden_blocked_start_still_routes() {
    let mut analyser = diamond();
    analyser.block(id(1)).unwrap();

    let path = analyser.shortest_path(id(1), id(4)).unwrap();
    assert_eq!(vertices(&path), ids(&[1, 2, 3, 4]));
}

#[test]
fn test_golden_blocked_cut_vertex() {
    let mut analyser = diamond();
    analyser.block(id(3)).unwrap();

    assert!(analyser.shortest_path(id(1), id(4)).unwrap().is_empty());
    assert!(analyser.k_shortest_paths(id(1), id(4), 3).unwrap().is_empty());

    let reached = analyser.connected_component(&BTreeSet::from([id(1)])).unwrap();
    assert!(reached.contains(&id(23)));
    assert!(!reached.contains(&id(34)));
}

#[test]
fn test_golden_unblock_restores_paths() {
    let mut analyser = diamond();
    analyser.block(id(2)).unwrap();
    analyser.unblock(id(2)).unwrap();

    let path = analyser.shortest_path(id(1), id(4)).unwrap();
    assert_eq!(vertices(&path), ids(&[1, 2, 3, 4]));
}

#[test]
fn test_golden_blocking_errors() {
    let mut analyser = diamond();

    assert!(matches!(
        analyser.block(id(99)),
        Err(AnalysisError::Graph(GraphError::VertexNotFound(_)))
    ));
    assert!(matches!(
        analyser.unblock(id(1)),
        Err(AnalysisError::Graph(GraphError::NotBlocked(_)))
    ));

    analyser.block(id(1)).unwrap();
    assert!(matches!(
        analyser.block(id(1)),
        Err(AnalysisError::Graph(GraphError::AlreadyBlocked(_)))
    ));
}

#[test]
fn test_golden_directed_network() {
    let mut analyser = Analyser::new(InMemoryBlockedStore::new(), AnalyserConfig::default());
    analyser
        .prepare_graph(vec![
            ConnectionRecord::new(1, 2, 12, Direction::SourceToTarget, 1.0, 1.0),
            ConnectionRecord::new(3, 2, 23, Direction::TargetToSource, 1.0, 1.0),
        ])
        .unwrap();

    assert_eq!(vertices(&analyser.shortest_path(id(1), id(3)).unwrap()), ids(&[1, 2, 3]));
    assert!(analyser.shortest_path(id(3), id(1)).unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// DETERMINISM TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_golden_determinism_across_runs() {
    let reference = {
        let mut analyser = diamond();
        let paths = analyser.k_shortest_paths(id(1), id(4), 4).unwrap();
        canonical_hash_hex(&paths)
    };

    for _ in 0..100 {
        let mut analyser = diamond();
        let paths = analyser.k_shortest_paths(id(1), id(4), 4).unwrap();
        assert_eq!(canonical_hash_hex(&paths), reference);
    }
}

#[test]
fn test_golden_record_order_does_not_change_snapshot() {
    let forward = diamond();
    let mut reversed = Analyser::new(InMemoryBlockedStore::new(), AnalyserConfig::default());
    reversed
        .prepare_graph(diamond_records().into_iter().rev())
        .unwrap();

    assert_eq!(
        forward.snapshot().unwrap().snapshot_id,
        reversed.snapshot().unwrap().snapshot_id
    );
}

#[test]
fn test_golden_snapshot_unchanged_after_k_paths() {
    let mut analyser = diamond();
    analyser.block(id(2)).unwrap();
    let before = analyser.snapshot().unwrap();

    analyser.k_shortest_paths(id(1), id(4), 5).unwrap();

    assert!(before.verify(analyser.graph().unwrap()));
}

// ─────────────────────────────────────────────────────────────────────────────
// PERSISTENCE TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_golden_blocked_set_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocked.json");

    {
        let store = JsonFileBlockedStore::open(&path).unwrap();
        let mut analyser = Analyser::new(store, AnalyserConfig::default());
        analyser.prepare_graph(diamond_records()).unwrap();
        analyser.block(id(2)).unwrap();
    }

    let store = JsonFileBlockedStore::open(&path).unwrap();
    let mut analyser = Analyser::new(store, AnalyserConfig::default());
    analyser.prepare_graph(diamond_records()).unwrap();

    assert!(analyser.is_blocked(id(2)));
    let result = routing_query(&mut analyser, id(1), id(4), 1).unwrap();
    assert_eq!(vertices(&result.routes[0].path), ids(&[1, 3, 4]));
}
