mod common;

use common::{hex_grid, pack_140, SQRT3_2};
use packforge::error::PackForgeError;
use packforge::graph::{CellGraph, CellRecord, ChainGraph};

#[test]
fn test_hex_pack_shape() {
    let pack = pack_140();
    let g = &pack.graph;
    assert_eq!(g.len(), 140);
    // 10 rows x 13 in-row edges + 9 row pairs x 27 cross edges
    assert_eq!(g.edge_count(), 130 + 243);
    assert_eq!(g.edge_cells().len(), 44);
    for idx in 0..g.len() {
        assert!(g.degree(idx) <= 6);
        assert_eq!(g.is_edge_cell(idx), g.degree(idx) < 6);
    }
}

#[test]
fn test_adjacency_is_symmetric() {
    let pack = pack_140();
    let g = &pack.graph;
    for a in 0..g.len() {
        for &b in g.neighbors(a) {
            assert!(g.has_edge(b, a), "edge {} -> {} has no reverse", a, b);
        }
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let cells = hex_grid(4, 5, SQRT3_2);
    let mut reversed = cells.clone();
    reversed.reverse();

    let a = CellGraph::from_records(&cells).unwrap();
    let b = CellGraph::from_records(&reversed).unwrap();

    assert_eq!(a.ids(), b.ids());
    for idx in 0..a.len() {
        assert_eq!(a.neighbors(idx), b.neighbors(idx));
        assert_eq!(a.position(idx), b.position(idx));
        assert_eq!(a.is_edge_cell(idx), b.is_edge_cell(idx));
    }
}

#[test]
fn test_one_sided_listing_creates_edge() {
    let cells = vec![
        CellRecord::new(1, 0.0, 0.0).with_neighbor(0, 2),
        CellRecord::new(2, 1.0, 0.0),
    ];
    let g = CellGraph::from_records(&cells).unwrap();
    let (a, b) = (g.index_of(1).unwrap(), g.index_of(2).unwrap());
    assert!(g.has_edge(a, b));
    assert!(g.has_edge(b, a));
}

#[test]
fn test_malformed_records_are_rejected() {
    let dangling = vec![CellRecord::new(1, 0.0, 0.0).with_neighbor(2, 99)];
    assert!(matches!(
        CellGraph::from_records(&dangling),
        Err(PackForgeError::MalformedInput(_))
    ));

    let duplicate = vec![CellRecord::new(1, 0.0, 0.0), CellRecord::new(1, 1.0, 0.0)];
    assert!(matches!(
        CellGraph::from_records(&duplicate),
        Err(PackForgeError::MalformedInput(_))
    ));

    let selfloop = vec![CellRecord::new(3, 0.0, 0.0).with_neighbor(1, 3)];
    assert!(matches!(
        CellGraph::from_records(&selfloop),
        Err(PackForgeError::MalformedInput(_))
    ));

    assert!(CellGraph::from_records(&[]).is_err());
}

#[test]
fn test_cell_record_json_slots() {
    let json = r#"[{"n": 1, "x": 0.5, "y": 2.0, "0": 2, "4": 3},
                   {"n": 2, "x": 1.5, "y": 2.0},
                   {"n": 3}]"#;
    let cells: Vec<CellRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(cells[0].slots(), [Some(2), None, None, None, Some(3), None]);
    assert_eq!(cells[2].x, 0.0);

    let g = CellGraph::from_records(&cells).unwrap();
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.edge_cells(), vec![1, 2, 3]);
}

#[test]
fn test_chain_links() {
    let chain = ChainGraph::new(4);
    assert_eq!(chain.links().collect::<Vec<_>>(), vec![(1, 2), (2, 3), (3, 4)]);
    assert_eq!(chain.neighbors(4).collect::<Vec<_>>(), vec![3]);
}
