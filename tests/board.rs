use std::collections::{HashMap, HashSet};

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use hexfield::board::{
    Board, BoardTopology, Layout, LayoutOverrides, NUMBER_TOKENS, PORT_COUNT, PORT_TYPES,
    PortError, TILE_RESOURCES, assign_ports,
};
use hexfield::types::Resource;

fn standard_topology() -> BoardTopology {
    BoardTopology::generate(Layout::standard()).unwrap()
}

#[test]
fn standard_topology_has_exact_counts() {
    let topology = standard_topology();
    assert_eq!(topology.hex_count(), 19);
    assert_eq!(topology.vertex_count(), 54);
    assert_eq!(topology.edge_count(), 72);
    assert_eq!(topology.border_edges().len(), 30);
}

#[test]
fn vertex_and_edge_incidence_is_well_formed() {
    let topology = standard_topology();

    for vertex in 0..topology.vertex_count() as u16 {
        let degree = topology.vertex_edges(vertex).len();
        assert!((2..=3).contains(&degree), "vertex {vertex} degree {degree}");
        assert_eq!(topology.vertex_neighbors(vertex).len(), degree);
        let hexes = topology.vertex_hexes(vertex).len();
        assert!((1..=3).contains(&hexes), "vertex {vertex} touches {hexes} hexes");
    }

    for edge in 0..topology.edge_count() as u16 {
        let (a, b) = topology.edge_vertices(edge);
        assert_ne!(a, b);
        let hexes = topology.edge_hexes(edge).len();
        assert!((1..=2).contains(&hexes), "edge {edge} borders {hexes} hexes");
        assert_eq!(topology.edge_between(a, b), Some(edge));
        assert_eq!(topology.edge_between(b, a), Some(edge));
    }
}

#[test]
fn each_hex_has_six_distinct_corners() {
    let topology = standard_topology();
    for hex in 0..topology.hex_count() as u8 {
        let corners: HashSet<u16> = topology.hex_vertices(hex).iter().copied().collect();
        assert_eq!(corners.len(), 6, "hex {hex}");
        let edges: HashSet<u16> = topology.hex_edges(hex).iter().copied().collect();
        assert_eq!(edges.len(), 6, "hex {hex}");
    }
}

#[test]
fn adjacent_hexes_share_two_corners_and_one_edge() {
    let topology = standard_topology();
    let hexes = topology.hex_count() as u8;
    for a in 0..hexes {
        for b in (a + 1)..hexes {
            let ca = topology.hex_coord(a);
            let cb = topology.hex_coord(b);
            let distance = (ca.x - cb.x)
                .abs()
                .max((ca.y - cb.y).abs())
                .max((ca.z - cb.z).abs());

            let va: HashSet<u16> = topology.hex_vertices(a).iter().copied().collect();
            let vb: HashSet<u16> = topology.hex_vertices(b).iter().copied().collect();
            let shared_vertices = va.intersection(&vb).count();

            let ea: HashSet<u16> = topology.hex_edges(a).iter().copied().collect();
            let eb: HashSet<u16> = topology.hex_edges(b).iter().copied().collect();
            let shared_edges = ea.intersection(&eb).count();

            if distance == 1 {
                assert_eq!(shared_vertices, 2, "hexes {a} and {b}");
                assert_eq!(shared_edges, 1, "hexes {a} and {b}");
            } else {
                assert!(shared_vertices <= 1, "hexes {a} and {b}");
                assert_eq!(shared_edges, 0, "hexes {a} and {b}");
            }
        }
    }
}

fn resource_histogram(tiles: impl Iterator<Item = Option<Resource>>) -> HashMap<Option<Resource>, usize> {
    let mut histogram = HashMap::new();
    for resource in tiles {
        *histogram.entry(resource).or_insert(0) += 1;
    }
    histogram
}

#[test]
fn shuffled_tiles_preserve_the_fixed_multisets() {
    let mut rng = StdRng::seed_from_u64(99);
    let board = Board::generate(&mut rng).unwrap();

    let expected = resource_histogram(TILE_RESOURCES.into_iter());
    let actual = resource_histogram(board.tiles.iter().map(|tile| tile.resource));
    assert_eq!(actual, expected);

    let mut numbers: Vec<u8> = board.tiles.iter().filter_map(|tile| tile.number).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, NUMBER_TOKENS.to_vec());

    for tile in &board.tiles {
        match tile.resource {
            Some(_) => {
                assert!(tile.number.is_some());
                assert!(!tile.has_robber);
            }
            None => {
                assert!(tile.number.is_none());
                assert!(tile.has_robber);
            }
        }
    }
    assert!(board.desert_hex().is_some());
}

#[test]
fn layout_overrides_pin_the_shuffles() {
    let mut resources = TILE_RESOURCES;
    resources.swap(0, 18); // desert first
    let numbers = NUMBER_TOKENS;

    let mut rng = StdRng::seed_from_u64(1);
    let overrides = LayoutOverrides {
        resources: Some(&resources),
        numbers: Some(&numbers),
        ports: None,
    };
    let board = Board::generate_with(overrides, &mut rng).unwrap();

    assert_eq!(board.desert_hex(), Some(0));
    assert!(board.tiles[0].has_robber);
    assert_eq!(board.tiles[1].resource, resources[1]);
    assert_eq!(board.tiles[1].number, Some(numbers[0]));
    assert_eq!(board.tiles[18].resource, resources[18]);
    assert_eq!(board.tiles[18].number, Some(numbers[17]));
}

#[test]
fn ports_land_on_nine_distinct_border_edges() {
    let topology = standard_topology();
    let mut rng = StdRng::seed_from_u64(5);
    let sites = assign_ports(&topology, |_| false, None, &mut rng).unwrap();

    assert_eq!(sites.len(), PORT_COUNT);
    let border: HashSet<u16> = topology.border_edges().iter().copied().collect();
    let edges: HashSet<u16> = sites.iter().map(|site| site.edge).collect();
    assert_eq!(edges.len(), PORT_COUNT, "port edges must be distinct");
    assert!(edges.iter().all(|edge| border.contains(edge)));

    let expected = resource_histogram(PORT_TYPES.into_iter());
    let actual = resource_histogram(sites.iter().map(|site| site.resource));
    assert_eq!(actual, expected);
}

#[test]
fn port_edges_are_stride_spaced_around_the_perimeter() {
    let topology = standard_topology();
    let mut rng = StdRng::seed_from_u64(5);
    let sites = assign_ports(&topology, |_| false, None, &mut rng).unwrap();

    // Recompute the clockwise-from-north ordering of the border edges around
    // their centroid and check the sites sit at every stride-th position.
    let border = topology.border_edges();
    let centroid_x = border
        .iter()
        .map(|&edge| topology.edge_midpoint(edge).x as f64)
        .sum::<f64>()
        / border.len() as f64;
    let centroid_y = border
        .iter()
        .map(|&edge| topology.edge_midpoint(edge).y as f64)
        .sum::<f64>()
        / border.len() as f64;
    let clockwise_angle = |edge: u16| {
        let midpoint = topology.edge_midpoint(edge);
        let dx = midpoint.x as f64 - centroid_x;
        let dy = midpoint.y as f64 - centroid_y;
        let angle = dx.atan2(-dy);
        if angle < 0.0 {
            angle + std::f64::consts::TAU
        } else {
            angle
        }
    };
    let mut ordered = border.to_vec();
    ordered.sort_by(|&a, &b| clockwise_angle(a).total_cmp(&clockwise_angle(b)));

    let stride = ordered.len() / PORT_COUNT;
    assert_eq!(stride, 3);
    let expected: Vec<u16> = (0..PORT_COUNT).map(|slot| ordered[slot * stride]).collect();
    let actual: Vec<u16> = sites.iter().map(|site| site.edge).collect();
    assert_eq!(actual, expected);
}

#[test]
fn port_positions_ignore_occupied_border_edges() {
    let topology = standard_topology();
    let blocked = topology.border_edges()[0];
    let mut rng = StdRng::seed_from_u64(5);
    let sites = assign_ports(&topology, |edge| edge == blocked, None, &mut rng).unwrap();
    assert!(sites.iter().all(|site| site.edge != blocked));
}

#[test]
fn port_assignment_needs_enough_free_border_edges() {
    let topology = standard_topology();
    let free: HashSet<u16> = topology.border_edges().iter().copied().take(8).collect();
    let mut rng = StdRng::seed_from_u64(5);
    let result = assign_ports(&topology, |edge| !free.contains(&edge), None, &mut rng);
    assert!(matches!(
        result,
        Err(PortError::NotEnoughBorderEdges { found: 8 })
    ));
}

#[test]
fn port_type_override_is_used_verbatim() {
    let topology = standard_topology();
    let types: [Option<Resource>; PORT_COUNT] = [
        Some(Resource::Ore),
        Some(Resource::Wheat),
        Some(Resource::Sheep),
        Some(Resource::Wood),
        Some(Resource::Brick),
        None,
        None,
        None,
        None,
    ];
    let mut rng = StdRng::seed_from_u64(5);
    let sites = assign_ports(&topology, |_| false, Some(&types), &mut rng).unwrap();
    let assigned: Vec<Option<Resource>> = sites.iter().map(|site| site.resource).collect();
    assert_eq!(assigned, types.to_vec());
}

#[test]
#[should_panic(expected = "already assigned")]
fn assigning_ports_twice_is_a_programming_error() {
    let mut rng = StdRng::seed_from_u64(5);
    let board = Board::generate(&mut rng).unwrap();
    board.assign_ports(|_| false, None, &mut rng).unwrap();
    let _ = board.assign_ports(|_| false, None, &mut rng);
}
