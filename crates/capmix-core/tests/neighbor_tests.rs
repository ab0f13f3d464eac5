use capmix_core::error::CapmixError;
use capmix_core::geometry::Site;
use capmix_core::neighbors::NeighborGraph;
use rstest::rstest;

fn brute_force(sites: &[Site], radius: f32) -> Vec<Vec<u32>> {
    let r2 = radius * radius;
    (0..sites.len())
        .map(|i| {
            (0..sites.len())
                .filter(|&j| j != i && sites[i].dist2(&sites[j]) <= r2)
                .map(|j| j as u32)
                .collect()
        })
        .collect()
}

fn random_sites(count: usize, extent: f32, seed: u64) -> Vec<Site> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|_| Site {
            x: rng.f32() * extent,
            y: rng.f32() * extent,
        })
        .collect()
}

fn square_corners() -> Vec<Site> {
    vec![
        Site { x: 0.0, y: 0.0 },
        Site { x: 10.0, y: 0.0 },
        Site { x: 0.0, y: 10.0 },
        Site { x: 10.0, y: 10.0 },
    ]
}

#[rstest]
#[case(50, 12.0, 1)]
#[case(200, 7.5, 2)]
#[case(500, 3.0, 3)]
#[case(40, 250.0, 4)] // radius spanning every site
fn matches_brute_force(#[case] count: usize, #[case] radius: f32, #[case] seed: u64) {
    let sites = random_sites(count, 100.0, seed);
    let graph = NeighborGraph::build(&sites, radius).unwrap();
    let expected = brute_force(&sites, radius);

    for i in 0..sites.len() {
        assert_eq!(graph.neighbors(i), expected[i].as_slice(), "site {i}");
    }
}

#[test]
fn neighborhood_is_symmetric() {
    let sites = random_sites(300, 80.0, 7);
    let graph = NeighborGraph::build(&sites, 9.0).unwrap();

    for i in 0..graph.len() {
        for &j in graph.neighbors(i) {
            assert!(
                graph.neighbors(j as usize).contains(&(i as u32)),
                "{j} lists {i} but not vice versa"
            );
        }
    }
}

#[test]
fn self_is_never_a_neighbor() {
    let sites = random_sites(100, 20.0, 11);
    let graph = NeighborGraph::build(&sites, 50.0).unwrap();
    for i in 0..graph.len() {
        assert!(!graph.neighbors(i).contains(&(i as u32)));
    }
}

#[test]
fn boundary_distance_is_included() {
    let sites = vec![Site { x: 0.0, y: 0.0 }, Site { x: 5.0, y: 0.0 }];
    let graph = NeighborGraph::build(&sites, 5.0).unwrap();
    assert_eq!(graph.neighbors(0), &[1]);
    assert_eq!(graph.neighbors(1), &[0]);
}

#[test]
fn square_radius_excludes_diagonal() {
    let graph = NeighborGraph::build(&square_corners(), 10.0).unwrap();
    // Adjacent corners are 10 apart, the diagonal ~14.14.
    assert_eq!(graph.neighbors(0), &[1, 2]);
    assert_eq!(graph.neighbors(1), &[0, 3]);
    assert_eq!(graph.neighbors(2), &[0, 3]);
    assert_eq!(graph.neighbors(3), &[1, 2]);
    assert!((graph.mean_degree() - 2.0).abs() < 1e-6);
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(-0.001)]
fn rejects_nonpositive_radius(#[case] radius: f32) {
    let err = NeighborGraph::build(&square_corners(), radius).unwrap_err();
    assert!(matches!(err, CapmixError::InvalidRadius(_)), "{err}");
}

#[test]
fn rejects_empty_site_set() {
    let err = NeighborGraph::build(&[], 5.0).unwrap_err();
    assert!(matches!(err, CapmixError::EmptySiteSet), "{err}");
}

#[test]
fn single_site_has_no_neighbors() {
    let graph = NeighborGraph::build(&[Site { x: 3.0, y: 4.0 }], 100.0).unwrap();
    assert_eq!(graph.len(), 1);
    assert!(graph.neighbors(0).is_empty());
}
