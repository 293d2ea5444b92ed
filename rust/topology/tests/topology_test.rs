// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline tests: feature collections in, topology documents
//! out, and back again.

use topo_lite_geojson::{Feature, FeatureCollection, Geometry};
use topo_lite_topology::{ObjectGeometry, Topology, TopologyOptions};

fn feature(id: &str, geometry: Geometry) -> Feature {
    let mut f = Feature::new(geometry);
    f.set_property("id", id);
    f
}

fn square(x: f64, y: f64) -> Vec<[f64; 2]> {
    vec![
        [x, y],
        [x + 1.0, y],
        [x + 1.0, y + 1.0],
        [x, y + 1.0],
        [x, y],
    ]
}

#[test]
fn adjacent_polygons_share_one_arc_with_opposite_signs() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature("left", Geometry::polygon(vec![square(0.0, 0.0)])));
    // the right square walks the shared border in the opposite direction
    fc.add_feature(feature(
        "right",
        Geometry::polygon(vec![vec![
            [1.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 0.0],
        ]]),
    ));

    let topo = Topology::from_features(fc, TopologyOptions::default());

    // 2 perimeter arcs + 1 shared border arc
    assert_eq!(topo.arcs.len(), 3);

    let refs_of = |id: &str| match &topo.object(id).unwrap().geometry {
        ObjectGeometry::Polygon { arcs } => arcs[0].clone(),
        other => panic!("unexpected geometry: {other:?}"),
    };

    let left = refs_of("left");
    let right = refs_of("right");
    let shared_left = left
        .iter()
        .find(|r| right.iter().any(|s| s.index() == r.index()))
        .unwrap();
    let shared_right = right
        .iter()
        .find(|s| s.index() == shared_left.index())
        .unwrap();
    assert_ne!(shared_left.is_reversed(), shared_right.is_reversed());
}

#[test]
fn quantized_build_emits_transform_and_delta_arcs() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature(
        "line",
        Geometry::line_string(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
    ));

    let topo = Topology::from_features(
        fc,
        TopologyOptions {
            pre_quantize: 1e4,
            post_quantize: 1e4,
            ..Default::default()
        },
    );

    let transform = topo.transform.expect("quantized output keeps a transform");
    assert_eq!(transform.scale, [1.0 / 9999.0, 1.0 / 9999.0]);
    assert_eq!(transform.translate, [0.0, 0.0]);

    // delta encoding: first point absolute, then differences
    assert_eq!(
        topo.arcs[0],
        vec![[0.0, 0.0], [9999.0, 0.0], [0.0, 9999.0]]
    );

    let fc = topo.to_features().unwrap();
    assert_eq!(
        fc.features[0].geometry,
        Some(Geometry::line_string(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
        ]))
    );
}

#[test]
fn pre_quantization_disabled_output_stays_real_valued() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature(
        "line",
        Geometry::line_string(vec![[0.0, 0.0], [0.31, 0.77]]),
    ));

    let topo = Topology::from_features(
        fc.clone(),
        TopologyOptions {
            pre_quantize: 1e6,
            post_quantize: 0.0,
            ..Default::default()
        },
    );

    // integer output was not requested: no transform, absolute arcs
    assert!(topo.transform.is_none());
    let restored = topo.to_features().unwrap();
    let Some(Geometry::LineString { coordinates }) = &restored.features[0].geometry else {
        panic!("expected a LineString back");
    };
    // back in real space, within one grid cell of the input
    assert!((coordinates[1][0] - 0.31).abs() < 1e-5);
    assert!((coordinates[1][1] - 0.77).abs() < 1e-5);
}

#[test]
fn finer_working_grid_rescales_onto_the_output_grid() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature(
        "diag",
        Geometry::line_string(vec![[0.0, 0.0], [1.0, 1.0]]),
    ));

    let topo = Topology::from_features(
        fc,
        TopologyOptions {
            pre_quantize: 100.0, // topology inferred on a finer grid
            post_quantize: 10.0, // stored on a coarser one
            ..Default::default()
        },
    );

    let transform = topo.transform.unwrap();
    assert_eq!(transform.scale, [1.0 / 9.0, 1.0 / 9.0]);
    assert_eq!(topo.arcs[0], vec![[0.0, 0.0], [9.0, 9.0]]);

    let fc = topo.to_features().unwrap();
    assert_eq!(
        fc.features[0].geometry,
        Some(Geometry::line_string(vec![[0.0, 0.0], [1.0, 1.0]]))
    );
}

#[test]
fn simplification_preserves_arc_endpoints() {
    let mut fc = FeatureCollection::new();
    // two lines crossing at (5,0) force a junction mid-line
    fc.add_feature(feature(
        "wiggly",
        Geometry::line_string(vec![
            [0.0, 0.0],
            [1.0, 0.01],
            [2.0, -0.01],
            [5.0, 0.0],
            [7.0, 0.01],
            [10.0, 0.0],
        ]),
    ));
    fc.add_feature(feature(
        "crossing",
        Geometry::line_string(vec![[5.0, -5.0], [5.0, 0.0], [5.0, 5.0]]),
    ));

    let plain = Topology::from_features(fc.clone(), TopologyOptions::default());
    let simplified = Topology::from_features(
        fc,
        TopologyOptions {
            simplify: 1.0,
            ..Default::default()
        },
    );

    assert_eq!(plain.arcs.len(), simplified.arcs.len());
    for (full, slim) in plain.arcs.iter().zip(simplified.arcs.iter()) {
        assert_eq!(full.first(), slim.first());
        assert_eq!(full.last(), slim.last());
        assert!(slim.len() <= full.len());
        assert!(slim.len() >= 2);
    }
}

#[test]
fn simplification_can_prune_collapsed_polygons() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature("big", Geometry::polygon(vec![square(0.0, 0.0)])));
    fc.add_feature(feature(
        "speck",
        Geometry::polygon(vec![vec![
            [5.0, 5.0],
            [5.001, 5.0],
            [5.001, 5.001],
            [5.0, 5.0],
        ]]),
    ));

    let topo = Topology::from_features(
        fc,
        TopologyOptions {
            simplify: 0.01,
            ..Default::default()
        },
    );

    assert!(topo.object("big").is_some());
    assert!(topo.object("speck").is_none());
    assert_eq!(topo.arcs.len(), 1);
}

#[test]
fn point_features_pass_through() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature("point", Geometry::point([0.0, 0.0])));
    fc.add_feature(feature(
        "multipoint",
        Geometry::multi_point(vec![[0.0, 0.0], [1.0, 1.0]]),
    ));

    let topo = Topology::from_features(fc, TopologyOptions::default());

    assert!(topo.arcs.is_empty());
    assert_eq!(
        topo.object("point").unwrap().geometry,
        ObjectGeometry::Point {
            coordinates: [0.0, 0.0]
        }
    );
    assert_eq!(
        topo.object("multipoint").unwrap().geometry,
        ObjectGeometry::MultiPoint {
            coordinates: vec![[0.0, 0.0], [1.0, 1.0]]
        }
    );
}

#[test]
fn malformed_features_do_not_abort_the_build() {
    let mut fc = FeatureCollection::new();
    let mut broken = Feature::new(Geometry::line_string(vec![[0.0, 0.0]]));
    broken.set_property("id", "broken");
    broken.geometry = None;
    fc.add_feature(broken);
    fc.add_feature(feature(
        "ok",
        Geometry::line_string(vec![[0.0, 0.0], [1.0, 1.0]]),
    ));

    let topo = Topology::from_features(fc, TopologyOptions::default());
    assert_eq!(topo.objects.len(), 1);
    assert!(topo.object("ok").is_some());
}

#[test]
fn topology_json_document_round_trips() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature("left", Geometry::polygon(vec![square(0.0, 0.0)])));
    fc.add_feature(feature("right", Geometry::polygon(vec![square(1.0, 0.0)])));

    let topo = Topology::from_features(
        fc,
        TopologyOptions {
            pre_quantize: 1e4,
            post_quantize: 1e4,
            ..Default::default()
        },
    );

    let json = topo.to_json().unwrap();
    let back = Topology::from_json(&json).unwrap();
    assert_eq!(back, topo);

    // and the reconstruction still works on the reparsed document
    let fc = back.to_features().unwrap();
    assert_eq!(fc.features.len(), 2);
}

#[test]
fn filter_then_export_matches_direct_export() {
    let mut fc = FeatureCollection::new();
    fc.add_feature(feature("a", Geometry::polygon(vec![square(0.0, 0.0)])));
    fc.add_feature(feature("b", Geometry::polygon(vec![square(1.0, 0.0)])));
    fc.add_feature(feature("c", Geometry::polygon(vec![square(2.0, 0.0)])));

    let topo = Topology::from_features(
        fc,
        TopologyOptions {
            pre_quantize: 1e4,
            post_quantize: 1e4,
            ..Default::default()
        },
    );

    let filtered = topo.filter(&["a", "b"]);
    assert_eq!(filtered.objects.len(), 2);
    assert!(filtered.arcs.len() < topo.arcs.len());

    let all = topo.to_features().unwrap();
    let subset = filtered.to_features().unwrap();
    assert_eq!(subset.features[0], all.features[0]);
    assert_eq!(subset.features[1], all.features[1]);
}
