//! End-to-end compile scenarios
//!
//! These tests drive the public pipeline from templates to a wired graph
//! and check the addressing properties the interconnector guarantees.

use std::collections::{BTreeMap, HashSet};

use pretty_assertions::assert_eq;

use fabric_topology::fabric::{BuildError, FabricGraph, NodeSelector, Position};
use fabric_topology::template::{
    FabricSettings, FabricTemplate, NamedTemplate, PodTemplate, TemplateError, TierTemplate,
    VendorInfo,
};
use fabric_topology::{
    compile, compile_template, render_dot, render_json, CompileConfig, CompileError,
    ExportConfig, TemplateRegistry,
};

fn vendor(platform: &str) -> VendorInfo {
    VendorInfo::new("nokiaSROS", platform)
}

fn tier(n: u32, uplinks: u32) -> TierTemplate {
    TierTemplate::new(n, uplinks, vec![vendor("7750-SR1")])
}

/// Interface names used by `node` towards `peer`, in creation order
fn interfaces(graph: &FabricGraph, node: &str, peer: &str) -> Vec<String> {
    let mut result = Vec::new();
    for link in graph.links() {
        let from = graph.node(link.from).unwrap().label();
        let to = graph.node(link.to).unwrap().label();
        if from == node && to == peer {
            result.push(link.from_if.clone());
        } else if to == node && from == peer {
            result.push(link.to_if.clone());
        }
    }
    result
}

/// Every link keyed by its generated label
fn link_labels(graph: &FabricGraph) -> Vec<String> {
    graph.links().map(|l| graph.link_label(l)).collect()
}

// ============================================
// Scenario A: spine-leaf interface blocks
// ============================================

#[test]
fn test_scenario_a_interface_blocks() {
    let template = FabricTemplate {
        pod: vec![PodTemplate::inline(1, tier(2, 1), tier(2, 2))],
        settings: FabricSettings::new(2, 1, 16),
        ..FabricTemplate::default()
    };
    let fabric = compile_template(&template, &CompileConfig::default()).unwrap();
    let graph = fabric.graph();

    // 2 spines x 2 leafs x 2 uplinks
    assert_eq!(graph.link_count(), 8);
    assert_eq!(interfaces(graph, "pod1-spine1", "pod1-leaf1"), vec!["int-1/1", "int-1/2"]);
    assert_eq!(interfaces(graph, "pod1-spine1", "pod1-leaf2"), vec!["int-1/3", "int-1/4"]);
    assert_eq!(interfaces(graph, "pod1-leaf1", "pod1-spine1"), vec!["int-1/1", "int-1/2"]);
    assert_eq!(interfaces(graph, "pod1-leaf1", "pod1-spine2"), vec!["int-1/3", "int-1/4"]);
}

// ============================================
// Scenario B: vendor rotation
// ============================================

#[test]
fn test_scenario_b_vendor_rotation() {
    let template = FabricTemplate {
        pod: vec![PodTemplate::inline(
            1,
            tier(1, 1),
            TierTemplate::new(4, 1, vec![vendor("X"), vendor("Y")]),
        )],
        ..FabricTemplate::default()
    };
    let fabric = compile_template(&template, &CompileConfig::default()).unwrap();

    let assigned: Vec<(u32, String)> = fabric
        .select(&NodeSelector::position(Position::Leaf))
        .iter()
        .map(|n| (n.relative_index, n.platform().to_string()))
        .collect();
    assert_eq!(
        assigned,
        vec![
            (1, "X".to_string()),
            (2, "Y".to_string()),
            (3, "X".to_string()),
            (4, "Y".to_string()),
        ]
    );
}

// ============================================
// Scenario C: reference resolution
// ============================================

fn pod_template() -> FabricTemplate {
    FabricTemplate {
        pod: vec![PodTemplate {
            tier2: Some(tier(2, 1)),
            tier3: Some(tier(3, 1)),
            ..PodTemplate::default()
        }],
        ..FabricTemplate::default()
    }
}

#[test]
fn test_scenario_c_reference_inlined_verbatim() {
    let mut registry = TemplateRegistry::new();
    registry
        .register(NamedTemplate::master(
            "dc1",
            FabricTemplate {
                tier1: Some(tier(1, 0)),
                pod: vec![PodTemplate::reference("pod-a")],
                ..FabricTemplate::default()
            },
        ))
        .unwrap();
    registry
        .register(NamedTemplate::child("pod-a", pod_template()))
        .unwrap();

    let resolved = registry.resolve().unwrap();
    assert_eq!(resolved.pod.len(), 1);
    assert_eq!(resolved.pod[0].tier2, pod_template().pod[0].tier2);
    assert_eq!(resolved.pod[0].tier3, pod_template().pod[0].tier3);
    assert!(!resolved.has_reference());
    assert!(resolved.tier1.is_some());

    let fabric = compile(&registry, &CompileConfig::default()).unwrap();
    // 2 spines + 3 leafs + 2 planes x 1 superspine
    assert_eq!(fabric.graph().node_count(), 7);
}

#[test]
fn test_scenario_c_nested_reference_rejected() {
    let mut registry = TemplateRegistry::new();
    registry
        .register(NamedTemplate::master(
            "dc1",
            FabricTemplate {
                pod: vec![PodTemplate::reference("pod-a")],
                ..FabricTemplate::default()
            },
        ))
        .unwrap();
    registry
        .register(NamedTemplate::child(
            "pod-a",
            FabricTemplate {
                pod: vec![PodTemplate::reference("pod-b")],
                ..FabricTemplate::default()
            },
        ))
        .unwrap();
    registry
        .register(NamedTemplate::child("pod-b", pod_template()))
        .unwrap();

    let err = compile(&registry, &CompileConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Template(TemplateError::NestedReference { .. })
    ));
}

#[test]
fn test_unresolved_reference() {
    let mut registry = TemplateRegistry::new();
    registry
        .register(NamedTemplate::master(
            "dc1",
            FabricTemplate {
                pod: vec![PodTemplate::reference("missing")],
                ..FabricTemplate::default()
            },
        ))
        .unwrap();

    let err = compile(&registry, &CompileConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Template(TemplateError::UnresolvedReference { ref name }) if name == "missing"
    ));
}

// ============================================
// Determinism and growth
// ============================================

fn full_template(leaf_uplinks: u32, leafs: u32) -> FabricTemplate {
    FabricTemplate {
        tier1: Some(tier(2, 0)),
        border_leaf: Some(tier(2, 0)),
        pod: vec![
            // pod 1
            PodTemplate::inline(1, tier(2, 1), tier(leafs, leaf_uplinks)),
            // pods 2 and 4
            PodTemplate::inline(2, tier(3, 1), tier(2, 1)),
        ],
        settings: FabricSettings::new(2, 2, 4),
    }
}

#[test]
fn test_compile_is_deterministic() {
    let first = compile_template(&full_template(2, 3), &CompileConfig::default()).unwrap();
    let second = compile_template(&full_template(2, 3), &CompileConfig::default()).unwrap();

    let nodes = |g: &FabricGraph| g.nodes().map(|n| n.label()).collect::<Vec<_>>();
    assert_eq!(nodes(first.graph()), nodes(second.graph()));
    assert_eq!(link_labels(first.graph()), link_labels(second.graph()));

    let export = ExportConfig::default();
    assert_eq!(
        render_json(first.graph(), &export).unwrap(),
        render_json(second.graph(), &export).unwrap()
    );
    assert_eq!(render_dot(first.graph(), &export), render_dot(second.graph(), &export));
}

#[test]
fn test_growth_keeps_existing_links() {
    let before = compile_template(&full_template(1, 2), &CompileConfig::default()).unwrap();
    let more_uplinks = compile_template(&full_template(2, 2), &CompileConfig::default()).unwrap();
    let more_leafs = compile_template(&full_template(1, 3), &CompileConfig::default()).unwrap();

    let existing: HashSet<String> = link_labels(before.graph()).into_iter().collect();
    for grown in [&more_uplinks, &more_leafs] {
        let labels: HashSet<String> = link_labels(grown.graph()).into_iter().collect();
        assert!(existing.is_subset(&labels));
        assert!(labels.len() > existing.len());
    }
}

#[test]
fn test_no_interface_used_twice_per_pass() {
    let fabric = compile_template(&full_template(2, 3), &CompileConfig::default()).unwrap();
    let graph = fabric.graph();

    // (node, peer position, interface) must be unique
    let mut seen = HashSet::new();
    for link in graph.links() {
        let from = graph.node(link.from).unwrap();
        let to = graph.node(link.to).unwrap();
        assert!(seen.insert((from.label(), to.position, link.from_if.clone())));
        assert!(seen.insert((to.label(), from.position, link.to_if.clone())));
    }
}

// ============================================
// Plane alignment and capacity
// ============================================

#[test]
fn test_plane_alignment() {
    let fabric = compile_template(&full_template(1, 2), &CompileConfig::default()).unwrap();
    let graph = fabric.graph();

    // 3 planes: the largest spine count over all pods
    let planes: Vec<u32> = fabric
        .select(&NodeSelector::position(Position::Superspine))
        .iter()
        .filter_map(|n| n.plane_index())
        .collect();
    assert_eq!(planes, vec![1, 1, 2, 2, 3, 3]);

    let mut per_superspine: BTreeMap<String, usize> = BTreeMap::new();
    for link in graph.links() {
        let from = graph.node(link.from).unwrap();
        let to = graph.node(link.to).unwrap();
        if from.position == Position::Superspine {
            assert_eq!(from.plane_index(), Some(to.relative_index));
            *per_superspine.entry(from.label()).or_default() += 1;
        }
    }
    // planes 1 and 2 reach a spine in all 3 pods, plane 3 only in pods 2 and 4
    assert_eq!(per_superspine["plane1-superspine1"], 3);
    assert_eq!(per_superspine["plane2-superspine2"], 3);
    assert_eq!(per_superspine["plane3-superspine1"], 2);
}

#[test]
fn test_capacity_violation_creates_no_graph() {
    let err = compile_template(&full_template(3, 2), &CompileConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Build(BuildError::CapacityExceeded {
            setting: "maxUplinksTier3ToTier2",
            value: 3,
            limit: 2,
            ..
        })
    ));
    assert!(err.to_string().contains("pod1-leaf1"));
}

#[test]
fn test_spine_capacity_with_border_leafs_only() {
    let template = FabricTemplate {
        border_leaf: Some(tier(2, 0)),
        pod: vec![PodTemplate::inline(1, tier(2, 3), tier(2, 1))],
        settings: FabricSettings::new(1, 2, 4),
        ..FabricTemplate::default()
    };
    let err = compile_template(&template, &CompileConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Build(BuildError::CapacityExceeded {
            setting: "maxUplinksTier2ToTier1",
            value: 3,
            limit: 2,
            ..
        })
    ));
}

#[test]
fn test_oversized_settings_are_rejected() {
    let template = FabricTemplate {
        tier1: Some(tier(1, 0)),
        pod: vec![PodTemplate::inline(1, tier(1, 1), tier(3, 1))],
        settings: FabricSettings::new(u32::MAX / 2 + 1, 1, 4),
        ..FabricTemplate::default()
    };
    let err = compile_template(&template, &CompileConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Build(BuildError::IndexOverflow { .. })
    ));
    assert_eq!(
        err.to_string(),
        "build error: pod1-spine1: interface index towards pod1-leaf3 overflows"
    );
}

#[test]
fn test_empty_template() {
    let fabric = compile_template(&FabricTemplate::default(), &CompileConfig::default()).unwrap();
    assert!(fabric.graph().is_empty());
    assert_eq!(fabric.graph().link_count(), 0);
}

#[test]
fn test_pod_index_collision() {
    let template = FabricTemplate {
        pod: vec![
            PodTemplate::inline(2, tier(1, 1), tier(1, 1)),
            PodTemplate::inline(1, tier(1, 1), tier(1, 1)),
        ],
        ..FabricTemplate::default()
    };
    let err = compile_template(&template, &CompileConfig::default()).unwrap_err();
    assert!(matches!(err, CompileError::Build(BuildError::Validation { .. })));
}
