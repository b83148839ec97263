use std::cell::RefCell;
use std::time::{Duration, Instant};

use vizbind::{
    by_index, Attr, BindingSet, Bound, JoinReport, NodeId, Scene, SceneError, ShapeKind, Surface,
    TransitionConfig,
};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    key: u32,
    x: f64,
}

fn item(key: u32, x: f64) -> Item {
    Item { key, x }
}

fn setup() -> (Scene, BindingSet<u32>) {
    let mut scene = Scene::with_clock(Instant::now());
    let container = scene.append(NodeId::ROOT, ShapeKind::Group).unwrap();
    (scene, BindingSet::new(container, ShapeKind::Circle))
}

/// Refresh without transitions, placing each item at `cx = x`.
fn refresh_plain(
    set: &mut BindingSet<u32>,
    scene: &mut Scene,
    data: &[Item],
) -> JoinReport<u32> {
    let result: Result<_, SceneError> = set.refresh(
        scene,
        data,
        |_, d| d.key,
        |el, d| {
            el.set(Attr::Cx, d.x)?;
            Ok(())
        },
        |el, d| {
            el.animate(Attr::Cx, d.x)?;
            Ok(())
        },
        |_| Ok(()),
        None,
    );
    result.unwrap()
}

fn sorted(mut keys: Vec<u32>) -> Vec<u32> {
    keys.sort();
    keys
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_first_refresh_enters_every_key() {
    let (mut scene, mut set) = setup();

    let report = refresh_plain(&mut set, &mut scene, &[item(1, 5.0)]);

    assert_eq!(report.entered, vec![1]);
    assert!(report.updated.is_empty());
    assert!(report.exited.is_empty());
    assert_eq!(set.keys(), &[1]);

    let node = set.get(&1).unwrap();
    assert_eq!(scene.number(node, Attr::Cx), Some(5.0));
    assert_eq!(scene.kind(node), Some(ShapeKind::Circle));
}

#[test]
fn test_mixed_refresh_partitions_keys() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0), item(2, 0.0), item(3, 0.0)]);

    let report = refresh_plain(&mut set, &mut scene, &[item(2, 1.0), item(4, 1.0)]);

    assert_eq!(sorted(report.exited), vec![1, 3]);
    assert_eq!(report.updated, vec![2]);
    assert_eq!(report.entered, vec![4]);
    assert_eq!(set.keys(), &[2, 4]);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_partition_callbacks_called_once_each() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0), item(2, 0.0), item(3, 0.0)]);

    let entered = RefCell::new(Vec::new());
    let updated = RefCell::new(Vec::new());
    let exited = RefCell::new(Vec::new());
    let node_a = set.get(&1).unwrap();

    let result: Result<_, SceneError> = set.refresh(
        &mut scene,
        &[item(2, 0.0), item(3, 0.0), item(4, 0.0)],
        |_, d| d.key,
        |_, d| {
            entered.borrow_mut().push(d.key);
            Ok(())
        },
        |_, d| {
            updated.borrow_mut().push(d.key);
            Ok(())
        },
        |el| {
            exited.borrow_mut().push(el.node());
            Ok(())
        },
        None,
    );
    result.unwrap();

    assert_eq!(*entered.borrow(), vec![4]);
    assert_eq!(*updated.borrow(), vec![2, 3]);
    assert_eq!(*exited.borrow(), vec![node_a]);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_keys_track_latest_data_across_refreshes() {
    let (mut scene, mut set) = setup();
    let rounds: Vec<Vec<u32>> = vec![
        vec![1, 2, 3],
        vec![],
        vec![5],
        vec![5, 6, 7, 8],
        vec![8, 1],
        vec![8, 1],
    ];

    for keys in rounds {
        let data: Vec<Item> = keys.iter().map(|k| item(*k, 0.0)).collect();
        refresh_plain(&mut set, &mut scene, &data);

        assert_eq!(set.keys(), keys.as_slice());
        assert_eq!(set.len(), keys.len());
        // One live node per key inside the container
        assert_eq!(scene.children(set.container()).len(), keys.len());
    }
}

#[test]
fn test_identical_refresh_updates_without_entering() {
    let (mut scene, mut set) = setup();
    let data = vec![item(1, 1.0), item(2, 2.0)];

    refresh_plain(&mut set, &mut scene, &data);
    let nodes: Vec<NodeId> = set.iter().map(|(_, node)| node).collect();

    let report = refresh_plain(&mut set, &mut scene, &data);

    assert!(report.entered.is_empty());
    assert!(report.exited.is_empty());
    assert_eq!(report.updated, vec![1, 2]);
    let again: Vec<NodeId> = set.iter().map(|(_, node)| node).collect();
    assert_eq!(nodes, again);
}

#[test]
fn test_updates_follow_data_order() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0), item(2, 0.0), item(3, 0.0)]);

    let report = refresh_plain(&mut set, &mut scene, &[item(3, 0.0), item(1, 0.0), item(2, 0.0)]);

    assert_eq!(report.updated, vec![3, 1, 2]);
    assert_eq!(set.keys(), &[3, 1, 2]);
}

#[test]
fn test_enters_follow_data_order() {
    let (mut scene, mut set) = setup();

    let report = refresh_plain(&mut set, &mut scene, &[item(9, 0.0), item(4, 0.0), item(7, 0.0)]);

    assert_eq!(report.entered, vec![9, 4, 7]);
}

#[test]
fn test_duplicate_keys_collapse_last_wins() {
    let (mut scene, mut set) = setup();

    let report = refresh_plain(
        &mut set,
        &mut scene,
        &[item(1, 10.0), item(2, 0.0), item(1, 20.0)],
    );

    assert_eq!(report.entered, vec![2, 1]);
    assert_eq!(set.len(), 2);
    let node = set.get(&1).unwrap();
    assert_eq!(scene.number(node, Attr::Cx), Some(20.0));
    assert_eq!(scene.children(set.container()).len(), 2);
}

#[test]
fn test_empty_data_exits_everything() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0), item(2, 0.0)]);

    let report = refresh_plain(&mut set, &mut scene, &[]);

    assert_eq!(report.exited, vec![1, 2]);
    assert!(set.is_empty());
    assert!(scene.children(set.container()).is_empty());
}

#[test]
fn test_refresh_leaves_caller_data_untouched() {
    let (mut scene, mut set) = setup();
    let data = vec![item(1, 1.0), item(2, 2.0)];
    let before = data.clone();

    refresh_plain(&mut set, &mut scene, &data);

    assert_eq!(data, before);
}

// =============================================================================
// Positional keys
// =============================================================================

#[test]
fn test_by_index_keys_by_position() {
    let mut scene = Scene::new();
    let container = scene.append(NodeId::ROOT, ShapeKind::Group).unwrap();
    let mut set: BindingSet<usize> = BindingSet::new(container, ShapeKind::Circle);

    let refresh = |set: &mut BindingSet<usize>, scene: &mut Scene, data: &[f64]| {
        let result: Result<_, SceneError> = set.refresh(
            scene,
            data,
            by_index,
            |el, x| {
                el.set(Attr::Cx, *x)?;
                Ok(())
            },
            |el, x| {
                el.set(Attr::Cx, *x)?;
                Ok(())
            },
            |_| Ok(()),
            None,
        );
        result.unwrap()
    };

    refresh(&mut set, &mut scene, &[1.0, 2.0, 3.0]);
    let report = refresh(&mut set, &mut scene, &[1.0, 2.0]);

    // Popping the last point exits the last index only
    assert_eq!(report.exited, vec![2]);
    assert_eq!(report.updated, vec![0, 1]);
    assert_eq!(set.keys(), &[0, 1]);
}

// =============================================================================
// Exit and removal
// =============================================================================

#[test]
fn test_exit_transition_delays_removal() {
    let start = Instant::now();
    let mut scene = Scene::with_clock(start);
    let container = scene.append(NodeId::ROOT, ShapeKind::Group).unwrap();
    let mut set: BindingSet<u32> = BindingSet::new(container, ShapeKind::Circle);
    let transition = Some(TransitionConfig::millis(1000));

    let enter = |el: &mut Bound<'_, Scene>, d: &Item| -> Result<(), SceneError> {
        el.set(Attr::R, 0.0)?.animate(Attr::R, d.x)?;
        Ok(())
    };

    let result: Result<_, SceneError> = set.refresh(
        &mut scene,
        &[item(1, 10.0)],
        |_, d| d.key,
        enter,
        |_, _| Ok(()),
        |_| Ok(()),
        transition,
    );
    result.unwrap();
    scene.tick(start + Duration::from_millis(1000));
    let node = set.get(&1).unwrap();
    assert_eq!(scene.number(node, Attr::R), Some(10.0));

    let result: Result<_, SceneError> = set.refresh(
        &mut scene,
        &[],
        |_, d: &Item| d.key,
        enter,
        |_, _| Ok(()),
        |el| {
            el.animate(Attr::R, 0.0)?;
            Ok(())
        },
        transition,
    );
    result.unwrap();

    // Evicted right away, but still on screen while shrinking
    assert!(set.is_empty());
    assert!(scene.contains(node));
    assert!(scene.is_retired(node));
    assert!(scene.children(container).is_empty());

    scene.tick(start + Duration::from_millis(1500));
    let r = scene.number(node, Attr::R).unwrap();
    assert!(r > 0.0 && r < 10.0, "radius mid-exit was {r}");

    scene.tick(start + Duration::from_millis(2000));
    assert!(!scene.contains(node));
}

#[test]
fn test_exit_without_transition_removes_immediately() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0)]);
    let node = set.get(&1).unwrap();

    refresh_plain(&mut set, &mut scene, &[]);

    assert!(!scene.contains(node));
}

#[test]
fn test_reentering_key_gets_fresh_node() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0)]);
    let first = set.get(&1).unwrap();

    refresh_plain(&mut set, &mut scene, &[]);
    let report = refresh_plain(&mut set, &mut scene, &[item(1, 0.0)]);

    assert_eq!(report.entered, vec![1]);
    assert_ne!(set.get(&1).unwrap(), first);
}

// =============================================================================
// Failure semantics
// =============================================================================

#[derive(Debug, PartialEq)]
enum TestError {
    Scene(SceneError),
    Boom(u32),
}

impl From<SceneError> for TestError {
    fn from(err: SceneError) -> Self {
        TestError::Scene(err)
    }
}

#[test]
fn test_enter_error_propagates_and_keeps_partial_state() {
    let (mut scene, mut set) = setup();

    let result: Result<JoinReport<u32>, TestError> = set.refresh(
        &mut scene,
        &[item(1, 0.0), item(2, 0.0), item(3, 0.0)],
        |_, d| d.key,
        |el, d| {
            el.set(Attr::R, 0.0)?.animate(Attr::R, 10.0)?;
            if d.key == 2 {
                Err(TestError::Boom(d.key))
            } else {
                Ok(())
            }
        },
        |_, _| Ok(()),
        |_| Ok(()),
        Some(TransitionConfig::millis(500)),
    );

    assert_eq!(result, Err(TestError::Boom(2)));
    // Key 1 was entered before the failure; nothing was rolled back
    assert_eq!(set.keys(), &[1]);
    assert!(set.contains(&1));
    assert!(!set.contains(&3));
    // The failed stub is gone at once, even though it had started animating
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.all_children(set.container()), vec![set.get(&1).unwrap()]);
}

#[test]
fn test_update_error_propagates() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0), item(2, 0.0)]);

    let result: Result<JoinReport<u32>, TestError> = set.refresh(
        &mut scene,
        &[item(1, 0.0), item(2, 0.0), item(3, 0.0)],
        |_, d| d.key,
        |_, _| Ok(()),
        |_, d| Err(TestError::Boom(d.key)),
        |_| Ok(()),
        None,
    );

    assert_eq!(result, Err(TestError::Boom(1)));
    // Enter ran before the failing update
    assert!(set.contains(&3));
}

#[test]
fn test_exit_error_still_evicts_element() {
    let (mut scene, mut set) = setup();
    refresh_plain(&mut set, &mut scene, &[item(1, 0.0), item(2, 0.0)]);
    let node = set.get(&1).unwrap();

    let result: Result<JoinReport<u32>, TestError> = set.refresh(
        &mut scene,
        &[item(2, 0.0)],
        |_, d| d.key,
        |_, _| Ok(()),
        |_, _| Ok(()),
        |_| Err(TestError::Boom(0)),
        None,
    );

    assert_eq!(result, Err(TestError::Boom(0)));
    assert!(!set.contains(&1));
    assert!(!scene.contains(node));

    // A later refresh never sees key 1 again, so exit cannot run twice for it
    let report = refresh_plain(&mut set, &mut scene, &[item(2, 0.0)]);
    assert!(report.exited.is_empty());
}

#[test]
fn test_surface_errors_convert_into_callback_error() {
    let (mut scene, mut set) = setup();

    let result: Result<JoinReport<u32>, TestError> = set.refresh(
        &mut scene,
        &[item(1, 0.0)],
        |_, d| d.key,
        |el, _| {
            // Circles cannot hold children
            let parent = el.node();
            el.surface().append(parent, ShapeKind::Text)?;
            Ok(())
        },
        |_, _| Ok(()),
        |_| Ok(()),
        None,
    );

    assert!(matches!(
        result,
        Err(TestError::Scene(SceneError::NotAContainer(_)))
    ));
}
