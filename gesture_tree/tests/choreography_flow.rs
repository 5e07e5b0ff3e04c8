//! End-to-end: gesture samples through the state machine into element
//! transforms.

use std::thread;
use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};

use cloud_layout::PositionSet;
use dual_cloud::{BlendProfile, DualSet, ElementAttributes, ElementGroup};
use gesture_tree::adapter::{AdapterStatus, GestureAdapter};
use gesture_tree::choreography::{StateMachine, TreeState};
use gesture_tree::error::InitError;
use gesture_tree::gesture::{Classifier, ScriptedBackend, ScriptedFrame};

const DT: f32 = 1.0 / 60.0;

fn three_elements() -> ElementGroup {
    let pair = DualSet::new(
        PositionSet::from_points(vec![Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0)]),
        PositionSet::from_points(vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 1.0, 1.0),
            Vec3::new(10.0, 2.0, 2.0),
        ]),
    )
    .unwrap();
    ElementGroup::from_pair("three", pair, ElementAttributes::uniform(3), BlendProfile::default()).unwrap()
}

fn wait_ready(adapter: &mut GestureAdapter) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while *adapter.refresh_status() == AdapterStatus::Uninitialized && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn halfway_progress_blends_halfway() {
    let mut group = three_elements();
    let got: Vec<Vec3> = group.update(0.5, 0.0).iter().map(|t| t.position).collect();
    let want = [Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.5, 1.0, 1.0), Vec3::new(6.0, 2.0, 2.0)];
    for (g, w) in got.iter().zip(want) {
        assert!((*g - w).length() < 1e-5, "{:?} != {:?}", g, w);
    }
}

#[test]
fn scripted_gestures_drive_the_group() {
    let script = vec![
        ScriptedFrame::gesture(1, "Open_Palm", 0.9, Vec2::splat(0.5)),
        // Unconfident fist: ignored.
        ScriptedFrame::gesture(2, "Closed_Fist", 0.4, Vec2::splat(0.5)),
        ScriptedFrame::no_hand(3),
        ScriptedFrame::failure(4),
    ];
    let mut adapter = GestureAdapter::start(Box::new(ScriptedBackend::new(script)), Classifier::default());
    wait_ready(&mut adapter);

    let mut machine = StateMachine::default();
    let mut group   = three_elements();
    for _ in 0..150 {
        if let Some(sample) = adapter.poll() {
            machine.observe(&sample);
        }
        let p = machine.advance(DT);
        group.update(p, 0.0);
    }

    assert_eq!(machine.state(), TreeState::Chaos);
    assert!(machine.progress() < 0.01);
    assert!((group.transforms()[2].position - Vec3::splat(2.0)).length() < 1e-3);
    let stats = adapter.stats();
    assert_eq!((stats.classified, stats.errors), (3, 1));
}

#[test]
fn failed_init_leaves_tree_formed() {
    let backend = ScriptedBackend::new(vec![ScriptedFrame::gesture(1, "Open_Palm", 1.0, Vec2::ZERO)])
        .failing(InitError::CameraUnavailable("permission denied".into()));
    let mut adapter = GestureAdapter::start(Box::new(backend), Classifier::default());
    wait_ready(&mut adapter);
    assert!(matches!(adapter.status(), AdapterStatus::Failed(_)));

    let mut machine = StateMachine::default();
    let mut group   = three_elements();
    for _ in 0..60 {
        if let Some(sample) = adapter.poll() {
            machine.observe(&sample);
        }
        group.update(machine.advance(DT), 0.0);
    }
    assert_eq!(machine.snapshot().progress, 1.0);
    assert_eq!(group.transforms()[0].position, Vec3::new(10.0, 0.0, 0.0));
}
