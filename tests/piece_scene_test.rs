use std::f64::consts::TAU;

use instant::Duration;
use rand::{SeedableRng, rngs::StdRng};
use tableau_ngin::{
    clock::{FrameTime, REFERENCE_FRAME},
    config::{HaloConfig, PieceConfig},
    context::Viewport,
    data_structures::{animated::FragmentObject, instance::EulerXyz},
    flow::{PointerSample, SceneFlow},
    scenes::{PieceScene, PieceState},
};

use crate::common::test_utils::{assert_close, test_context};

mod common;

fn state() -> PieceState {
    PieceState::new(&HaloConfig::default(), &mut StdRng::seed_from_u64(1))
}

#[test]
fn should_space_fragments_evenly() {
    let state = state();
    assert_eq!(state.fragments.len(), 5);
    for (idx, fragment) in state.fragments.iter().enumerate() {
        assert_eq!(fragment.index, idx);
        assert!((fragment.angle - TAU / 5.0 * idx as f64).abs() < 1e-9);
        assert!((0.0..2.0).contains(&fragment.vertical_offset));
    }
}

#[test]
fn should_advance_by_one_reference_frame() {
    let config = PieceConfig::default();
    let before = state();
    let after = before.advanced(&FrameTime::new(REFERENCE_FRAME, REFERENCE_FRAME), &config);

    assert!((after.yaw - 0.005).abs() < 1e-6);
    for (old, new) in before.fragments.iter().zip(after.fragments.iter()) {
        assert!((new.angle - old.angle - 0.02).abs() < 1e-6);
        assert!((new.spin - old.spin - 0.05).abs() < 1e-6);
    }
    // advancing is pure
    assert_eq!(before, state());
}

#[test]
fn should_not_advance_without_elapsed_time() {
    let config = PieceConfig::default();
    let before = state();
    let after = before.advanced(&FrameTime::new(Duration::from_secs(3), Duration::ZERO), &config);
    assert_eq!(before, after);
}

#[test]
fn should_keep_fragment_angles_monotonic() {
    let config = PieceConfig::default();
    let mut current = state();
    let mut previous = Duration::ZERO;
    // irregular frame intervals, including a stall
    for ms in [16, 17, 33, 34, 250, 251, 267] {
        let elapsed = Duration::from_millis(ms);
        let next = current.advanced(&FrameTime::after(previous, elapsed), &config);
        for (old, new) in current.fragments.iter().zip(next.fragments.iter()) {
            assert!(new.angle > old.angle);
        }
        assert!(next.yaw > current.yaw);
        current = next;
        previous = elapsed;
    }
}

#[test]
fn should_lean_towards_the_pointer() {
    let viewport = Viewport::new(800, 600);
    let state = state();

    let corner = PointerSample::new(0.0, 0.0, viewport).ndc().expect("drawable");
    assert_eq!(corner, (-1.0, 1.0));
    let leaning = state.leaning(corner, 0.2);
    assert_close(leaning.tilt.0, 0.2);
    assert_close(leaning.tilt.1, 0.2);

    let right = PointerSample::new(800.0, 300.0, viewport).ndc().expect("drawable");
    let leaning = leaning.leaning(right, 0.2);
    assert_close(leaning.tilt.0, 0.0);
    assert_close(leaning.tilt.1, -0.2);

    let centre = PointerSample::new(400.0, 300.0, viewport).ndc().expect("drawable");
    assert_eq!(state.leaning(centre, 0.2).tilt, (0.0, 0.0));
}

#[test]
fn should_ignore_pointers_over_collapsed_viewports() {
    assert!(PointerSample::new(10.0, 10.0, Viewport::new(0, 600)).ndc().is_none());
}

#[test]
fn should_sway_on_x_and_lean_on_z() {
    let config = PieceConfig::default();
    let state = state().leaning((0.5, -0.5), config.tilt_max);
    let rotation = state.group_rotation(1.0, &config);
    assert_close(rotation.x, (1.0f32).sin() * 0.1);
    assert_close(rotation.y, 0.0);
    assert_close(rotation.z, -0.1);

    // a pointer at the top edge leaves x to the sway
    let top = state.leaning((0.0, 1.0), config.tilt_max);
    assert_close(top.group_rotation(1.0, &config).x, (1.0f32).sin() * 0.1);
}

#[test]
fn should_keep_small_turns_visible_after_long_uptime() {
    let config = PieceConfig::default();
    let mut state = state();
    state.yaw = TAU * 100_000.0 + 1.0;
    let before = state.group_rotation(0.0, &config).y;
    let after = state
        .advanced(&FrameTime::new(REFERENCE_FRAME, REFERENCE_FRAME), &config)
        .group_rotation(0.0, &config)
        .y;
    assert_close(before, 1.0);
    assert_close(after - before, 0.005);
}

#[test]
fn should_tolerate_an_empty_offset_range() {
    for range in [[1.0, 1.0], [2.0, 0.5]] {
        let halo = HaloConfig {
            vertical_offset_range: range,
            ..Default::default()
        };
        let state = PieceState::new(&halo, &mut StdRng::seed_from_u64(4));
        assert!(state.fragments.iter().all(|f| f.vertical_offset == range[0]));
    }

    let mut config = PieceConfig::default();
    config.halo.vertical_offset_range = [0.0, 0.0];
    let scene = PieceScene::new(config, &mut StdRng::seed_from_u64(5));
    assert_eq!(scene.fragment_transforms().len(), 5);
}

#[test]
fn should_orbit_on_a_breathing_radius() {
    let halo = HaloConfig::default();
    let fragment = FragmentObject::new(2, 5, 0.02, 1.0);
    let t = 0.75;

    let radius = fragment.radius_at(t, &halo);
    assert_close(radius, 3.0 + (2.0 * t as f32 + 2.0).sin() * 0.5);
    let position = fragment.position_at(t, &halo);
    assert_close(position.x, fragment.angle.cos() as f32 * radius);
    assert_close(position.y, 4.0 + (t as f32 + 2.0).sin() * 0.5);
    assert_close(position.z, fragment.angle.sin() as f32 * radius);
}

#[test]
fn should_place_fragments_in_the_group_space() {
    let config = PieceConfig::default();
    let scene = PieceScene::new(config.clone(), &mut StdRng::seed_from_u64(1));
    let transforms = scene.fragment_transforms();
    assert_eq!(transforms.len(), config.halo.count);
    // at t = 0 without lean the group is unrotated
    for (fragment, transform) in scene.state().fragments.iter().zip(transforms.iter()) {
        let expected = fragment.position_at(0.0, &config.halo);
        assert_close(transform.position.x, expected.x);
        assert_close(transform.position.y, expected.y);
        assert_close(transform.position.z, expected.z);
    }
}

#[test]
fn should_rotate_the_group_on_pointer_move() {
    let config = PieceConfig::default();
    let (mut ctx, _) = test_context(Viewport::new(400, 500));
    let mut scene = PieceScene::new(config.clone(), &mut StdRng::seed_from_u64(2));
    scene.on_init(&mut ctx);

    scene.on_pointer_move(&mut ctx, &PointerSample::new(0.0, 0.0, Viewport::new(400, 500)));
    let group = scene.group_transform().expect("the group has one instance");
    let expected = EulerXyz::new(0.0, 0.0, 0.2).to_quaternion();
    assert_close(group.rotation.s, expected.s);
    assert_close(group.rotation.v.x, expected.v.x);
    assert_close(group.rotation.v.y, expected.v.y);
    assert_close(group.rotation.v.z, expected.v.z);
}

#[test]
fn should_light_the_piece_and_present_every_part() {
    let (mut ctx, log) = test_context(Viewport::new(400, 500));
    let mut scene = PieceScene::new(PieceConfig::default(), &mut StdRng::seed_from_u64(3));
    scene.on_init(&mut ctx);
    scene.on_update(&mut ctx, &FrameTime::new(REFERENCE_FRAME, REFERENCE_FRAME));
    ctx.present(scene.on_render()).expect("recording never fails");

    assert_eq!(ctx.lights.len(), 3);
    assert!(ctx.fog.is_none());
    assert_eq!(scene.meshes().len(), 6);
    let log = log.borrow();
    let frame = &log.frames[0];
    let mut ids = frame.opaque.clone();
    ids.sort();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    assert!(frame.transparent.is_empty());
    let halo = frame
        .translations
        .iter()
        .find(|(id, _)| *id == 5)
        .expect("halo batch");
    assert_eq!(halo.1.len(), 5);
}
