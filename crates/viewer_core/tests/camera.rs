use glam::{Mat4, Vec3};
use viewer_core::{Aabb, Camera, MeshData, UpAxis};

fn assert_mat_close(a: Mat4, b: Mat4, eps: f32) {
    assert!(a.abs_diff_eq(b, eps), "matrices differ:\n{a}\n{b}");
}

#[test]
fn rotation_depends_only_on_cumulative_deltas() {
    let bounds = MeshData::cube().bounds();
    let mut split = Camera::default();
    split.rotate(12.0, -3.5);
    split.rotate(-4.0, 9.0);
    let mut once = Camera::default();
    once.rotate(8.0, 5.5);
    assert_mat_close(
        split.derive_view_matrix(bounds),
        once.derive_view_matrix(bounds),
        1e-5,
    );
}

#[test]
fn reset_view_is_centered_at_diagonal_distance() {
    let bounds = Aabb {
        min: Vec3::new(1.0, 2.0, 3.0),
        max: Vec3::new(3.0, 6.0, 7.0),
    };
    let mut cam = Camera::default();
    cam.set_viewport(640, 480);
    cam.rotate(40.0, 17.0);
    cam.pan(30.0, -12.0);
    cam.zoom(25.0);
    cam.reset(Some(bounds));

    let diag = bounds.diagonal();
    assert!((cam.proximity() - diag).abs() < 1e-6);
    let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -diag))
        * Mat4::from_translation(-bounds.center());
    assert_mat_close(cam.derive_view_matrix(bounds), expected, 1e-5);
    // The bbox center lands straight ahead of the eye.
    let c = cam.derive_view_matrix(bounds).transform_point3(bounds.center());
    assert!((c - Vec3::new(0.0, 0.0, -diag)).length() < 1e-5);
}

#[test]
fn cube_reset_distance_is_sqrt_12() {
    let mut cam = Camera::default();
    cam.reset(Some(MeshData::cube().bounds()));
    assert!((cam.proximity() - 3.464_101_6).abs() < 1e-5);
}

#[test]
fn repeated_zoom_matches_single_zoom() {
    let mut stepped = Camera::default();
    for _ in 0..7 {
        stepped.zoom(3.0);
    }
    let mut once = Camera::default();
    once.zoom(21.0);
    assert!((stepped.proximity() - once.proximity()).abs() < 1e-5);
}

#[test]
fn opposite_scrolls_cancel() {
    let mut cam = Camera::default();
    cam.reset(Some(MeshData::cube().bounds()));
    let before = cam.proximity();
    cam.zoom(10.0);
    assert!(cam.proximity() < before);
    cam.zoom(-10.0);
    assert!((cam.proximity() - before).abs() < 1e-5);
}

#[test]
fn zoom_never_reaches_zero() {
    let mut cam = Camera::default();
    for _ in 0..10_000 {
        cam.zoom(500.0);
    }
    assert!(cam.proximity() > 0.0);
}

#[test]
fn up_axis_z_brings_z_up_on_screen() {
    let bounds = MeshData::cube().bounds();
    let mut cam = Camera::default();
    cam.reset(Some(bounds));
    cam.set_up_axis(UpAxis::Z);
    let view = cam.derive_view_matrix(bounds);
    let up = view.transform_vector3(Vec3::Z);
    assert!((up - Vec3::Y).length() < 1e-5, "z axis lands at {up:?}");
}

#[test]
fn azimuth_spins_about_view_y() {
    let bounds = MeshData::cube().bounds();
    let mut cam = Camera::default();
    // 50 units * pi/100 = a quarter turn.
    cam.rotate(50.0, 0.0);
    let v = cam.derive_view_matrix(bounds).transform_vector3(Vec3::X);
    assert!((v - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5, "{v:?}");
}

#[test]
fn view_derivation_is_idempotent() {
    let bounds = MeshData::cube().bounds();
    let mut cam = Camera::default();
    cam.set_viewport(1024, 768);
    cam.rotate(3.0, 4.0);
    cam.pan(2.0, 2.0);
    let a = cam.derive_view_matrix(bounds);
    let b = cam.derive_view_matrix(bounds);
    assert_eq!(a, b);
}

#[test]
fn pan_speed_is_resolution_independent_in_ndc() {
    // Dragging the full half-width moves the model by the same fraction of the view
    // regardless of pixel count.
    let mut small = Camera::default();
    small.set_viewport(400, 300);
    small.pan(200.0, 0.0);
    let mut big = Camera::default();
    big.set_viewport(1600, 1200);
    big.pan(800.0, 0.0);
    assert!((small.pan_offset().x - big.pan_offset().x).abs() < 1e-5);
}
