use pyra_core::{Config, FlyCamera, Mesh, MoveKeys, Projection, Transform, Vec3};

fn clip_of(camera: &FlyCamera, projection: &Projection, p: Vec3) -> Vec3 {
    let model = pyra_core::Mat4::IDENTITY;
    let mvp = Transform::mvp_matrix(&model, &camera.view_matrix(), &projection.matrix());
    mvp.transform_point(p)
        .perspective_divide()
        .expect("point behind the eye plane")
}

#[test]
fn default_camera_sees_the_pyramid() {
    let config = Config::default();
    let camera = FlyCamera::from_config(&config.camera);
    let projection = Projection::new(
        config.projection.fov_x,
        config.window.width,
        config.window.height,
        config.projection.z_near,
        config.projection.z_far,
    );

    for v in Mesh::pyramid().vertices() {
        let ndc = clip_of(&camera, &projection, v.position);
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{ndc:?}");
        assert!((-1.0..=1.0).contains(&ndc.z), "{ndc:?}");
    }
}

#[test]
fn walking_forward_brings_the_prism_closer() {
    let mut camera = FlyCamera::default().with_speed(5.0);
    let projection = Projection::default();
    let center = Vec3::new(0.0, 0.0, -2.0);

    let before = clip_of(&camera, &projection, center).z;
    let keys = MoveKeys {
        forward: true,
        ..Default::default()
    };
    camera.update(keys, 0.1);
    let after = clip_of(&camera, &projection, center).z;

    assert!((camera.position() - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
    assert!(after < before);
}

#[test]
fn looking_right_moves_the_scene_left() {
    let mut camera = FlyCamera::default();
    let projection = Projection::default();
    let center = Vec3::new(0.0, 0.0, -3.0);

    camera.on_pointer_motion(0.0, 0.0);
    camera.on_pointer_motion(100.0, 0.0);

    assert!((camera.yaw() - -80.0).abs() < 1e-4);
    assert!(clip_of(&camera, &projection, center).x < 0.0);
}
