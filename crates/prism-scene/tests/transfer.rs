//! End-to-end build → freeze → upload → kernel → teardown checks.

use prism_arena::{ArenaConfig, ArenaError, GrowthPolicy, StoreKind};
use prism_core::{ObjType, Object, Plane, Sphere, Vec3};
use prism_scene::{
    upload_scene, CensusKernel, DeviceBuffer, HostDevice, LaunchConfig, Scene, Stride,
    TransferError,
};
use prism_test_utils::fixtures::{mixed_scene, sphere_grid};
use prism_test_utils::{random_scene, FailingDevice, RandomSceneSpec, TruncatingDevice};

#[test]
fn mixed_insertions_dispatch_by_tag() {
    let mut scene = Scene::default();
    let ids = mixed_scene(&mut scene).unwrap();

    assert_eq!(scene.object_count(), 3);
    assert_eq!(scene.light_count(), 1);
    assert_eq!(scene.material_count(), 2);

    let view = scene.view();
    assert!(matches!(view.object(0).unwrap(), Object::Sphere(_)));
    assert!(matches!(view.object(1).unwrap(), Object::Sphere(_)));
    assert!(matches!(view.object(2).unwrap(), Object::Plane(_)));
    assert_eq!(view.record(2).unwrap().offset(), ids.floor);

    let light = scene.light(0).unwrap();
    assert_eq!(light.ty(), Some(ObjType::Sphere));
    assert_eq!(light.offset(), ids.lamp);
    let lamp: Sphere = scene.read(ids.lamp).unwrap();
    assert_eq!(lamp.material, ids.glow);
    assert!(scene.material(ids.glow).unwrap().is_emissive());
}

#[test]
fn contract_describes_every_store() {
    let mut scene = Scene::default();
    mixed_scene(&mut scene).unwrap();
    let contract = scene.freeze();

    assert_eq!(contract.objects.count(), 3);
    assert_eq!(contract.objects.stride(), Stride::Tagged);
    assert_eq!(contract.objects.len_bytes(), 20 + 20 + 28);
    assert_eq!(contract.metadata.stride(), Stride::Fixed(16));
    assert_eq!(contract.metadata.len_bytes(), 3 * 16);
    assert_eq!(contract.lights.len_bytes(), 16);
    assert_eq!(contract.materials.stride(), Stride::Fixed(48));
    assert_eq!(contract.materials.count(), 2);
    assert_eq!(contract.camera, *scene.camera());
}

#[test]
fn device_copy_is_byte_identical() {
    let mut scene = Scene::default();
    random_scene(&mut scene, RandomSceneSpec::default(), 7).unwrap();
    let contract = scene.freeze();

    let mut device = HostDevice::new();
    let uploaded = upload_scene(&mut device, &contract).unwrap();

    assert_eq!(uploaded.objects().as_bytes(), contract.objects.bytes());
    assert_eq!(uploaded.metadata().as_bytes(), contract.metadata.bytes());
    assert_eq!(uploaded.lights().as_bytes(), contract.lights.bytes());
    assert_eq!(uploaded.materials().as_bytes(), contract.materials.bytes());
    assert_ne!(
        uploaded.objects().as_bytes().as_ptr(),
        contract.objects.base_ptr()
    );
    assert_eq!(device.uploaded_bytes(), contract.total_bytes());
}

#[test]
fn host_offsets_resolve_on_the_device() {
    let mut scene = Scene::default();
    let offsets = sphere_grid(&mut scene, 100).unwrap();
    let mut device = HostDevice::new();
    let uploaded = upload_scene(&mut device, &scene.freeze()).unwrap();
    let view = uploaded.view().unwrap();

    for (i, offset) in offsets.iter().enumerate() {
        let host: Sphere = scene.read(*offset).unwrap();
        let device: Sphere = view.objects().read_at(*offset).unwrap();
        assert_eq!(host, device);
        assert_eq!(device.center, Vec3::new(i as f32 * 2.5, 0.0, 0.0));
    }
}

#[test]
fn census_matches_host_counts() {
    let mut scene = Scene::default();
    let spec = RandomSceneSpec {
        objects: 500,
        materials: 4,
        light_ratio: 0.2,
    };
    random_scene(&mut scene, spec, 99).unwrap();

    let spheres = scene
        .view()
        .iter()
        .filter(|o| matches!(o, Ok(Object::Sphere(_))))
        .count();

    let mut device = HostDevice::new();
    let uploaded = upload_scene(&mut device, &scene.freeze()).unwrap();
    let census = CensusKernel::run_all(&uploaded, &LaunchConfig::with_threads(4)).unwrap();

    assert_eq!(census.objects(), 500);
    assert_eq!(census.spheres, spheres);
    assert_eq!(census.lights, scene.light_count());
    assert_eq!(census.bytes_visited, scene.objects().len_bytes());
}

#[test]
fn failed_insert_leaves_a_destroyable_scene() {
    let config = ArenaConfig {
        initial_object_bytes: 0,
        max_object_bytes: 50,
        ..ArenaConfig::new(GrowthPolicy::Exact)
    };
    let mut scene = Scene::new(config).unwrap();
    let material = scene
        .register_material(&prism_core::Material::default())
        .unwrap();
    scene
        .insert(&Sphere::new(Vec3::ZERO, 1.0, material))
        .unwrap();
    scene
        .insert_emitter(&Sphere::new(Vec3::X, 1.0, material))
        .unwrap();

    let err = scene
        .insert(&Plane::new(Vec3::ZERO, Vec3::Y, material))
        .unwrap_err();
    assert!(matches!(
        err,
        ArenaError::OutOfMemory {
            store: StoreKind::Objects,
            ..
        }
    ));
    assert_eq!(scene.object_count(), 2);
    assert_eq!(scene.objects().len_bytes(), 40);

    scene.destroy();
    assert!(scene.is_empty());
    assert_eq!(scene.memory_bytes(), 0);
    scene.destroy();
    assert!(scene.is_empty());
}

#[test]
fn destroyed_scene_can_be_rebuilt() {
    let mut scene = Scene::default();
    mixed_scene(&mut scene).unwrap();
    scene.destroy();
    let ids = mixed_scene(&mut scene).unwrap();
    assert_eq!(ids.sphere.0, 0);
    assert_eq!(scene.object_count(), 3);
}

#[test]
fn device_out_of_memory_is_a_transfer_error() {
    let mut scene = Scene::default();
    sphere_grid(&mut scene, 10).unwrap();
    let contract = scene.freeze();

    let mut device = HostDevice::with_budget(contract.objects.len_bytes());
    let err = upload_scene(&mut device, &contract).err().unwrap();
    match err {
        TransferError::Device(inner) => assert!(inner.to_string().contains("metadata")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_device_aborts_the_upload() {
    let mut scene = Scene::default();
    mixed_scene(&mut scene).unwrap();
    for allowed in 0..4 {
        let mut device = FailingDevice::after(allowed);
        assert!(matches!(
            upload_scene(&mut device, &scene.freeze()),
            Err(TransferError::Device(_))
        ));
    }
}

#[test]
fn short_copy_is_a_size_mismatch() {
    let mut scene = Scene::default();
    sphere_grid(&mut scene, 2).unwrap();
    let mut device = TruncatingDevice::default();
    assert_eq!(
        upload_scene(&mut device, &scene.freeze()).err().unwrap(),
        TransferError::SizeMismatch {
            label: "objects",
            expected: 40,
            actual: 39,
        }
    );
}
