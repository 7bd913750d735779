//! Per-draw uniform contract and GPU resource ownership, checked against the
//! recording backend

use std::rc::Rc;

use eversink_engine::assets::{AssetRegistry, ImageData};
use eversink_engine::foundation::math::{Mat4, Vec3};
use eversink_engine::render::backends::{RecordedCall, RecordingBackend};
use eversink_engine::render::{
    pbr, Light, SamplerParams, ShaderProgram, Texture, UniformValue,
};
use eversink_engine::scene::{Cube, FrameContext, Scene};

fn frame() -> FrameContext {
    FrameContext {
        view: Mat4::identity(),
        projection: Mat4::identity(),
        view_pos: Vec3::new(0.0, 0.0, 3.0),
    }
}

#[test]
fn textured_cube_uploads_full_contract() {
    let backend = Rc::new(RecordingBackend::new());
    let mut registry = AssetRegistry::new();
    let program = registry.add_program(ShaderProgram::from_source(backend.clone(), "vs", "fs", "lit"));
    let textures = (0..2)
        .map(|_| {
            let image = ImageData::solid_color(4, 4, [200, 100, 50, 255]);
            registry.add_texture(Texture::from_image(backend.clone(), &image, SamplerParams::default()).unwrap())
        })
        .collect();

    let mut scene = Scene::new();
    scene.lighting.add_light(Light::default_directional());
    scene.lighting.add_light(Light::default_point(Vec3::new(0.0, 7.0, 5.0)));
    scene.add_cube(
        Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program)
            .unwrap()
            .with_textures(textures)
            .with_material(pbr::EMERALD),
    );

    backend.clear_calls();
    scene.render(backend.as_ref(), &registry, &frame());

    let draws = backend.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].index_count, 36);

    let names = backend.uniform_names();
    for required in [
        "model",
        "view",
        "projection",
        "viewPos",
        "numLights",
        "lights[0].type",
        "lights[1].position",
        "lights[1].quadratic",
        "material.albedo",
        "material.alpha",
        "useTextures",
        "texture0",
        "texture1",
        "colorAlpha",
    ] {
        assert!(names.iter().any(|n| n == required), "missing uniform {required}");
    }
    assert_eq!(backend.last_uniform("numLights"), Some(UniformValue::Int(2)));
    assert_eq!(backend.last_uniform("texture1"), Some(UniformValue::Int(1)));
    assert_eq!(backend.last_uniform("useTextures"), Some(UniformValue::Bool(true)));
    assert_eq!(backend.last_uniform("colorAlpha"), Some(UniformValue::Float(0.0)));

    let bound_units: Vec<u32> = backend
        .calls()
        .iter()
        .filter_map(|c| match c {
            RecordedCall::BindTexture { unit, .. } => Some(*unit),
            _ => None,
        })
        .collect();
    assert_eq!(bound_units, vec![0, 1]);
}

#[test]
fn single_light_uploads_struct_and_array_forms() {
    let backend = Rc::new(RecordingBackend::new());
    let mut registry = AssetRegistry::new();
    let program = registry.add_program(ShaderProgram::from_source(backend.clone(), "vs", "fs", "lit"));

    let mut scene = Scene::new();
    scene.lighting.add_light(Light::default_directional());
    scene.add_cube(Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program).unwrap());
    scene.render(backend.as_ref(), &registry, &frame());

    // Array form, read by multi_light.fs
    assert_eq!(backend.last_uniform("numLights"), Some(UniformValue::Int(1)));
    assert_eq!(backend.last_uniform("lights[0].type"), Some(UniformValue::Int(0)));
    assert_eq!(backend.last_uniform("lights[0].enabled"), Some(UniformValue::Bool(true)));

    // Struct form, read by single_light.fs
    let direction = backend.last_uniform("light.direction").and_then(|v| v.as_vec3());
    assert!(direction.is_some());
    assert_eq!(
        direction,
        backend.last_uniform("lights[0].direction").and_then(|v| v.as_vec3())
    );
    assert!(backend.last_uniform("lights[1].type").is_none());
}

#[test]
fn failed_program_skips_draw() {
    let backend = Rc::new(RecordingBackend::new());
    backend.fail_program_creation(true);
    let mut registry = AssetRegistry::new();
    let program = registry.add_program(ShaderProgram::from_source(backend.clone(), "bad", "bad", "broken"));

    let mut scene = Scene::new();
    scene.add_cube(Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program).unwrap());
    scene.render(backend.as_ref(), &registry, &frame());

    assert!(backend.draws().is_empty());
    assert!(backend.uniform_names().is_empty());
}

#[test]
fn cube_buffers_released_exactly_once() {
    let backend = Rc::new(RecordingBackend::new());
    let mut registry = AssetRegistry::new();
    let program = registry.add_program(ShaderProgram::from_source(backend.clone(), "vs", "fs", "lit"));

    let mut scene = Scene::new();
    for x in 0..3 {
        scene.add_cube(
            Cube::new(backend.clone(), Vec3::new(x as f32, 0.0, 0.0), Vec3::repeat(1.0), [1.0; 3], program)
                .unwrap(),
        );
    }
    let created: Vec<_> = scene.cubes.iter().map(|c| c.mesh().buffers()).collect();
    assert!(backend.deleted_meshes().is_empty());

    drop(scene);

    let deleted = backend.deleted_meshes();
    assert_eq!(deleted.len(), 3);
    for mesh in created {
        assert_eq!(deleted.iter().filter(|m| **m == mesh).count(), 1);
    }
}

#[test]
fn failed_mesh_creation_leaves_nothing_to_release() {
    let backend = Rc::new(RecordingBackend::new());
    let mut registry = AssetRegistry::new();
    let program = registry.add_program(ShaderProgram::from_source(backend.clone(), "vs", "fs", "lit"));

    backend.fail_mesh_creation(true);
    let result = Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program);
    assert!(result.is_err());
    drop(result);

    assert_eq!(backend.count(|c| matches!(c, RecordedCall::CreateMesh { .. })), 0);
    assert!(backend.deleted_meshes().is_empty());

    backend.fail_mesh_creation(false);
    let cube = Cube::new(backend.clone(), Vec3::zeros(), Vec3::repeat(1.0), [1.0; 3], program).unwrap();
    drop(cube);
    assert_eq!(backend.deleted_meshes().len(), 1);
}

#[test]
fn registry_releases_programs_and_textures() {
    let backend = Rc::new(RecordingBackend::new());
    let mut registry = AssetRegistry::new();
    registry.add_program(ShaderProgram::from_source(backend.clone(), "vs", "fs", "lit"));
    registry.add_texture(
        Texture::from_image(backend.clone(), &ImageData::solid_color(1, 1, [0; 4]), SamplerParams::default())
            .unwrap(),
    );
    assert_eq!(registry.program_count(), 1);
    assert_eq!(registry.texture_count(), 1);

    drop(registry);

    assert_eq!(backend.count(|c| matches!(c, RecordedCall::DeleteProgram(_))), 1);
    assert_eq!(backend.count(|c| matches!(c, RecordedCall::DeleteTexture(_))), 1);
}
