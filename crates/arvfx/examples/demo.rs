//! Demo showing both particle pipelines with in-memory collaborators.
//!
//! Samples an octahedron into attribute maps, then reconstructs a position
//! map from a synthetic depth ramp. Run with `RUST_LOG=debug` to see the
//! pipeline logs.

use std::sync::Arc;

use arvfx::*;
use rand::SeedableRng;

struct Octahedron;

impl MeshSource for Octahedron {
    fn mesh(&self) -> Option<Mesh> {
        let positions = vec![
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        let normals = positions.clone();
        let triangles = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];
        Mesh::new(positions, normals, triangles).ok()
    }

    fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::new(0.0, 0.0, -4.0))
    }
}

struct FixedCamera;

impl CameraSource for FixedCamera {
    fn viewport_camera(&self) -> Option<ViewportCamera> {
        Some(ViewportCamera::new(
            Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y),
            Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.1, 100.0),
        ))
    }

    fn orientation(&self) -> DeviceOrientation {
        DeviceOrientation::Portrait
    }
}

struct DepthRamp;

impl SensorSource for DepthRamp {
    fn latest_frame(&self) -> SensorFrame {
        let (width, height) = (64, 48);
        let projection = Mat4::perspective_rh(60f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        let depth: Vec<f32> = (0..width * height)
            .map(|i| 1.0 + (i % width) as f32 / width as f32)
            .collect();
        SensorFrame {
            matrices: Some(CameraMatrices::from_view_projection(projection, Mat4::IDENTITY)),
            depth: DepthImage::new(width, height, depth).ok(),
            stencil: StencilImage::new(width, height, vec![255; (width * height) as usize])
                .ok()
                .map(Arc::new),
            color: None,
        }
    }
}

/// Prints what a renderer would receive.
struct LogSink;

impl VfxSink for LogSink {
    fn set_texture(&mut self, name: &str, texture: VfxTexture) {
        match texture {
            VfxTexture::Float(t) => println!("{name}: {}x{} RGBA32F", t.width(), t.height()),
            VfxTexture::Color(c) => println!("{name}: {}x{} RGBA8", c.width(), c.height()),
            VfxTexture::Stencil(s) => println!("{name}: {}x{} stencil", s.width(), s.height()),
        }
    }

    fn set_vector3(&mut self, name: &str, value: Vec3) {
        println!("{name}: {value}");
    }
}

fn main() -> Result<()> {
    init_logging();

    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let mut mesh_particles =
        MeshParticles::new(Octahedron, FixedCamera, LogSink, SamplerOptions::default());
    mesh_particles.start();

    let frame = image::RgbaImage::from_fn(128, 72, |x, y| {
        image::Rgba([(x * 2) as u8, (y * 3) as u8, 128, 255])
    });
    mesh_particles.on_camera_frame(&frame)?;

    if let Some(count) = mesh_particles.tick(&mut rng) {
        println!("sampled {count} points");
    }
    mesh_particles.stop();

    let mut depth_particles = DepthParticles::new(
        DepthRamp,
        LogSink,
        DepthOptions {
            encoding: DepthEncoding::Linear,
            ..Default::default()
        },
    );
    depth_particles.start();
    depth_particles.tick();
    if let Some(map) = depth_particles.position_map() {
        let center = map.texel(i64::from(map.width() / 2), i64::from(map.height() / 2));
        println!("center pixel world position: {}", center.rgb());
    }
    depth_particles.stop();

    Ok(())
}
