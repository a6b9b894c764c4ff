//! Procedural spiral galaxy generation.
//!
//! Points are spread along `branches` evenly spaced arms. Each point gets a
//! uniform random radius, is twisted by `radius * spin` and then scattered
//! around the arm centerline on all three axes:
//!
//! ```text
//! r      = U(0,1) * radius
//! angle  = (i mod branches) / branches * TAU + r * spin
//! offset = ±U(0,1)^power * randomness * r        (per axis, independent sign)
//! p      = (cos(angle) * r + offset.x, offset.y, sin(angle) * r + offset.z)
//! ```
//!
//! The radius draw is linear rather than area-uniform, so points
//! concentrate toward the core.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GenerationError;
use crate::params::GalaxyParameters;

/// How overlapping points combine with what is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Additive blending.
    ///
    /// Colors sum, so dense regions such as the galaxy core glow brighter.
    #[default]
    Additive,
}

/// Render attributes of a generated point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    /// Point size. World units when attenuated, pixels otherwise.
    pub size: f32,
    /// Whether points shrink with distance from the camera.
    pub size_attenuation: bool,
    pub blend_mode: BlendMode,
    pub transparent: bool,
    /// Galaxy points never write depth so they cannot occlude each other.
    pub depth_write: bool,
    /// Use per-point colors instead of a flat white.
    pub vertex_colors: bool,
}

impl PointMaterial {
    /// Material used for galaxy point clouds.
    pub fn galaxy(size: f32) -> Self {
        Self {
            size,
            size_attenuation: true,
            blend_mode: BlendMode::Additive,
            transparent: true,
            depth_write: false,
            vertex_colors: true,
        }
    }

    /// Whether both materials can be drawn by the same pipeline.
    ///
    /// Blend and depth state are baked into a pipeline; size and color
    /// source are per-cloud uniforms.
    pub fn shares_pipeline_state(&self, other: &PointMaterial) -> bool {
        self.blend_mode == other.blend_mode
            && self.transparent == other.transparent
            && self.depth_write == other.depth_write
    }
}

/// Generator output: one position and one linear color per point, plus the
/// material to draw them with.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyPoints {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    material: PointMaterial,
}

impl GalaxyPoints {
    /// A point cloud with no points. Renders nothing.
    pub fn empty(material: PointMaterial) -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            material,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Linear RGB color per point.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }
}

/// Arm that point `index` belongs to.
pub fn branch_index(index: u32, branches: u32) -> u32 {
    index % branches.max(1)
}

/// Base angle of the arm that point `index` belongs to, in radians.
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    let branches = branches.max(1);
    branch_index(index, branches) as f32 / branches as f32 * TAU
}

/// Generate a galaxy from `params`, drawing randomness from `rng`.
///
/// Parameters are clamped into range first. The function has no side
/// effects beyond advancing `rng`; the same parameters with an identically
/// seeded RNG always produce identical output.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> Result<GalaxyPoints, GenerationError> {
    let params = params.clamped();
    let count = params.count() as usize;

    let mut positions = Vec::new();
    let mut colors = Vec::new();
    positions
        .try_reserve_exact(count)
        .and_then(|_| colors.try_reserve_exact(count))
        .map_err(|_| GenerationError::Allocation { count })?;

    let inside = srgb_to_linear(Vec3::from(params.inside_color()));
    let outside = srgb_to_linear(Vec3::from(params.outside_color()));
    let max_radius = params.radius();

    for i in 0..params.count() {
        let radius = rng.gen::<f32>() * max_radius;
        let angle = branch_angle(i, params.branches()) + radius * params.spin();

        let offset = Vec3::new(
            scatter(rng, &params, radius),
            scatter(rng, &params, radius),
            scatter(rng, &params, radius),
        );

        positions.push(Vec3::new(
            angle.cos() * radius + offset.x,
            offset.y,
            angle.sin() * radius + offset.z,
        ));

        let t = if max_radius > 0.0 { radius / max_radius } else { 0.0 };
        colors.push(inside.lerp(outside, t));
    }

    Ok(GalaxyPoints {
        positions,
        colors,
        material: PointMaterial::galaxy(params.size()),
    })
}

/// Signed offset from the arm centerline along one axis.
fn scatter<R: Rng + ?Sized>(rng: &mut R, params: &GalaxyParameters, radius: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(params.randomness_power());
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    sign * magnitude * params.randomness() * radius
}

fn srgb_to_linear(color: Vec3) -> Vec3 {
    let channel = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(color.x), channel(color.y), channel(color.z))
}

/// A generator that owns its random source.
pub struct GalaxyGenerator {
    rng: StdRng,
}

impl GalaxyGenerator {
    /// Generator seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator with a fixed seed, for reproducible galaxies.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replace the random source with a fresh entropy-seeded one.
    pub fn reseed(&mut self) {
        self.rng = StdRng::from_entropy();
    }

    /// Generate a galaxy, advancing the owned RNG.
    pub fn generate(&mut self, params: &GalaxyParameters) -> Result<GalaxyPoints, GenerationError> {
        generate(params, &mut self.rng)
    }
}

impl Default for GalaxyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamField;

    fn small_params() -> GalaxyParameters {
        GalaxyParameters::default()
            .with(ParamField::Count, 1_000.0)
            .with(ParamField::Radius, 5.0)
            .with(ParamField::Randomness, 0.5)
    }

    #[test]
    fn test_generates_exactly_count_points() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = generate(&small_params(), &mut rng).unwrap();
        assert_eq!(points.len(), 1_000);
        assert_eq!(points.colors().len(), 1_000);
    }

    #[test]
    fn test_radius_and_offset_bounds() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate(&params, &mut rng).unwrap();

        // |offset| <= randomness * r per axis and r <= radius
        let limit = params.radius() * (1.0 + params.randomness()) * 1.0001;
        for p in points.positions() {
            assert!(p.x.abs() <= limit);
            assert!(p.z.abs() <= limit);
            assert!(p.y.abs() <= params.randomness() * params.radius() * 1.0001);
        }
    }

    #[test]
    fn test_zero_randomness_lies_on_arms() {
        let params = GalaxyParameters::default()
            .with(ParamField::Count, 300.0)
            .with(ParamField::Branches, 3.0)
            .with(ParamField::Spin, 0.0)
            .with(ParamField::Randomness, 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let points = generate(&params, &mut rng).unwrap();

        for (i, p) in points.positions().iter().enumerate() {
            assert_eq!(p.y, 0.0);
            let r = p.length();
            if r > 1e-4 {
                let expected = branch_angle(i as u32, 3);
                let direction = Vec3::new(expected.cos(), 0.0, expected.sin());
                assert!((p.normalize() - direction).length() < 1e-3, "point {i}");
            }
        }
    }

    #[test]
    fn test_branch_index_modulo() {
        assert_eq!(branch_index(0, 3), 0);
        assert_eq!(branch_index(4, 3), 1);
        assert_eq!(branch_index(8, 3), 2);
        assert!((branch_angle(1, 2) - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(branch_angle(2, 2), 0.0);
    }

    #[test]
    fn test_same_seed_same_output() {
        let params = small_params();
        let a = GalaxyGenerator::with_seed(42).generate(&params).unwrap();
        let b = GalaxyGenerator::with_seed(42).generate(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generator_advances_rng() {
        let params = small_params();
        let mut generator = GalaxyGenerator::with_seed(42);
        let first = generator.generate(&params).unwrap();
        let second = generator.generate(&params).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_colors_blend_from_inside_to_outside() {
        let params = GalaxyParameters::default()
            .with(ParamField::Count, 500.0)
            .with_colors([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(11);
        let points = generate(&params, &mut rng).unwrap();

        for c in points.colors() {
            assert!((c.x + c.z - 1.0).abs() < 1e-5);
            assert_eq!(c.y, 0.0);
        }
    }

    #[test]
    fn test_material_follows_size() {
        let params = GalaxyParameters::default().with(ParamField::Size, 0.05);
        let mut rng = StdRng::seed_from_u64(0);
        let points = generate(&params, &mut rng).unwrap();
        let material = points.material();
        assert_eq!(material.size, 0.05);
        assert_eq!(material.blend_mode, BlendMode::Additive);
        assert!(material.size_attenuation);
        assert!(material.transparent);
        assert!(!material.depth_write);
    }

    #[test]
    fn test_pipeline_state_ignores_size_only() {
        let small = PointMaterial::galaxy(0.001);
        let large = PointMaterial::galaxy(0.1);
        assert!(small.shares_pipeline_state(&large));

        let opaque = PointMaterial {
            transparent: false,
            ..small
        };
        let depth_writing = PointMaterial {
            depth_write: true,
            ..small
        };
        assert!(!small.shares_pipeline_state(&opaque));
        assert!(!small.shares_pipeline_state(&depth_writing));
    }

    #[test]
    fn test_extreme_parameters_stay_finite() {
        let params = GalaxyParameters::default()
            .with(ParamField::Count, 10_000.0)
            .with(ParamField::Radius, 20.0)
            .with(ParamField::Spin, -5.0)
            .with(ParamField::Randomness, 2.0)
            .with(ParamField::RandomnessPower, 10.0)
            .with(ParamField::Branches, 20.0);
        let mut rng = StdRng::seed_from_u64(99);
        let points = generate(&params, &mut rng).unwrap();
        assert!(points.positions().iter().all(|p| p.is_finite()));
        assert!(points.colors().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(Vec3::ZERO), Vec3::ZERO);
        assert!((srgb_to_linear(Vec3::ONE) - Vec3::ONE).length() < 1e-6);
    }
}
