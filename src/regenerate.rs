//! Swapping in a freshly generated galaxy.
//!
//! [`RegenerationManager::regenerate`] runs the whole replacement on the
//! calling thread: generate, build the new resource, release and detach the
//! old one, attach the new one. The new resource is complete before the old
//! one is touched, so a failure at any step leaves the scene as it was.

use std::time::{Duration, Instant};

use crate::error::RegenerationError;
use crate::generator::GalaxyGenerator;
use crate::params::GalaxyParameters;
use crate::resource::{PointCloud, PointCloudBuilder, Scene};

/// Outcome of a successful regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegenerationReport {
    /// Points in the newly attached cloud.
    pub point_count: u32,
    /// Number of successful regenerations so far, this one included.
    pub generation: u64,
    /// Time spent generating and building.
    pub elapsed: Duration,
}

/// Sole writer of the scene's point cloud slot.
pub struct RegenerationManager {
    generator: GalaxyGenerator,
    generation: u64,
}

impl RegenerationManager {
    /// Manager with an entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_generator(GalaxyGenerator::new())
    }

    /// Manager producing a reproducible sequence of galaxies.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(GalaxyGenerator::with_seed(seed))
    }

    pub fn with_generator(generator: GalaxyGenerator) -> Self {
        Self {
            generator,
            generation: 0,
        }
    }

    /// Successful regenerations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch to a fresh random seed for subsequent regenerations.
    pub fn reseed(&mut self) {
        self.generator.reseed();
    }

    /// Replace the scene's point cloud with one generated from `params`.
    ///
    /// On error nothing in `scene` changes.
    pub fn regenerate<B: PointCloudBuilder>(
        &mut self,
        params: &GalaxyParameters,
        builder: &mut B,
        scene: &mut Scene<B::Resource>,
    ) -> Result<RegenerationReport, RegenerationError> {
        let start = Instant::now();

        let built = self
            .generator
            .generate(params)
            .map_err(RegenerationError::from)
            .and_then(|points| builder.build(&points).map_err(RegenerationError::from));

        let resource = match built {
            Ok(resource) => resource,
            Err(e) => {
                log::error!("regeneration aborted, keeping current galaxy: {}", e);
                return Err(e);
            }
        };

        if let Some(mut old) = scene.detach() {
            old.release();
        }
        let point_count = resource.point_count();
        scene.attach(resource);

        self.generation += 1;
        let report = RegenerationReport {
            point_count,
            generation: self.generation,
            elapsed: start.elapsed(),
        };
        log::info!(
            "galaxy #{} ready: {} points in {:.1} ms",
            report.generation,
            report.point_count,
            report.elapsed.as_secs_f64() * 1000.0
        );
        Ok(report)
    }
}

impl Default for RegenerationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use crate::error::ResourceError;
    use crate::generator::GalaxyPoints;
    use crate::params::ParamField;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Cloud {
        id: u32,
        count: u32,
        released: Rc<Cell<bool>>,
    }

    impl PointCloud for Cloud {
        fn point_count(&self) -> u32 {
            self.count
        }

        fn release(&mut self) {
            self.released.set(true);
        }

        fn is_released(&self) -> bool {
            self.released.get()
        }
    }

    #[derive(Default)]
    struct Builder {
        next_id: u32,
        fail: bool,
        flags: Vec<Rc<Cell<bool>>>,
    }

    impl PointCloudBuilder for Builder {
        type Resource = Cloud;

        fn build(&mut self, points: &GalaxyPoints) -> Result<Cloud, ResourceError> {
            if self.fail {
                return Err(ResourceError::Device("out of memory".into()));
            }
            let released = Rc::new(Cell::new(false));
            self.flags.push(released.clone());
            self.next_id += 1;
            Ok(Cloud {
                id: self.next_id,
                count: points.len() as u32,
                released,
            })
        }
    }

    fn params() -> GalaxyParameters {
        GalaxyParameters::default().with(ParamField::Count, 200.0)
    }

    #[test]
    fn test_first_regeneration_attaches() {
        let mut manager = RegenerationManager::with_seed(1);
        let mut builder = Builder::default();
        let mut scene = Scene::new(OrbitCamera::new());

        let report = manager.regenerate(&params(), &mut builder, &mut scene).unwrap();
        assert_eq!(report.point_count, 200);
        assert_eq!(report.generation, 1);
        assert_eq!(scene.points().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_regeneration_releases_previous() {
        let mut manager = RegenerationManager::with_seed(1);
        let mut builder = Builder::default();
        let mut scene = Scene::new(OrbitCamera::new());

        manager.regenerate(&params(), &mut builder, &mut scene).unwrap();
        manager.regenerate(&params(), &mut builder, &mut scene).unwrap();

        assert!(builder.flags[0].get());
        assert!(!builder.flags[1].get());
        assert_eq!(scene.points().map(|c| c.id), Some(2));
        assert_eq!(manager.generation(), 2);
    }

    #[test]
    fn test_failed_build_keeps_previous() {
        let mut manager = RegenerationManager::with_seed(1);
        let mut builder = Builder::default();
        let mut scene = Scene::new(OrbitCamera::new());
        manager.regenerate(&params(), &mut builder, &mut scene).unwrap();

        builder.fail = true;
        let result = manager.regenerate(&params(), &mut builder, &mut scene);

        assert!(matches!(result, Err(RegenerationError::ResourceBuild(_))));
        let current = scene.points().unwrap();
        assert_eq!(current.id, 1);
        assert!(!current.is_released());
        assert_eq!(manager.generation(), 1);
    }

    #[test]
    fn test_failed_first_build_leaves_scene_empty() {
        let mut manager = RegenerationManager::with_seed(1);
        let mut builder = Builder {
            fail: true,
            ..Default::default()
        };
        let mut scene = Scene::new(OrbitCamera::new());

        assert!(manager.regenerate(&params(), &mut builder, &mut scene).is_err());
        assert!(scene.points().is_none());
    }
}
