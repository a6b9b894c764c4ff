//! Point cloud resources and the scene slot that owns them.
//!
//! A [`PointCloud`] is the renderable form of a [`GalaxyPoints`] buffer,
//! usually GPU-resident. The [`Scene`] owns at most one of them; only the
//! regeneration module may put one in or take one out.

use crate::camera::OrbitCamera;
use crate::error::ResourceError;
use crate::generator::GalaxyPoints;

/// A renderable point cloud with explicitly released backing memory.
pub trait PointCloud {
    /// Number of points drawn.
    fn point_count(&self) -> u32;

    /// Free the backing memory. Calling it again is a no-op.
    fn release(&mut self);

    /// Whether [`release`](Self::release) has run.
    fn is_released(&self) -> bool;
}

/// Turns generator output into a [`PointCloud`].
pub trait PointCloudBuilder {
    type Resource: PointCloud;

    fn build(&mut self, points: &GalaxyPoints) -> Result<Self::Resource, ResourceError>;
}

/// The camera plus a single-occupancy point cloud slot.
pub struct Scene<R: PointCloud> {
    points: Option<R>,
    camera: OrbitCamera,
}

impl<R: PointCloud> Scene<R> {
    pub fn new(camera: OrbitCamera) -> Self {
        Self { points: None, camera }
    }

    /// The point cloud currently drawn, if any.
    pub fn points(&self) -> Option<&R> {
        self.points.as_ref()
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Borrow the camera mutably and the point cloud immutably at once.
    pub fn frame_parts(&mut self) -> (&mut OrbitCamera, Option<&R>) {
        (&mut self.camera, self.points.as_ref())
    }

    /// Put `resource` in the slot, handing back whatever was there.
    pub(crate) fn attach(&mut self, resource: R) -> Option<R> {
        self.points.replace(resource)
    }

    /// Take the point cloud out of the slot.
    pub(crate) fn detach(&mut self) -> Option<R> {
        self.points.take()
    }

    /// Detach and release the current point cloud. Used on teardown.
    pub fn clear(&mut self) {
        if let Some(mut points) = self.detach() {
            points.release();
            log::debug!("released point cloud ({} points)", points.point_count());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        count: u32,
        released: bool,
    }

    impl PointCloud for Dummy {
        fn point_count(&self) -> u32 {
            self.count
        }

        fn release(&mut self) {
            self.released = true;
        }

        fn is_released(&self) -> bool {
            self.released
        }
    }

    #[test]
    fn test_scene_starts_empty() {
        let scene: Scene<Dummy> = Scene::new(OrbitCamera::new());
        assert!(scene.points().is_none());
    }

    #[test]
    fn test_attach_returns_previous() {
        let mut scene = Scene::new(OrbitCamera::new());
        assert!(scene.attach(Dummy { count: 1, released: false }).is_none());

        let previous = scene.attach(Dummy { count: 2, released: false });
        assert_eq!(previous.map(|d| d.count), Some(1));
        assert_eq!(scene.points().map(|d| d.count), Some(2));
    }

    #[test]
    fn test_clear_empties_slot() {
        let mut scene = Scene::new(OrbitCamera::new());
        scene.attach(Dummy { count: 3, released: false });
        scene.clear();
        assert!(scene.points().is_none());
    }
}
