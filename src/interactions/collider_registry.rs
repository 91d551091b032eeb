use std::cmp::Ordering;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use crate::interactions::{ray_box, OrientedBox, Ray, RayHit};
use crate::models::{Body, BodyHandle, Quaternion, Vector3};

/// Above this many colliders a ray query fans out over the rayon pool.
#[cfg(feature = "parallel")]
pub const PARALLEL_RAYCAST_THRESHOLD: usize = 256;

/// Snapshot of a body's bounding box as seen by collision queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderProxy {
    pub handle: BodyHandle,
    pub shape: OrientedBox,
    pub enabled: bool,
}

impl ColliderProxy {
    pub fn from_body(handle: BodyHandle, body: &Body) -> Self {
        ColliderProxy {
            handle,
            shape: OrientedBox {
                center: body.position,
                half_extent: body.half_extent,
                orientation: body.orientation,
            },
            enabled: body.collision_enabled,
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let (distance, normal) = ray_box(ray, &self.shape)?;
        Some(RayHit {
            distance,
            point: ray.at(distance),
            normal,
            collider: self.handle,
        })
    }
}

/// Orders hits by distance, then by handle index so ties resolve the same way on every run.
fn nearest_first(a: &RayHit, b: &RayHit) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then(a.collider.index.cmp(&b.collider.index))
}

/// The set of colliders visible to ray queries, stored by handle slot.
///
/// The registry is only mutated between ticks (creation, destruction, teleports, end-of-tick
/// sync), so every probe within one tick sees the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct ColliderRegistry {
    slots: Vec<Option<ColliderProxy>>,
    count: usize,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        ColliderRegistry::default()
    }

    fn slot_mut(&mut self, handle: BodyHandle) -> Option<&mut ColliderProxy> {
        self.slots
            .get_mut(handle.index as usize)?
            .as_mut()
            .filter(|proxy| proxy.handle == handle)
    }

    /// Adds a proxy, replacing whatever occupied the same handle slot.
    pub fn insert(&mut self, proxy: ColliderProxy) {
        let index = proxy.handle.index as usize;
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        if self.slots[index].replace(proxy).is_none() {
            self.count += 1;
        }
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<ColliderProxy> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.as_ref()?.handle != handle {
            return None;
        }
        self.count -= 1;
        slot.take()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&ColliderProxy> {
        self.slots
            .get(handle.index as usize)?
            .as_ref()
            .filter(|proxy| proxy.handle == handle)
    }

    /// Moves a proxy to a new pose. Returns `false` for an unknown handle.
    pub fn update(&mut self, handle: BodyHandle, center: Vector3, orientation: Quaternion) -> bool {
        match self.slot_mut(handle) {
            Some(proxy) => {
                proxy.shape.center = center;
                proxy.shape.orientation = orientation;
                true
            }
            None => false,
        }
    }

    pub fn set_enabled(&mut self, handle: BodyHandle, enabled: bool) -> bool {
        match self.slot_mut(handle) {
            Some(proxy) => {
                proxy.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Proxies in handle-slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ColliderProxy> {
        self.slots.iter().flatten()
    }

    /// Nearest enabled collider hit by `ray`, never reporting `exclude`.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::interactions::{ColliderProxy, ColliderRegistry, Ray};
    /// use rs_point_physics::models::{Body, BodyHandle, Vector3};
    ///
    /// let ground = Body::new_static(Vector3::new(0.0, -1.0, 0.0), Vector3::new(50.0, 1.0, 50.0)).unwrap();
    /// let mut registry = ColliderRegistry::new();
    /// registry.insert(ColliderProxy::from_body(BodyHandle::new(0, 0), &ground));
    ///
    /// let ray = Ray::new(Vector3::new(0.0, 3.0, 0.0), Vector3::DOWN);
    /// let hit = registry.raycast(&ray, None).unwrap();
    /// assert_eq!(hit.distance, 3.0);
    /// assert!(registry.raycast(&ray, Some(BodyHandle::new(0, 0))).is_none());
    /// ```
    pub fn raycast(&self, ray: &Ray, exclude: Option<BodyHandle>) -> Option<RayHit> {
        let candidate = |slot: &Option<ColliderProxy>| -> Option<RayHit> {
            let proxy = slot.as_ref()?;
            if !proxy.enabled || Some(proxy.handle) == exclude {
                return None;
            }
            proxy.intersect(ray)
        };

        #[cfg(feature = "parallel")]
        {
            if self.count >= PARALLEL_RAYCAST_THRESHOLD {
                return self
                    .slots
                    .par_iter()
                    .filter_map(candidate)
                    .min_by(nearest_first);
            }
        }

        self.slots.iter().filter_map(candidate).min_by(nearest_first)
    }
}
