// rs_point_physics_wasm/src/lib.rs
// Browser-facing wrapper: the scene graph keeps a WasmBodyHandle next to each mesh and copies
// positions back after every tick.

use wasm_bindgen::prelude::*;
use rs_point_physics::apis::PhysicsWorld;
use rs_point_physics::errors::PhysicsError;
use rs_point_physics::models::{BodyHandle, CardinalDirection, Quaternion, Vector3};
use rs_point_physics::utils::PhysicsConstants;

fn to_js(error: PhysicsError) -> JsValue {
    let message = JsValue::from_str(&error.to_string());
    web_sys::console::warn_1(&message);
    message
}

fn to_array(v: Vector3) -> js_sys::Float64Array {
    js_sys::Float64Array::from(&[v.x, v.y, v.z][..])
}

#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct WasmBodyHandle(BodyHandle);

#[wasm_bindgen]
impl WasmBodyHandle {
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> u32 {
        self.0.index
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u32 {
        self.0.generation
    }
}

#[wasm_bindgen]
pub struct WasmWorld {
    world: PhysicsWorld,
}

#[wasm_bindgen]
impl WasmWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            world: PhysicsWorld::new(),
        }
    }

    /// Live tuning from a control panel; `undefined` keeps the current value.
    #[wasm_bindgen]
    pub fn tune(
        &mut self,
        gravity: Option<f64>,
        air_resistance: Option<f64>,
        friction: Option<f64>,
        restitution: Option<f64>,
        contact_epsilon: Option<f64>,
        max_time_step: Option<f64>,
    ) -> Result<(), JsValue> {
        let current = *self.world.constants();
        let constants = PhysicsConstants {
            gravity: gravity.unwrap_or(current.gravity),
            air_resistance: air_resistance.unwrap_or(current.air_resistance),
            friction: friction.unwrap_or(current.friction),
            restitution: restitution.unwrap_or(current.restitution),
            contact_epsilon: contact_epsilon.unwrap_or(current.contact_epsilon),
            max_time_step: max_time_step.unwrap_or(current.max_time_step),
            ..current
        };
        self.world.set_constants(constants).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn create_body(&mut self, x: f64, y: f64, z: f64, mass: f64, hx: f64, hy: f64, hz: f64) -> Result<WasmBodyHandle, JsValue> {
        self.world
            .create_body(Vector3::new(x, y, z), mass, Vector3::new(hx, hy, hz))
            .map(WasmBodyHandle)
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn create_static(&mut self, x: f64, y: f64, z: f64, hx: f64, hy: f64, hz: f64, yaw: f64) -> Result<WasmBodyHandle, JsValue> {
        self.world
            .create_static(Vector3::new(x, y, z), Vector3::new(hx, hy, hz), Quaternion::from_yaw(yaw))
            .map(WasmBodyHandle)
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn destroy_body(&mut self, handle: &WasmBodyHandle) -> Result<(), JsValue> {
        self.world.destroy_body(handle.0).map(|_| ()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn add_force(&mut self, handle: &WasmBodyHandle, x: f64, y: f64, z: f64) -> Result<(), JsValue> {
        self.world.add_force(handle.0, Vector3::new(x, y, z)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn add_local_force(&mut self, handle: &WasmBodyHandle, x: f64, y: f64, z: f64) -> Result<(), JsValue> {
        self.world.add_local_force(handle.0, Vector3::new(x, y, z)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_velocity(&mut self, handle: &WasmBodyHandle, x: f64, y: f64, z: f64) -> Result<(), JsValue> {
        self.world.set_velocity(handle.0, Vector3::new(x, y, z)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn rotate_yaw(&mut self, handle: &WasmBodyHandle, angle: f64) -> Result<(), JsValue> {
        self.world.rotate_yaw(handle.0, angle).map_err(to_js)
    }

    /// Advances the world; returns the handles of expired projectiles.
    #[wasm_bindgen]
    pub fn tick(&mut self, delta_time: f64) -> Result<Vec<WasmBodyHandle>, JsValue> {
        let report = self.world.tick(delta_time).map_err(to_js)?;
        Ok(report.expired.into_iter().map(WasmBodyHandle).collect())
    }

    #[wasm_bindgen]
    pub fn position(&self, handle: &WasmBodyHandle) -> Result<js_sys::Float64Array, JsValue> {
        self.world.position(handle.0).map(to_array).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn velocity(&self, handle: &WasmBodyHandle) -> Result<js_sys::Float64Array, JsValue> {
        self.world.velocity(handle.0).map(to_array).map_err(to_js)
    }

    /// Orientation as `[w, x, y, z]`.
    #[wasm_bindgen]
    pub fn orientation(&self, handle: &WasmBodyHandle) -> Result<js_sys::Float64Array, JsValue> {
        let q = self.world.orientation(handle.0).map_err(to_js)?;
        Ok(js_sys::Float64Array::from(&[q.w, q.x, q.y, q.z][..]))
    }

    #[wasm_bindgen]
    pub fn is_grounded(&self, handle: &WasmBodyHandle) -> Result<bool, JsValue> {
        self.world.is_grounded(handle.0).map_err(to_js)
    }

    /// Contact normals flattened as `[dir, nx, ny, nz, ...]`, `dir` being 0..6 in +x, -x,
    /// +y, -y, +z, -z order.
    #[wasm_bindgen]
    pub fn contacts(&self, handle: &WasmBodyHandle) -> Result<js_sys::Float64Array, JsValue> {
        let contacts = self.world.contacts(handle.0).map_err(to_js)?;
        let flat: Vec<f64> = contacts
            .into_iter()
            .flat_map(|(direction, normal): (CardinalDirection, Vector3)| {
                [direction.index() as f64, normal.x, normal.y, normal.z]
            })
            .collect();
        Ok(js_sys::Float64Array::from(&flat[..]))
    }
}

impl Default for WasmWorld {
    fn default() -> Self {
        WasmWorld::new()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn dropped_box_lands_on_ground() {
        let mut world = WasmWorld::new();
        world.create_static(0.0, -1.0, 0.0, 50.0, 1.0, 50.0, 0.0).unwrap();
        let body = world.create_body(0.0, 5.0, 0.0, 1.0, 1.0, 1.0, 1.0).unwrap();

        for _ in 0..1000 {
            assert!(world.tick(0.02).unwrap().is_empty());
        }

        let position = world.position(&body).unwrap().to_vec();
        assert!((position[1] - 1.0).abs() < 0.02);
        assert!(world.is_grounded(&body).unwrap());
        assert_eq!(world.contacts(&body).unwrap().to_vec(), vec![3.0, 0.0, 1.0, 0.0]);
    }

    #[wasm_bindgen_test]
    fn invalid_mass_is_reported() {
        let mut world = WasmWorld::new();
        assert!(world.create_body(0.0, 0.0, 0.0, -1.0, 1.0, 1.0, 1.0).is_err());
    }
}
