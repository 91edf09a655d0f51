use glam::{UVec3, Vec3};
use pbd_scene::camera::Camera;
use pbd_scene::gpu::GpuBuffers;
use pbd_scene::light::PointLight;
use pbd_scene::materials::{BlockDesc, ClothDesc, Corner, RopeDesc};
use pbd_scene::plane::Plane;
use pbd_scene::{BendingMode, FrozenScene, IndexRange, Scene, SceneConfig};
use wasm_bindgen::prelude::*;

fn range_to_js(range: IndexRange) -> Vec<u32> {
    vec![range.start, range.end]
}

fn to_js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// Scene under construction, driven from JavaScript.
#[wasm_bindgen]
pub struct SceneBuilder {
    scene: Option<Scene>,
}

#[wasm_bindgen]
impl SceneBuilder {
    /// `bending_mode`: 0 = long-range distance, 1 = dihedral, 2 = both.
    #[wasm_bindgen(constructor)]
    pub fn new(particle_radius: f32, bending_mode: u32) -> SceneBuilder {
        let config = SceneConfig {
            particle_radius,
            bending_mode: match bending_mode {
                1 => BendingMode::Dihedral,
                2 => BendingMode::Both,
                _ => BendingMode::LongRange,
            },
            ..SceneConfig::default()
        };
        SceneBuilder {
            scene: Some(Scene::new(config)),
        }
    }

    #[wasm_bindgen]
    pub fn num_particles(&self) -> usize {
        self.scene.as_ref().map_or(0, Scene::num_particles)
    }

    /// `dimension`, `start` and `step` are 3-component arrays. Returns `[start, end)`.
    #[wasm_bindgen]
    pub fn add_rigid_box(
        &mut self,
        dimension: &[u32],
        start: &[f32],
        step: &[f32],
        mass_per_particle: f32,
    ) -> Result<Vec<u32>, JsError> {
        let desc = block_desc(dimension, start, step, mass_per_particle)?;
        self.scene()?
            .add_rigid_box(&desc)
            .map(range_to_js)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn add_granulars_block(
        &mut self,
        dimension: &[u32],
        start: &[f32],
        step: &[f32],
        mass_per_particle: f32,
    ) -> Result<Vec<u32>, JsError> {
        let desc = block_desc(dimension, start, step, mass_per_particle)?;
        self.scene()?
            .add_granulars_block(&desc)
            .map(range_to_js)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn add_fluid_block(
        &mut self,
        dimension: &[u32],
        start: &[f32],
        step: &[f32],
        mass_per_particle: f32,
    ) -> Result<Vec<u32>, JsError> {
        let desc = block_desc(dimension, start, step, mass_per_particle)?;
        self.scene()?
            .add_fluid_block(&desc)
            .map(range_to_js)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn add_rope(
        &mut self,
        start: &[f32],
        end: &[f32],
        num_joints: u32,
        mass_per_particle: f32,
    ) -> Result<Vec<u32>, JsError> {
        let desc = RopeDesc::between(
            vec3_from_js("start", start)?,
            vec3_from_js("end", end)?,
            num_joints,
            mass_per_particle,
        );
        self.scene()?
            .add_rope(&desc)
            .map(range_to_js)
            .map_err(to_js_error)
    }

    /// `pinned_corners` is a bit mask over the four grid corners.
    #[wasm_bindgen]
    pub fn add_cloth(
        &mut self,
        start: &[f32],
        step_x: &[f32],
        step_y: &[f32],
        num_joints_x: u32,
        num_joints_y: u32,
        mass_per_particle: f32,
        stretch_stiffness: f32,
        bending_stiffness: f32,
        pinned_corners: u32,
        self_collidable: bool,
    ) -> Result<Vec<u32>, JsError> {
        let mut desc = ClothDesc::new(
            vec3_from_js("start", start)?,
            vec3_from_js("step_x", step_x)?,
            vec3_from_js("step_y", step_y)?,
            num_joints_x,
            num_joints_y,
            mass_per_particle,
        )
        .with_stiffness(stretch_stiffness, bending_stiffness)
        .self_collidable(self_collidable);
        for (bit, corner) in Corner::ALL.into_iter().enumerate() {
            if pinned_corners & (1 << bit) != 0 {
                desc = desc.pin(corner);
            }
        }
        self.scene()?
            .add_cloth(&desc)
            .map(range_to_js)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn make_immovable(&mut self, id: u32) -> Result<bool, JsError> {
        self.scene()?.make_immovable(id).map_err(to_js_error)
    }

    /// Pin every particle in `[start, end)`.
    #[wasm_bindgen]
    pub fn make_range_immovable(&mut self, start: u32, end: u32) -> Result<(), JsError> {
        self.scene()?
            .make_range_immovable(IndexRange { start, end })
            .map_err(to_js_error)
    }

    /// `fov_y` in radians.
    #[wasm_bindgen]
    pub fn set_camera(
        &mut self,
        pos: &[f32],
        look_at: &[f32],
        fov_y: f32,
        aspect_ratio: f32,
    ) -> Result<(), JsError> {
        let camera = Camera::new(
            vec3_from_js("pos", pos)?,
            vec3_from_js("look_at", look_at)?,
            fov_y,
            aspect_ratio,
        )
        .map_err(to_js_error)?;
        self.scene()?.set_camera(camera);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_point_light(
        &mut self,
        position: &[f32],
        direction: &[f32],
        intensity: &[f32],
    ) -> Result<(), JsError> {
        let light = PointLight::new(
            vec3_from_js("position", position)?,
            vec3_from_js("direction", direction)?,
            vec3_from_js("intensity", intensity)?,
        );
        self.scene()?.set_point_light(light);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn add_plane(&mut self, origin: &[f32], normal: &[f32]) -> Result<(), JsError> {
        let origin = vec3_from_js("origin", origin)?;
        let normal = vec3_from_js("normal", normal)?;
        let plane = Plane::new(origin, normal).map_err(to_js_error)?;
        self.scene()?.add_plane(plane);
        Ok(())
    }

    /// Ends the build phase; the builder cannot be used afterwards.
    #[wasm_bindgen]
    pub fn freeze(&mut self) -> Result<SceneBuffers, JsError> {
        let scene = self
            .scene
            .take()
            .ok_or_else(|| JsError::new("scene has already been frozen"))?;
        let start = js_sys::Date::now();
        let frozen = scene.freeze();
        let gpu = frozen.to_gpu_buffers();
        web_sys::console::log_1(
            &format!(
                "Scene frozen: {} particles, {} distance constraints, {} bytes in {:.1} ms",
                frozen.num_particles(),
                frozen.distance_constraints().len(),
                gpu.byte_len(),
                js_sys::Date::now() - start
            )
            .into(),
        );
        Ok(SceneBuffers { frozen, gpu })
    }
}

impl SceneBuilder {
    fn scene(&mut self) -> Result<&mut Scene, JsError> {
        self.scene
            .as_mut()
            .ok_or_else(|| JsError::new("scene has already been frozen"))
    }
}

/// Frozen scene with its device-layout arrays, readable as typed-array views.
#[wasm_bindgen]
pub struct SceneBuffers {
    frozen: FrozenScene,
    gpu: GpuBuffers,
}

#[wasm_bindgen]
impl SceneBuffers {
    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.frozen.num_particles()
    }

    #[wasm_bindgen]
    pub fn particle_radius(&self) -> f32 {
        self.frozen.config().particle_radius
    }

    #[wasm_bindgen]
    pub fn fluid_kernel_radius(&self) -> f32 {
        self.frozen.config().fluid_kernel_radius()
    }

    #[wasm_bindgen]
    pub fn positions(&self) -> Vec<f32> {
        bytemuck::cast_slice(&self.gpu.positions).to_vec()
    }

    #[wasm_bindgen]
    pub fn masses(&self) -> Vec<f32> {
        self.gpu.masses.clone()
    }

    #[wasm_bindgen]
    pub fn phases(&self) -> Vec<i32> {
        self.gpu.phases.clone()
    }

    #[wasm_bindgen]
    pub fn group_ids(&self) -> Vec<i32> {
        self.gpu.group_ids.clone()
    }

    /// Raw bytes of the 16-byte distance constraint records.
    #[wasm_bindgen]
    pub fn distance_constraints(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.gpu.distance_constraints).to_vec()
    }

    #[wasm_bindgen]
    pub fn bendings(&self) -> Vec<i32> {
        bytemuck::cast_slice(&self.gpu.bendings).to_vec()
    }

    #[wasm_bindgen]
    pub fn faces(&self) -> Vec<i32> {
        bytemuck::cast_slice(&self.gpu.faces).to_vec()
    }

    #[wasm_bindgen]
    pub fn rigid_rest_positions(&self) -> Vec<f32> {
        bytemuck::cast_slice(&self.gpu.rigid_rest_positions).to_vec()
    }

    #[wasm_bindgen]
    pub fn rigid_ranges(&self) -> Vec<i32> {
        bytemuck::cast_slice(&self.gpu.rigid_ranges).to_vec()
    }

    #[wasm_bindgen]
    pub fn immovables(&self) -> Vec<i32> {
        self.gpu.immovables.clone()
    }

    /// Column-major 4x4 model matrices, one per plane.
    #[wasm_bindgen]
    pub fn plane_matrices(&self) -> Vec<f32> {
        self.frozen
            .planes()
            .iter()
            .flat_map(|p| p.model_matrix.to_cols_array())
            .collect()
    }
}

fn vec3_from_js(name: &str, values: &[f32]) -> Result<Vec3, JsError> {
    <[f32; 3]>::try_from(values)
        .map(Vec3::from_array)
        .map_err(|_| component_error(name, values.len()))
}

fn uvec3_from_js(name: &str, values: &[u32]) -> Result<UVec3, JsError> {
    <[u32; 3]>::try_from(values)
        .map(UVec3::from_array)
        .map_err(|_| component_error(name, values.len()))
}

fn component_error(name: &str, len: usize) -> JsError {
    JsError::new(&format!("`{name}` must have 3 components, got {len}"))
}

fn block_desc(
    dimension: &[u32],
    start: &[f32],
    step: &[f32],
    mass_per_particle: f32,
) -> Result<BlockDesc, JsError> {
    Ok(BlockDesc::new(
        uvec3_from_js("dimension", dimension)?,
        vec3_from_js("start", start)?,
        vec3_from_js("step", step)?,
        mass_per_particle,
    ))
}
