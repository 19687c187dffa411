/*
MIT License

Copyright (c) 2025 Vincent Hiribarren

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use cgmath::{Matrix4, PerspectiveFov, Point3, Rad, Vector3, point3, vec3};
use log::{debug, warn};
use std::f32::consts::PI;
use std::sync::LazyLock;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::Dimensions;

static SWITCH_Z_AXIS: LazyLock<Matrix4<f32>> =
    LazyLock::new(|| Matrix4::from_nonuniform_scale(1., 1., -1.));
static TO_WEBGPU_NDCS: LazyLock<Matrix4<f32>> = LazyLock::new(|| {
    Matrix4::from_translation(vec3(0., 0., 0.5)) * Matrix4::from_nonuniform_scale(1., 1., 0.5)
});

pub struct CameraView {
    pub eye: Point3<f32>,
    pub center: Point3<f32>,
    pub up: Vector3<f32>,
}

impl CameraView {
    #[must_use]
    pub fn calc_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_lh(self.eye, self.center, self.up)
    }
}

impl Default for CameraView {
    fn default() -> Self {
        Viewpoint::Front.view()
    }
}

pub trait CameraProjection {
    fn calc_projection(&self) -> Matrix4<f32>;
    fn resize_screen(&mut self, dimensions: Dimensions);
}

pub struct PerspectiveCameraConfig {
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCameraConfig {
    fn default() -> Self {
        Self {
            fovy: PI / 4.0,
            aspect: 800. / 600.,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraProjection for PerspectiveCameraConfig {
    fn calc_projection(&self) -> Matrix4<f32> {
        Matrix4::from(PerspectiveFov {
            fovy: Rad(self.fovy),
            aspect: self.aspect,
            near: self.near,
            far: self.far,
        })
    }
    fn resize_screen(&mut self, dimensions: Dimensions) {
        self.aspect = dimensions.surface_ratio();
    }
}

pub struct Camera {
    projection: Box<dyn CameraProjection>,
    view: CameraView,
    projection_cache: Matrix4<f32>,
    view_cache: Matrix4<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            CameraView::default(),
            Box::new(PerspectiveCameraConfig::default()),
        )
    }
}

impl Camera {
    #[must_use]
    pub fn new(view: CameraView, projection: Box<dyn CameraProjection>) -> Self {
        let view_cache = view.calc_view_matrix();
        let projection_cache = projection.calc_projection();
        Self {
            projection,
            view,
            projection_cache,
            view_cache,
        }
    }
    pub fn set_view(&mut self, view: CameraView) {
        self.view = view;
        self.view_cache = self.view.calc_view_matrix();
    }
    pub fn resize_screen(&mut self, dimensions: Dimensions) {
        self.projection.resize_screen(dimensions);
        self.projection_cache = self.projection.calc_projection();
    }
    #[must_use]
    pub fn get_camera_matrix(&self) -> Matrix4<f32> {
        (*TO_WEBGPU_NDCS) * self.projection_cache * (*SWITCH_Z_AXIS) * self.view_cache
    }
    #[must_use]
    pub fn eye_position(&self) -> Point3<f32> {
        self.view.eye
    }
    #[must_use]
    pub fn up_direction(&self) -> Vector3<f32> {
        self.view.up
    }
}

/// The three fixed viewpoints of the demo, all looking at the scene center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewpoint {
    Front,
    Top,
    Side,
}

impl Viewpoint {
    pub const VIEW_DISTANCE: f32 = 10.0;

    /// Eye and up vector of the preset. The top view cannot keep the +Y up
    /// vector since it is colinear with its viewing direction, it uses -Z.
    #[must_use]
    pub fn view(&self) -> CameraView {
        let (eye, up) = match self {
            Viewpoint::Front => (point3(0., 0., Self::VIEW_DISTANCE), vec3(0., 1., 0.)),
            Viewpoint::Top => (point3(0., Self::VIEW_DISTANCE, 0.), vec3(0., 0., -1.)),
            Viewpoint::Side => (point3(Self::VIEW_DISTANCE, 0., 0.), vec3(0., 1., 0.)),
        };
        CameraView {
            eye,
            center: point3(0., 0., 0.),
            up,
        }
    }
}

#[must_use]
pub fn viewpoint_for_key(key_code: KeyCode) -> Option<Viewpoint> {
    match key_code {
        KeyCode::Digit1 => Some(Viewpoint::Front),
        KeyCode::Digit2 => Some(Viewpoint::Top),
        KeyCode::Digit3 => Some(Viewpoint::Side),
        _ => None,
    }
}

/// Camera switching between the fixed viewpoints on Digit1/2/3 key presses.
pub struct ViewpointCamera {
    pub camera: Camera,
    current: Viewpoint,
}

impl ViewpointCamera {
    const INITIAL_VIEWPOINT: Viewpoint = Viewpoint::Front;

    #[must_use]
    pub fn new(mut camera: Camera) -> Self {
        camera.set_view(Self::INITIAL_VIEWPOINT.view());
        Self {
            camera,
            current: Self::INITIAL_VIEWPOINT,
        }
    }

    #[must_use]
    pub fn current_viewpoint(&self) -> Viewpoint {
        self.current
    }

    pub fn switch_to(&mut self, viewpoint: Viewpoint) {
        self.current = viewpoint;
        self.camera.set_view(viewpoint.view());
    }

    #[must_use]
    pub fn get_camera_matrix(&self) -> Matrix4<f32> {
        self.camera.get_camera_matrix()
    }

    pub fn update_screen_size(&mut self, dimensions: Dimensions) {
        self.camera.resize_screen(dimensions);
    }

    pub fn keyboard_event_listener(&mut self, input: &KeyEvent) {
        let PhysicalKey::Code(key_code) = input.physical_key else {
            warn!("Strange key pushed");
            return;
        };
        if input.state != ElementState::Pressed {
            return;
        }
        if let Some(viewpoint) = viewpoint_for_key(key_code) {
            debug!("Switching to {viewpoint:?} viewpoint");
            self.switch_to(viewpoint);
        }
    }
}

impl AsRef<Camera> for ViewpointCamera {
    fn as_ref(&self) -> &Camera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, InnerSpace, Vector4};

    fn project_origin(camera: &Camera) -> (f32, f32, f32) {
        let clip = camera.get_camera_matrix() * Vector4::new(0., 0., 0., 1.);
        (clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
    }

    #[test]
    fn presets_look_at_scene_center_from_fixed_distance() {
        for viewpoint in [Viewpoint::Front, Viewpoint::Top, Viewpoint::Side] {
            let view = viewpoint.view();
            assert_eq!(view.center, point3(0., 0., 0.));
            let distance = view.eye.to_vec().magnitude();
            assert!((distance - Viewpoint::VIEW_DISTANCE).abs() < 1e-6);
            // Up vector must never be colinear with the viewing direction
            let forward = (view.center - view.eye).normalize();
            assert!(forward.dot(view.up).abs() < 1e-6);
        }
    }

    #[test]
    fn digit_keys_map_to_viewpoints() {
        assert_eq!(viewpoint_for_key(KeyCode::Digit1), Some(Viewpoint::Front));
        assert_eq!(viewpoint_for_key(KeyCode::Digit2), Some(Viewpoint::Top));
        assert_eq!(viewpoint_for_key(KeyCode::Digit3), Some(Viewpoint::Side));
        assert_eq!(viewpoint_for_key(KeyCode::KeyA), None);
    }

    #[test]
    fn leaving_top_view_restores_vertical_up() {
        let mut camera = ViewpointCamera::new(Camera::default());
        camera.switch_to(Viewpoint::Top);
        assert_eq!(camera.camera.eye_position(), point3(0., 10., 0.));
        assert_eq!(camera.camera.up_direction(), vec3(0., 0., -1.));
        camera.switch_to(Viewpoint::Front);
        assert_eq!(camera.current_viewpoint(), Viewpoint::Front);
        assert_eq!(camera.camera.up_direction(), vec3(0., 1., 0.));
    }

    #[test]
    fn scene_center_projects_to_screen_center() {
        for viewpoint in [Viewpoint::Front, Viewpoint::Top, Viewpoint::Side] {
            let camera = Camera::new(
                viewpoint.view(),
                Box::new(PerspectiveCameraConfig::default()),
            );
            let (x, y, z) = project_origin(&camera);
            assert!(x.abs() < 1e-5);
            assert!(y.abs() < 1e-5);
            // Inside the WebGPU depth range
            assert!(z > 0.0 && z < 1.0);
        }
    }

    #[test]
    fn resize_updates_projection_aspect() {
        let mut camera = Camera::default();
        let before = camera.get_camera_matrix();
        camera.resize_screen(Dimensions {
            width: 1600,
            height: 600,
        });
        let after = camera.get_camera_matrix();
        // Only the horizontal scale changes with the aspect ratio
        assert!((before.x.x - 2.0 * after.x.x).abs() < 1e-5);
        assert!((before.y.y - after.y.y).abs() < 1e-5);
    }
}
