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

//! Draws a row of three colored pyramids. Keys 1, 2 and 3 switch between the
//! front, top and side viewpoints, Escape quits.

use cgmath::{Matrix4, vec3};
use wgpu_pyramid::cameras::{Camera, PerspectiveCameraConfig, Viewpoint, ViewpointCamera};
use wgpu_pyramid::primitives::{Shareable, Transforms, pyramid};
use wgpu_pyramid::scene_3d::{Scene3D, SceneElements, SceneLoopHandler, SceneLoopScheduler};
use wgpu_pyramid::{DrawContext, launch_app};

const DEFAULT_SHADER: &str = include_str!("shaders/default.wgsl");

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};
const PYRAMID_COUNT: u32 = 3;
const PYRAMID_SPACING: f32 = 2.0;

struct MainScenario {
    elements: SceneElements,
}

impl MainScenario {
    fn new(draw_context: &mut DrawContext) -> Self {
        draw_context.set_clear_color(Some(CLEAR_COLOR));
        let shader_module = draw_context.create_shader_module(DEFAULT_SHADER);
        let camera = ViewpointCamera::new(Camera::new(
            Viewpoint::Front.view(),
            Box::new(PerspectiveCameraConfig {
                aspect: draw_context.surface_ratio(),
                ..Default::default()
            }),
        ));
        let mut scene = Scene3D::new(draw_context);
        for i in 0..PYRAMID_COUNT {
            let mut pyramid = pyramid::create_pyramid(
                draw_context,
                &shader_module,
                &shader_module,
                scene.scene_uniforms(),
            );
            let x = i as f32 * PYRAMID_SPACING - PYRAMID_SPACING;
            pyramid.set_transform(Matrix4::from_translation(vec3(x, 0., 0.)));
            scene.add(pyramid.into_shareable());
        }
        Self {
            elements: SceneElements { camera, scene },
        }
    }
}

impl SceneLoopHandler for MainScenario {
    fn scene_elements_mut(&mut self) -> &mut SceneElements {
        &mut self.elements
    }
}

fn main() {
    launch_app(|draw_context| SceneLoopScheduler::run(MainScenario::new(draw_context)));
}
