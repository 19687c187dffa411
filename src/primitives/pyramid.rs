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

use cgmath::SquareMatrix;

use crate::draw_context::{DrawContext, DrawModeParams, DrawableBuilder, IndexData, Uniform};
use crate::primitives::Object3D;
use crate::scene_3d::Scene3DUniforms;

use super::{Object3DUniforms, color};

/// Square pyramid, apex up, unit-ish size centered on the origin.
#[rustfmt::skip]
pub const PYRAMID_GEOMETRY: &[[f32; 3]] = &[
    [ 0.0,  0.5,  0.0], // Apex
    [-0.5, -0.5,  0.5], // Front-left
    [ 0.5, -0.5,  0.5], // Front-right
    [ 0.5, -0.5, -0.5], // Back-right
    [-0.5, -0.5, -0.5], // Back-left
];
#[rustfmt::skip]
pub const PYRAMID_COLOR: &[[f32; 3]] = &[
    color::COLOR_RED,
    color::COLOR_GREEN,
    color::COLOR_BLUE,
    color::COLOR_YELLOW,
    color::COLOR_MAGENTA,
];
#[rustfmt::skip]
pub const PYRAMID_INDICES: &[u16] = &[
    0, 1, 2, // Front face
    0, 2, 3, // Right face
    0, 3, 4, // Back face
    0, 4, 1, // Left face
    1, 2, 3, // Base right triangle
    1, 3, 4, // Base left triangle
];

pub fn create_pyramid(
    context: &DrawContext,
    vtx_module: &wgpu::ShaderModule,
    frg_module: &wgpu::ShaderModule,
    scene_uniforms: &Scene3DUniforms,
) -> Object3D {
    let transform_uniform = Uniform::new(context, cgmath::Matrix4::identity().into());

    let mut drawable_builder = DrawableBuilder::new(
        context,
        vtx_module,
        frg_module,
        DrawModeParams::Indexed {
            index_data: IndexData::U16(PYRAMID_INDICES),
        },
    );
    drawable_builder
        .add_attribute(
            0,
            wgpu::VertexStepMode::Vertex,
            PYRAMID_GEOMETRY,
            wgpu::VertexFormat::Float32x3,
        )
        .expect("Location should not already be used.")
        .add_attribute(
            1,
            wgpu::VertexStepMode::Vertex,
            PYRAMID_COLOR,
            wgpu::VertexFormat::Float32x3,
        )
        .expect("Location should not already be used.")
        .add_uniform(
            DrawContext::BIND_GROUP_INDEX_CAMERA,
            0,
            &scene_uniforms.camera_mat,
        )
        .expect("Binding elements should not already be used.")
        .add_uniform(1, 0, &transform_uniform)
        .expect("Binding elements should not already be used.");
    let drawable = drawable_builder.build();
    Object3D::new(
        drawable,
        Object3DUniforms {
            model: transform_uniform,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_mesh_is_consistent() {
        assert_eq!(PYRAMID_GEOMETRY.len(), 5);
        assert_eq!(PYRAMID_COLOR.len(), PYRAMID_GEOMETRY.len());
        assert_eq!(PYRAMID_INDICES.len(), 18);
        assert!(
            PYRAMID_INDICES
                .iter()
                .all(|&i| (i as usize) < PYRAMID_GEOMETRY.len())
        );
    }

    #[test]
    fn apex_belongs_to_every_side_face() {
        let side_faces_with_apex = PYRAMID_INDICES
            .chunks_exact(3)
            .filter(|face| face.contains(&0))
            .count();
        assert_eq!(side_faces_with_apex, 4);
    }

    #[test]
    fn base_is_flat() {
        let base_height = PYRAMID_GEOMETRY[1][1];
        assert!(
            PYRAMID_GEOMETRY[1..]
                .iter()
                .all(|v| (v[1] - base_height).abs() < f32::EPSILON)
        );
    }
}
