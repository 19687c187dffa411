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

pub mod color;
pub mod pyramid;

use std::cell::RefCell;
use std::rc::Rc;

use crate::draw_context::{Drawable, Uniform};
use cgmath::Matrix4;
use cgmath::SquareMatrix;

pub trait Shareable: Sized {
    fn into_shareable(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

pub trait Transforms {
    fn set_transform(&mut self, transform: Matrix4<f32>);
    fn get_transform(&self) -> &Matrix4<f32>;
    fn apply_transform(&mut self, transform: Matrix4<f32>);
}

pub struct Object3DUniforms {
    pub model: Uniform<[[f32; 4]; 4]>,
}

pub struct Object3D {
    drawable: Drawable,
    transform: Matrix4<f32>,
    uniforms: Object3DUniforms,
}

impl Object3D {
    pub fn new(drawable: Drawable, uniforms: Object3DUniforms) -> Self {
        Object3D {
            drawable,
            transform: Matrix4::<f32>::identity(),
            uniforms,
        }
    }
}

impl Transforms for Object3D {
    fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
        self.uniforms.model.write_uniform(self.transform.into());
    }
    fn get_transform(&self) -> &Matrix4<f32> {
        &self.transform
    }
    fn apply_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform * self.transform;
        self.uniforms.model.write_uniform(self.transform.into());
    }
}

impl Shareable for Object3D {}

impl AsRef<Drawable> for Object3D {
    fn as_ref(&self) -> &Drawable {
        &self.drawable
    }
}
