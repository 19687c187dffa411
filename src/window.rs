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

use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    draw_context::DrawContext,
    render_loop::{RenderContext, RenderLoopBuilder, RenderLoopHandler, TimeInfo},
};

const WINDOW_TITLE: &str = "wgpu-pyramid";
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;

pub(crate) fn init_event_loop(builder: Box<RenderLoopBuilder>) {
    let event_loop = EventLoop::new().expect("winit event loop should be created");
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = WindowApp {
        builder: Some(builder),
        state: None,
    };
    if let Err(err) = event_loop.run_app(&mut app) {
        error!("Event loop stopped with error: {err}");
    }
}

struct WindowState {
    window: Arc<Window>,
    draw_context: DrawContext,
    handler: Box<dyn RenderLoopHandler>,
    time_info: TimeInfo,
    last_draw: Instant,
}

struct WindowApp {
    builder: Option<Box<RenderLoopBuilder>>,
    state: Option<WindowState>,
}

impl WindowApp {
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.handler.is_finished() {
            event_loop.exit();
            return;
        }
        let now = Instant::now();
        state.time_info.processing_delta = now - state.last_draw;
        state.last_draw = now;
        let WindowState {
            window,
            draw_context,
            handler,
            time_info,
            ..
        } = state;
        let render_result = {
            let draw_context = &*draw_context;
            let render_context = RenderContext {
                time_info,
                draw_context,
            };
            draw_context.render_scene(|pass| handler.on_render(&render_context, pass))
        };
        if let Err(err) = render_result {
            match err.downcast_ref::<wgpu::SurfaceError>() {
                Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    warn!("Surface lost or outdated, reconfiguring");
                    let size = window.inner_size();
                    draw_context.resize(size.width, size.height);
                }
                Some(wgpu::SurfaceError::OutOfMemory) => {
                    error!("Out of GPU memory, exiting");
                    event_loop.exit();
                    return;
                }
                _ => warn!("Frame dropped: {err:#}"),
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                DEFAULT_WINDOW_WIDTH,
                DEFAULT_WINDOW_HEIGHT,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("winit window should be created"),
        );
        let mut draw_context =
            pollster::block_on(DrawContext::new(Some(Arc::clone(&window)), None))
                .expect("GPU context should be initialized");
        let builder = self
            .builder
            .take()
            .expect("scene builder should only be consumed once");
        let handler = builder(&mut draw_context);
        info!("Window and GPU context ready");
        self.state = Some(WindowState {
            window: Arc::clone(&window),
            draw_context,
            handler,
            time_info: TimeInfo::default(),
            last_draw: Instant::now(),
        });
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if is_escape_pressed(&event) {
                    event_loop.exit();
                    return;
                }
                if let Some(state) = self.state.as_mut() {
                    state.handler.on_keyboard_event(&event);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(state) = self.state.as_mut() {
                    state.draw_context.resize(size.width, size.height);
                    let WindowState {
                        draw_context,
                        handler,
                        ..
                    } = state;
                    handler.on_resize(draw_context);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn is_escape_pressed(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}
