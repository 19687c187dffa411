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

use log::info;
use std::env;

use crate::{
    draw_context::DrawContext,
    render_loop::{RenderLoopBuilder, RenderLoopHandler},
    window::init_event_loop,
};

const GLOBAL_LOG_FILTER: log::LevelFilter = log::LevelFilter::Info;
const ENV_HEADLESS: &str = "HEADLESS";

/// Init logging then run the winit event loop with the provided scene builder.
///
/// When the `HEADLESS` environment variable is set, no window is opened and a
/// single frame is rendered to an offscreen texture instead. This is what the
/// smoke test uses.
pub fn launch_app<F>(builder: F)
where
    F: Fn(&mut DrawContext) -> Box<dyn RenderLoopHandler> + 'static,
{
    init_log();
    info!("Init app");
    let is_headless = env::var(ENV_HEADLESS).is_ok();
    if is_headless {
        info!("Running in headless mode");
        init_headless(Box::new(builder));
    } else {
        init_event_loop(Box::new(builder));
    }
}

fn init_log() {
    use fern::colors::{Color, ColoredLevelConfig};
    let colors = ColoredLevelConfig::new()
        .info(Color::Blue)
        .debug(Color::Green);
    fern::Dispatch::new()
        .chain(std::io::stdout())
        .level(GLOBAL_LOG_FILTER)
        .level_for(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                colors.color(record.level()),
                record.target(),
                record.line().unwrap_or_default(),
                message
            ));
        })
        .apply()
        .expect("logger should only be initialized once");
}

fn init_headless(builder: Box<RenderLoopBuilder>) {
    use pollster::FutureExt;

    use crate::render_loop::{RenderContext, TimeInfo};
    let mut draw_context = DrawContext::new(None, None)
        .block_on()
        .expect("GPU context should be initialized");
    let mut handler = builder(&mut draw_context);
    let time_info = TimeInfo::default();
    let render_context = RenderContext {
        time_info: &time_info,
        draw_context: &draw_context,
    };
    draw_context
        .render_scene(|pass| {
            handler.on_render(&render_context, pass);
        })
        .expect("offscreen render target should always be available");
    info!("Headless frame rendered");
}
