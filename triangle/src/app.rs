use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Fullscreen, Window, WindowBuilder};

use gl_wrapper::context::{self, ContextInfo};
use gl_wrapper::geometry::{GeometryBuilder, VertexAttribute};
use gl_wrapper::program::ProgramBuilder;
use gl_wrapper::renderer::GlRenderer;

use crate::args::Args;
use crate::state::DemoState;

/// 3 vertices, interleaved as (x, y, r, g, b).
#[rustfmt::skip]
pub const TRIANGLE: [f32; 15] = [
     0.0,  0.5, 1.0, 0.0, 0.0, // top, red
     0.5, -0.5, 0.0, 1.0, 0.0, // bottom right, green
    -0.5, -0.5, 0.0, 0.0, 1.0, // bottom left, blue
];

pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.4, 0.8, 1.0];

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    state: DemoState,
}

impl App {
    /// Creates the window, the 3.2 core context and loads the GL entry
    /// points. Any failure here is fatal to the process; all handles created
    /// so far are released on the way out.
    pub fn new(args: &Args) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(args.width, args.height)))
            .with_title("Colored Triangle");
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|e| AppError::WindowCreation(e.to_string()))?;

        let window = window
            .ok_or_else(|| AppError::WindowCreation("display builder returned no window".into()))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 2))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        if !context::api_loaded() {
            return Err(AppError::LoaderFailed);
        }

        let info = ContextInfo::query();
        println!("OpenGL loaded");
        println!("Vendor:   {}", info.vendor);
        println!("Renderer: {}", info.renderer);
        println!("Version:  {}", info.version);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            state: DemoState::new(),
        })
    }

    /// Builds the pipeline and geometry, then runs the frame loop until the
    /// user quits. Returns the process exit code.
    pub fn run(self) -> i32 {
        let Self {
            mut event_loop,
            gl_context,
            gl_window,
            mut state,
        } = self;

        let build = match ProgramBuilder::new(
            include_str!("gl_shaders/vertex.glsl"),
            include_str!("gl_shaders/fragment.glsl"),
        )
        .with_fragment_output("outColor")
        .build()
        {
            Ok(build) => build,
            Err(e) => {
                eprintln!("Could not build shader program: {e}");
                return 1;
            }
        };

        // compile and link failures are logged, not fatal
        for diagnostic in &build.diagnostics {
            eprintln!("{} failed:\n{}", diagnostic.stage, diagnostic.log);
        }

        let program = build.program;

        let geometry = match GeometryBuilder::new(&TRIANGLE)
            .with_attribute("position", VertexAttribute::Vec2)
            .with_attribute("inColor", VertexAttribute::Vec3)
            .build(&program)
        {
            Ok(geometry) => geometry,
            Err(e) => {
                eprintln!("Could not upload vertex data: {e}");
                return 1;
            }
        };

        let mut renderer = GlRenderer::new();

        let code = event_loop.run_return(|event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => state.close_requested(),
                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.state == ElementState::Released {
                            if let Some(key) = input.virtual_keycode {
                                if state.key_released(key) {
                                    let mode = state
                                        .fullscreen
                                        .then(|| Fullscreen::Borderless(None));
                                    gl_window.window.set_fullscreen(mode);
                                }
                            }
                        }
                    }
                    WindowEvent::Resized(size) => {
                        if size.width != 0 && size.height != 0 {
                            gl_window.surface.resize(
                                &gl_context,
                                NonZeroU32::new(size.width).unwrap(),
                                NonZeroU32::new(size.height).unwrap(),
                            );
                            renderer.resize(size.width, size.height);
                        }
                    }
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    renderer.clear(CLEAR_COLOR);
                    renderer.draw(&geometry, &program);
                }
                Event::RedrawEventsCleared => {
                    if state.quit {
                        control_flow.set_exit();
                        return;
                    }

                    gl_window.window.request_redraw();
                    gl_window.surface.swap_buffers(&gl_context).unwrap();
                }
                _ => (),
            }
        });

        // release GPU objects while the context is still current, then the
        // context, surface and window, and the windowing subsystem last
        drop(program);
        drop(geometry);
        drop(gl_context);
        drop(gl_window);
        drop(event_loop);

        code
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width.max(1)).unwrap(),
            NonZeroU32::new(height.max(1)).unwrap(),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not create window: {0}")]
    WindowCreation(String),
    #[error("Could not create OpenGL context: {0}")]
    ContextCreation(#[from] glutin::error::Error),
    #[error("Failed to initialize OpenGL context")]
    LoaderFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_three_interleaved_vertices() {
        assert_eq!(TRIANGLE.len(), 15);

        // positions
        assert_eq!(&TRIANGLE[0..2], &[0.0, 0.5]);
        assert_eq!(&TRIANGLE[5..7], &[0.5, -0.5]);
        assert_eq!(&TRIANGLE[10..12], &[-0.5, -0.5]);

        // pure red, green, blue
        assert_eq!(&TRIANGLE[2..5], &[1.0, 0.0, 0.0]);
        assert_eq!(&TRIANGLE[7..10], &[0.0, 1.0, 0.0]);
        assert_eq!(&TRIANGLE[12..15], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn clear_color_is_opaque_blue_tone() {
        assert_eq!(CLEAR_COLOR, [0.2, 0.4, 0.8, 1.0]);
    }

    #[test]
    fn shader_sources_declare_the_demo_interface() {
        let vert = include_str!("gl_shaders/vertex.glsl");
        let frag = include_str!("gl_shaders/fragment.glsl");

        assert!(vert.contains("in vec2 position;"));
        assert!(vert.contains("in vec3 inColor;"));
        assert!(frag.contains("out vec4 outColor;"));
    }
}
