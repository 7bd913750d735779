//! OpenGL 3.3 core backend on top of `glow`
//!
//! All GL calls are `unsafe` in `glow`; the safety contract for every block in
//! this file is the same: the context held by [`GlBackend`] is current on the
//! calling thread, which the single-threaded frame loop guarantees.

use std::num::NonZeroU32;

use glow::HasContext;

use crate::assets::{ImageData, PixelFormat};
use crate::render::backend::{
    BackendError, BackendResult, MeshBuffers, ProgramHandle, RenderBackend, SamplerParams,
    TextureFilter, TextureHandle, TextureWrap,
};
use crate::render::primitives::CubeVertex;
use crate::render::uniforms::UniformValue;

/// Rendering backend issuing real OpenGL calls
pub struct GlBackend {
    gl: glow::Context,
}

impl GlBackend {
    /// Wrap a loaded GL function table and set the fixed pipeline state the
    /// demos rely on (depth test on, alpha blend function configured).
    pub fn new(gl: glow::Context) -> Self {
        unsafe {
            log::info!(
                "OpenGL {} ({})",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
            gl.enable(glow::DEPTH_TEST);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        }
        Self { gl }
    }

    fn compile_shader(&self, kind: u32, stage: &'static str, source: &str) -> BackendResult<glow::NativeShader> {
        unsafe {
            let shader = self
                .gl
                .create_shader(kind)
                .map_err(|reason| BackendError::ResourceCreation { what: "shader", reason })?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(BackendError::ShaderCompile { stage, log });
            }
            Ok(shader)
        }
    }

    fn program(handle: ProgramHandle) -> Option<glow::NativeProgram> {
        NonZeroU32::new(handle.0).map(glow::NativeProgram)
    }

    fn texture(handle: TextureHandle) -> Option<glow::NativeTexture> {
        NonZeroU32::new(handle.0).map(glow::NativeTexture)
    }

    fn buffer(id: u32) -> Option<glow::NativeBuffer> {
        NonZeroU32::new(id).map(glow::NativeBuffer)
    }

    fn vertex_array(id: u32) -> Option<glow::NativeVertexArray> {
        NonZeroU32::new(id).map(glow::NativeVertexArray)
    }

    const fn gl_format(format: PixelFormat) -> u32 {
        match format {
            PixelFormat::Red => glow::RED,
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
        }
    }
}

impl RenderBackend for GlBackend {
    fn create_program(&self, vertex_src: &str, fragment_src: &str) -> BackendResult<ProgramHandle> {
        unsafe {
            let vertex = self.compile_shader(glow::VERTEX_SHADER, "vertex", vertex_src)?;
            let fragment = match self.compile_shader(glow::FRAGMENT_SHADER, "fragment", fragment_src) {
                Ok(shader) => shader,
                Err(e) => {
                    self.gl.delete_shader(vertex);
                    return Err(e);
                }
            };

            let program = match self.gl.create_program() {
                Ok(program) => program,
                Err(reason) => {
                    self.gl.delete_shader(vertex);
                    self.gl.delete_shader(fragment);
                    return Err(BackendError::ResourceCreation { what: "program", reason });
                }
            };
            self.gl.attach_shader(program, vertex);
            self.gl.attach_shader(program, fragment);
            self.gl.link_program(program);

            let linked = self.gl.get_program_link_status(program);
            self.gl.detach_shader(program, vertex);
            self.gl.detach_shader(program, fragment);
            self.gl.delete_shader(vertex);
            self.gl.delete_shader(fragment);

            if !linked {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(BackendError::ProgramLink(log));
            }

            Ok(ProgramHandle(program.0.get()))
        }
    }

    fn delete_program(&self, program: ProgramHandle) {
        if let Some(program) = Self::program(program) {
            unsafe { self.gl.delete_program(program) }
        }
    }

    fn use_program(&self, program: ProgramHandle) {
        unsafe { self.gl.use_program(Self::program(program)) }
    }

    fn set_uniform(&self, program: ProgramHandle, name: &str, value: &UniformValue) {
        let Some(native) = Self::program(program) else {
            return;
        };
        unsafe {
            let location = self.gl.get_uniform_location(native, name);
            if location.is_none() {
                log::trace!("Uniform '{}' not active in program {}", name, program.0);
                return;
            }
            let location = location.as_ref();
            match value {
                UniformValue::Bool(b) => self.gl.uniform_1_i32(location, i32::from(*b)),
                UniformValue::Int(i) => self.gl.uniform_1_i32(location, *i),
                UniformValue::Float(f) => self.gl.uniform_1_f32(location, *f),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(location, false, m.as_slice()),
            }
        }
    }

    fn create_texture(&self, sampler: SamplerParams) -> BackendResult<TextureHandle> {
        let wrap = match sampler.wrap {
            TextureWrap::Repeat => glow::REPEAT,
            TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT,
            TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        } as i32;
        let filter = match sampler.filter {
            TextureFilter::Nearest => glow::NEAREST,
            TextureFilter::Linear => glow::LINEAR,
        } as i32;

        unsafe {
            let texture = self
                .gl
                .create_texture()
                .map_err(|reason| BackendError::ResourceCreation { what: "texture", reason })?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(TextureHandle(texture.0.get()))
        }
    }

    fn upload_texture(&self, texture: TextureHandle, image: &ImageData) {
        let Some(native) = Self::texture(texture) else {
            return;
        };
        let format = Self::gl_format(image.format());
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(native));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                image.width as i32,
                image.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(&image.data)),
            );
            self.gl.generate_mipmap(glow::TEXTURE_2D);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    fn delete_texture(&self, texture: TextureHandle) {
        if let Some(texture) = Self::texture(texture) {
            unsafe { self.gl.delete_texture(texture) }
        }
    }

    fn bind_texture(&self, unit: u32, texture: TextureHandle) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Self::texture(texture));
        }
    }

    fn create_mesh(&self, vertices: &[CubeVertex], indices: &[u32]) -> BackendResult<MeshBuffers> {
        unsafe {
            let vao = self
                .gl
                .create_vertex_array()
                .map_err(|reason| BackendError::ResourceCreation { what: "vertex array", reason })?;
            self.gl.bind_vertex_array(Some(vao));

            let vbo = match self.gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(reason) => {
                    self.gl.bind_vertex_array(None);
                    self.gl.delete_vertex_array(vao);
                    return Err(BackendError::ResourceCreation { what: "vertex buffer", reason });
                }
            };
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(vertices), glow::STATIC_DRAW);

            let ebo = match self.gl.create_buffer() {
                Ok(ebo) => ebo,
                Err(reason) => {
                    self.gl.bind_vertex_array(None);
                    self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
                    self.gl.delete_buffer(vbo);
                    self.gl.delete_vertex_array(vao);
                    return Err(BackendError::ResourceCreation { what: "index buffer", reason });
                }
            };
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );

            for (location, components, offset) in CubeVertex::ATTRIBUTES {
                self.gl.enable_vertex_attrib_array(location);
                self.gl.vertex_attrib_pointer_f32(
                    location,
                    components,
                    glow::FLOAT,
                    false,
                    CubeVertex::STRIDE,
                    offset as i32,
                );
            }

            self.gl.bind_vertex_array(None);

            Ok(MeshBuffers {
                vao: vao.0.get(),
                vbo: vbo.0.get(),
                ebo: ebo.0.get(),
            })
        }
    }

    fn delete_mesh(&self, mesh: MeshBuffers) {
        unsafe {
            if let Some(vao) = Self::vertex_array(mesh.vao) {
                self.gl.delete_vertex_array(vao);
            }
            if let Some(vbo) = Self::buffer(mesh.vbo) {
                self.gl.delete_buffer(vbo);
            }
            if let Some(ebo) = Self::buffer(mesh.ebo) {
                self.gl.delete_buffer(ebo);
            }
        }
    }

    fn draw_indexed(&self, mesh: MeshBuffers, index_count: u32) {
        unsafe {
            self.gl.bind_vertex_array(Self::vertex_array(mesh.vao));
            self.gl
                .draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0);
            self.gl.bind_vertex_array(None);
        }
    }

    fn set_blending(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }

    fn set_depth_test(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn clear(&self, color: [f32; 4]) {
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn set_viewport(&self, width: i32, height: i32) {
        unsafe { self.gl.viewport(0, 0, width, height) }
    }
}
