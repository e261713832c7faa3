//! Translates imgui draw lists into OpenGL 3.2 core draw calls.

use crate::error::ShaderError;
use crate::glstate::GlStateBackup;
use crate::glutils::*;
use crate::math::Mat4x4;
use crate::shaders::Shaders;
use imgui::internal::RawWrapper;
use imgui::{BackendFlags, Context, DrawCmd, DrawCmdParams, DrawData, DrawIdx, DrawVert, TextureId};
use std::mem::{offset_of, size_of};

/// GL objects owned by the UI renderer. All handles are zero until
/// [`Renderer::new`] succeeds and again after [`Renderer::dispose`].
#[derive(Debug, Default)]
pub struct Renderer {
    shaders: Shaders,
    font_texture: u32,
    loc_tex: i32,
    loc_proj_mtx: i32,
    loc_position: u32,
    loc_uv: u32,
    loc_color: u32,
    vbo: u32,
    ebo: u32,
    has_samplers: bool,
}

impl Renderer {
    /// Builds the shader program, the streaming buffers and the font atlas
    /// texture, and registers the atlas with `ctx`. Requires a current GL
    /// context with loaded function pointers.
    pub fn new(ctx: &mut Context) -> Result<Renderer, ShaderError> {
        ctx.io_mut()
            .backend_flags
            .insert(BackendFlags::RENDERER_HAS_VTX_OFFSET);

        let last_texture = get_integer(gl::TEXTURE_BINDING_2D);
        let last_array_buffer = get_integer(gl::ARRAY_BUFFER_BINDING);
        let last_vertex_array = get_integer(gl::VERTEX_ARRAY_BINDING);

        let mut renderer = Renderer::default();
        renderer.has_samplers = has_sampler_objects(gl_version());
        let result = renderer.create_device_objects(ctx);

        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, last_texture as u32);
            gl::BindBuffer(gl::ARRAY_BUFFER, last_array_buffer as u32);
            gl::BindVertexArray(last_vertex_array as u32);
        }

        match result {
            Ok(()) => {
                log::info!("UI renderer ready (program {})", renderer.shaders.program_id());
                Ok(renderer)
            }
            Err(e) => {
                renderer.dispose(ctx);
                Err(e)
            }
        }
    }

    fn create_device_objects(&mut self, ctx: &mut Context) -> Result<(), ShaderError> {
        self.shaders = Shaders::ui()?;
        self.loc_tex = self.shaders.uniform_location("Texture")?;
        self.loc_proj_mtx = self.shaders.uniform_location("ProjMtx")?;
        self.loc_position = self.shaders.attrib_location("Position")? as u32;
        self.loc_uv = self.shaders.attrib_location("UV")? as u32;
        self.loc_color = self.shaders.attrib_location("Color")? as u32;

        unsafe {
            gl::GenBuffers(1, &mut self.vbo);
            gl::GenBuffers(1, &mut self.ebo);
        }

        self.create_fonts_texture(ctx);
        Ok(())
    }

    fn create_fonts_texture(&mut self, ctx: &mut Context) {
        let mut fonts = ctx.fonts();
        let atlas = fonts.build_alpha8_texture();
        self.font_texture = upload_alpha8_texture(atlas.width, atlas.height, atlas.data);
        log::info!("font atlas uploaded ({}x{})", atlas.width, atlas.height);
        fonts.tex_id = TextureId::from(self.font_texture as usize);
    }

    pub fn is_initialized(&self) -> bool {
        self.shaders.is_linked()
    }

    /// Draws `draw_data` into the current framebuffer. GL state touched here
    /// is restored before returning.
    pub fn render(&mut self, display_size: [f32; 2], framebuffer_size: [f32; 2], draw_data: &DrawData) {
        let [fb_width, fb_height] = framebuffer_size;
        // minimized
        if fb_width <= 0.0 || fb_height <= 0.0 {
            return;
        }
        if !self.is_initialized() {
            return;
        }

        let scale = clip_scale(display_size, framebuffer_size);
        let _backup = GlStateBackup::capture(self.has_samplers);

        // Recreated every frame: VAOs are not shared between GL contexts and
        // the set of live contexts is not tracked here.
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        self.setup_render_state(vao, display_size, draw_data.display_pos, framebuffer_size);

        let idx_size = size_of::<DrawIdx>();
        let idx_type = index_type(idx_size);

        log::trace!(
            "ui frame: {} lists, {} vertices, {} indices",
            draw_data.draw_lists_count(),
            draw_data.total_vtx_count,
            draw_data.total_idx_count
        );

        for draw_list in draw_data.draw_lists() {
            unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo) };
            gl_buffer_data_arr_stream(draw_list.vtx_buffer());
            unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.ebo) };
            gl_buffer_data_element_stream(draw_list.idx_buffer());

            for cmd in draw_list.commands() {
                match cmd {
                    DrawCmd::Elements {
                        count,
                        cmd_params:
                            DrawCmdParams {
                                clip_rect,
                                texture_id,
                                vtx_offset,
                                idx_offset,
                            },
                    } => {
                        let clip = scale_clip_rect(clip_rect, draw_data.display_pos, scale);
                        let Some([x, y, w, h]) = scissor_rect(clip, fb_height) else {
                            continue;
                        };
                        unsafe {
                            gl::BindTexture(gl::TEXTURE_2D, texture_id.id() as u32);
                            gl::Scissor(x, y, w, h);
                            gl::DrawElementsBaseVertex(
                                gl::TRIANGLES,
                                count as i32,
                                idx_type,
                                (idx_offset * idx_size) as *const _,
                                vtx_offset as i32,
                            );
                        }
                    }
                    DrawCmd::ResetRenderState => {
                        self.setup_render_state(
                            vao,
                            display_size,
                            draw_data.display_pos,
                            framebuffer_size,
                        );
                    }
                    DrawCmd::RawCallback { callback, raw_cmd } => unsafe {
                        callback(draw_list.raw(), raw_cmd)
                    },
                }
            }
        }

        unsafe { gl::DeleteVertexArrays(1, &vao) };
    }

    fn setup_render_state(
        &self,
        vao: u32,
        display_size: [f32; 2],
        display_pos: [f32; 2],
        framebuffer_size: [f32; 2],
    ) {
        // alpha blending, no culling, no depth test, scissor on, filled polygons
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendEquation(gl::FUNC_ADD);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::Disable(gl::CULL_FACE);
            gl::Disable(gl::DEPTH_TEST);
            gl::Enable(gl::SCISSOR_TEST);
            gl::PolygonMode(gl::FRONT_AND_BACK, gl::FILL);
            gl::Viewport(0, 0, framebuffer_size[0] as i32, framebuffer_size[1] as i32);
        }

        let projection = Mat4x4::ortho_top_left(display_pos, display_size);
        self.shaders.use_program();
        self.shaders.set_i32_at(self.loc_tex, 0);
        self.shaders.set_mat4fv_at(self.loc_proj_mtx, &projection);
        if self.has_samplers {
            // combined texture/sampler state
            unsafe { gl::BindSampler(0, 0) };
        }

        unsafe {
            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
        }
        let stride = size_of::<DrawVert>();
        gl_vertex_attrib_ptr_enab(self.loc_position, 2, gl::FLOAT, false, stride, offset_of!(DrawVert, pos));
        gl_vertex_attrib_ptr_enab(self.loc_uv, 2, gl::FLOAT, false, stride, offset_of!(DrawVert, uv));
        gl_vertex_attrib_ptr_enab(self.loc_color, 4, gl::UNSIGNED_BYTE, true, stride, offset_of!(DrawVert, col));
    }

    /// Releases every GL object and unregisters the font atlas from `ctx`.
    /// Zero handles are skipped, so a second call (or a call after a failed
    /// `new`) does nothing.
    pub fn dispose(&mut self, ctx: &mut Context) {
        if self.font_texture != 0 {
            ctx.fonts().tex_id = TextureId::from(0);
        }
        self.release_gl_objects();
    }

    fn release_gl_objects(&mut self) {
        unsafe {
            if self.vbo != 0 {
                gl::DeleteBuffers(1, &self.vbo);
            }
            self.vbo = 0;
            if self.ebo != 0 {
                gl::DeleteBuffers(1, &self.ebo);
            }
            self.ebo = 0;
        }

        self.shaders.dispose();

        if self.font_texture != 0 {
            unsafe { gl::DeleteTextures(1, &self.font_texture) };
            self.font_texture = 0;
        }
    }

    fn has_live_objects(&self) -> bool {
        self.vbo != 0 || self.ebo != 0 || self.font_texture != 0 || self.shaders.is_linked()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if self.has_live_objects() {
            log::warn!("UI renderer dropped without dispose(); releasing GL objects");
            self.release_gl_objects();
        }
    }
}

/// Framebuffer pixels per display unit on each axis.
pub fn clip_scale(display_size: [f32; 2], framebuffer_size: [f32; 2]) -> [f32; 2] {
    let ratio = |fb: f32, display: f32| if display > 0.0 { fb / display } else { 1.0 };
    [
        ratio(framebuffer_size[0], display_size[0]),
        ratio(framebuffer_size[1], display_size[1]),
    ]
}

/// Moves a display-space clip rect `[x0, y0, x1, y1]` into framebuffer space.
pub fn scale_clip_rect(clip_rect: [f32; 4], origin: [f32; 2], scale: [f32; 2]) -> [f32; 4] {
    [
        (clip_rect[0] - origin[0]) * scale[0],
        (clip_rect[1] - origin[1]) * scale[1],
        (clip_rect[2] - origin[0]) * scale[0],
        (clip_rect[3] - origin[1]) * scale[1],
    ]
}

/// Converts a top-left origin clip rect into a `glScissor` box
/// `[x, y, width, height]` with bottom-left origin. Empty rects yield `None`.
pub fn scissor_rect(clip_rect: [f32; 4], framebuffer_height: f32) -> Option<[i32; 4]> {
    let [x0, y0, x1, y1] = clip_rect;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some([
        x0 as i32,
        framebuffer_height as i32 - y1 as i32,
        (x1 - x0) as i32,
        (y1 - y0) as i32,
    ])
}
