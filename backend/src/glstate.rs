//! Snapshot of the GL state touched by the UI renderer.
//!
//! The renderer runs as one step of a pipeline it does not own, so every
//! piece of state it changes is captured on entry and put back when the
//! backup goes out of scope, whatever path leaves the render function.

use crate::glutils::{get_integer, get_integers, is_enabled, set_enabled};
use gl::types::GLenum;

pub struct GlStateBackup {
    active_texture: i32,
    program: i32,
    texture: i32,
    sampler: Option<i32>,
    array_buffer: i32,
    element_array_buffer: i32,
    vertex_array: i32,
    polygon_mode: [i32; 2],
    viewport: [i32; 4],
    scissor_box: [i32; 4],
    blend_src_rgb: i32,
    blend_dst_rgb: i32,
    blend_src_alpha: i32,
    blend_dst_alpha: i32,
    blend_equation_rgb: i32,
    blend_equation_alpha: i32,
    enable_blend: bool,
    enable_cull_face: bool,
    enable_depth_test: bool,
    enable_scissor_test: bool,
}

impl GlStateBackup {
    /// Reads the current state and leaves texture unit 0 active.
    pub fn capture(with_sampler: bool) -> Self {
        let active_texture = get_integer(gl::ACTIVE_TEXTURE);
        unsafe { gl::ActiveTexture(gl::TEXTURE0) };

        GlStateBackup {
            active_texture,
            program: get_integer(gl::CURRENT_PROGRAM),
            texture: get_integer(gl::TEXTURE_BINDING_2D),
            sampler: with_sampler.then(|| get_integer(gl::SAMPLER_BINDING)),
            array_buffer: get_integer(gl::ARRAY_BUFFER_BINDING),
            element_array_buffer: get_integer(gl::ELEMENT_ARRAY_BUFFER_BINDING),
            vertex_array: get_integer(gl::VERTEX_ARRAY_BINDING),
            polygon_mode: get_integers(gl::POLYGON_MODE),
            viewport: get_integers(gl::VIEWPORT),
            scissor_box: get_integers(gl::SCISSOR_BOX),
            blend_src_rgb: get_integer(gl::BLEND_SRC_RGB),
            blend_dst_rgb: get_integer(gl::BLEND_DST_RGB),
            blend_src_alpha: get_integer(gl::BLEND_SRC_ALPHA),
            blend_dst_alpha: get_integer(gl::BLEND_DST_ALPHA),
            blend_equation_rgb: get_integer(gl::BLEND_EQUATION_RGB),
            blend_equation_alpha: get_integer(gl::BLEND_EQUATION_ALPHA),
            enable_blend: is_enabled(gl::BLEND),
            enable_cull_face: is_enabled(gl::CULL_FACE),
            enable_depth_test: is_enabled(gl::DEPTH_TEST),
            enable_scissor_test: is_enabled(gl::SCISSOR_TEST),
        }
    }

    fn restore(&self) {
        let e = |v: i32| v as GLenum;
        unsafe {
            gl::UseProgram(self.program as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.texture as u32);
            if let Some(sampler) = self.sampler {
                gl::BindSampler(0, sampler as u32);
            }
            gl::ActiveTexture(e(self.active_texture));
            gl::BindVertexArray(self.vertex_array as u32);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.array_buffer as u32);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.element_array_buffer as u32);
            gl::BlendEquationSeparate(e(self.blend_equation_rgb), e(self.blend_equation_alpha));
            gl::BlendFuncSeparate(
                e(self.blend_src_rgb),
                e(self.blend_dst_rgb),
                e(self.blend_src_alpha),
                e(self.blend_dst_alpha),
            );
        }
        set_enabled(gl::BLEND, self.enable_blend);
        set_enabled(gl::CULL_FACE, self.enable_cull_face);
        set_enabled(gl::DEPTH_TEST, self.enable_depth_test);
        set_enabled(gl::SCISSOR_TEST, self.enable_scissor_test);
        let [x, y, w, h] = self.viewport;
        let [sx, sy, sw, sh] = self.scissor_box;
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, e(self.polygon_mode[0]));
            gl::Viewport(x, y, w, h);
            gl::Scissor(sx, sy, sw, sh);
        }
    }
}

impl Drop for GlStateBackup {
    fn drop(&mut self) {
        self.restore();
    }
}
