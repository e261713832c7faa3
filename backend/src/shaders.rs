use crate::error::{ShaderError, ShaderStage};
use crate::glutils::check_gl_err;
use crate::math::Mat4x4;
use gl::{types::*, *};
use std::ffi::CString;

pub const UI_VERTEX_SHADER: &str = include_str!("../shaders/ui.vert");
pub const UI_FRAGMENT_SHADER: &str = include_str!("../shaders/ui.frag");

/// A linked vertex + fragment program. The shader objects are kept attached
/// until [`Shaders::dispose`] so they can be detached explicitly.
#[derive(Debug, Default)]
pub struct Shaders {
    program_id: u32,
    vertex_id: u32,
    fragment_id: u32,
}

impl Shaders {
    pub fn ui() -> Result<Shaders, ShaderError> {
        Self::from_str(UI_VERTEX_SHADER, UI_FRAGMENT_SHADER)
    }

    /// Compiles and links the pair. On failure every object created so far
    /// is released before the error is returned.
    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders, ShaderError> {
        let mut shaders = Shaders::default();
        match shaders.build(vertex_code, fragment_code) {
            Ok(()) => Ok(shaders),
            Err(e) => {
                shaders.dispose();
                Err(e)
            }
        }
    }

    fn build(&mut self, vertex_code: &str, fragment_code: &str) -> Result<(), ShaderError> {
        self.vertex_id = Self::create_and_compile(VERTEX_SHADER, ShaderStage::Vertex, vertex_code)?;
        self.fragment_id =
            Self::create_and_compile(FRAGMENT_SHADER, ShaderStage::Fragment, fragment_code)?;

        self.program_id = unsafe { gl::CreateProgram() };
        unsafe {
            gl::AttachShader(self.program_id, self.vertex_id);
            gl::AttachShader(self.program_id, self.fragment_id);
            gl::LinkProgram(self.program_id);
        }

        let mut success = 0;
        unsafe { gl::GetProgramiv(self.program_id, LINK_STATUS, &mut success) };
        if success == 0 {
            let log = Self::info_log(self.program_id, gl::GetProgramiv, gl::GetProgramInfoLog);
            return Err(ShaderError::Link(log));
        }
        Ok(())
    }

    fn create_and_compile(kind: GLenum, stage: ShaderStage, code: &str) -> Result<u32, ShaderError> {
        let shader_id = unsafe { gl::CreateShader(kind) };
        if shader_id == 0 {
            return Err(ShaderError::Create(stage));
        }

        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(code.as_bytes().as_ptr().cast()),
                &(code.len() as i32),
            );
            gl::CompileShader(shader_id);
        }

        let mut success = 0;
        unsafe { gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success) };
        if success == 0 {
            let log = Self::info_log(shader_id, gl::GetShaderiv, gl::GetShaderInfoLog);
            unsafe { gl::DeleteShader(shader_id) };
            return Err(ShaderError::Compile { stage, log });
        }
        Ok(shader_id)
    }

    fn info_log(
        id: u32,
        get_iv: unsafe fn(GLuint, GLenum, *mut GLint),
        get_log: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
    ) -> String {
        let mut capacity = 0;
        unsafe { get_iv(id, INFO_LOG_LENGTH, &mut capacity) };
        let mut v = vec![0u8; capacity.max(1) as usize];
        let mut log_len = 0;
        unsafe { get_log(id, v.len() as i32, &mut log_len, v.as_mut_ptr().cast()) };
        v.truncate(log_len.max(0) as usize);
        String::from_utf8_lossy(&v).trim_end().to_string()
    }

    pub fn program_id(&self) -> u32 {
        self.program_id
    }

    pub fn is_linked(&self) -> bool {
        self.program_id != 0
    }

    pub fn uniform_location(&self, name: &str) -> Result<i32, ShaderError> {
        let c_name = Self::c_name(name);
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr()) };
        self.checked_location(location, name)
    }

    pub fn attrib_location(&self, name: &str) -> Result<i32, ShaderError> {
        let c_name = Self::c_name(name);
        let location = unsafe { gl::GetAttribLocation(self.program_id, c_name.as_ptr()) };
        self.checked_location(location, name)
    }

    fn c_name(name: &str) -> CString {
        // names are compile-time literals in this crate; an interior NUL
        // simply produces a lookup that fails below
        CString::new(name).unwrap_or_default()
    }

    fn checked_location(&self, location: i32, name: &str) -> Result<i32, ShaderError> {
        check_gl_err("location lookup");
        if location == -1 {
            return Err(ShaderError::MissingLocation {
                program: self.program_id,
                name: name.to_string(),
            });
        }
        Ok(location)
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    pub fn set_i32_at(&self, location: i32, value: i32) {
        unsafe { gl::Uniform1i(location, value) };
    }

    pub fn set_mat4fv_at(&self, location: i32, mat: &Mat4x4) {
        let arr = mat.to_cols_array();
        unsafe { gl::UniformMatrix4fv(location, 1, FALSE, arr.as_ptr()) };
    }

    /// Detaches and deletes shaders, then deletes the program. Handles that
    /// are zero are skipped, so calling this twice is harmless.
    pub fn dispose(&mut self) {
        unsafe {
            if self.program_id != 0 && self.vertex_id != 0 {
                gl::DetachShader(self.program_id, self.vertex_id);
            }
            if self.vertex_id != 0 {
                gl::DeleteShader(self.vertex_id);
            }
            self.vertex_id = 0;

            if self.program_id != 0 && self.fragment_id != 0 {
                gl::DetachShader(self.program_id, self.fragment_id);
            }
            if self.fragment_id != 0 {
                gl::DeleteShader(self.fragment_id);
            }
            self.fragment_id = 0;

            if self.program_id != 0 {
                gl::DeleteProgram(self.program_id);
            }
            self.program_id = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sources_declare_the_bound_names() {
        for name in ["ProjMtx", "Position", "UV", "Color"] {
            assert!(UI_VERTEX_SHADER.contains(name), "vertex shader lacks {name}");
        }
        assert!(UI_FRAGMENT_SHADER.contains("uniform sampler2D Texture"));
        assert!(UI_VERTEX_SHADER.starts_with("#version 150"));
        assert!(UI_FRAGMENT_SHADER.starts_with("#version 150"));
    }

    #[test]
    fn dispose_without_handles_makes_no_gl_calls() {
        // GL is never loaded in unit tests; any call would panic
        let mut shaders = Shaders::default();
        shaders.dispose();
        shaders.dispose();
        assert!(!shaders.is_linked());
    }
}
