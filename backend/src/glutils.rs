use gl::{types::*, *};
use std::ffi::CStr;

/// Logs any pending GL error.
pub fn check_gl_err(context: &str) {
    let err = unsafe { gl::GetError() };
    if err != gl::NO_ERROR {
        log::error!("{context}: GL error 0x{err:04x}");
    }
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_opengl_info() {
    log::info!(
        "OpenGL {} ({}, {})",
        gl_string(VERSION),
        gl_string(VENDOR),
        gl_string(RENDERER)
    );

    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_IMAGE_UNITS, &mut mtu) };
    log::debug!("MAX_TEXTURE_IMAGE_UNITS = {}", mtu);

    unsafe { gl::GetIntegerv(MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut mtu) };
    log::debug!("MAX_COMBINED_TEXTURE_IMAGE_UNITS = {}", mtu);
}

/// (major, minor) of the current context.
pub fn gl_version() -> (i32, i32) {
    let mut major = 0;
    let mut minor = 0;
    unsafe {
        gl::GetIntegerv(MAJOR_VERSION, &mut major);
        gl::GetIntegerv(MINOR_VERSION, &mut minor);
    }
    (major, minor)
}

/// Sampler objects only exist from GL 3.3 on.
pub fn has_sampler_objects(version: (i32, i32)) -> bool {
    version >= (3, 3)
}

pub fn get_integer(name: GLenum) -> i32 {
    let mut value = 0;
    unsafe { gl::GetIntegerv(name, &mut value) };
    value
}

pub fn get_integers<const N: usize>(name: GLenum) -> [i32; N] {
    let mut values = [0; N];
    unsafe { gl::GetIntegerv(name, values.as_mut_ptr()) };
    values
}

pub fn set_enabled(cap: GLenum, enabled: bool) {
    unsafe {
        if enabled {
            gl::Enable(cap)
        } else {
            gl::Disable(cap)
        }
    };
}

pub fn is_enabled(cap: GLenum) -> bool {
    unsafe { gl::IsEnabled(cap) == TRUE }
}

/// Replaces the whole content of the bound array buffer (orphaning the old
/// storage).
pub fn gl_buffer_data_arr_stream<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STREAM_DRAW,
        )
    };
}

pub fn gl_buffer_data_element_stream<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ELEMENT_ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STREAM_DRAW,
        )
    };
}

/// `stride` and `offset` are in bytes.
pub fn gl_vertex_attrib_ptr_enab(
    index: u32,
    size: i32,
    kind: GLenum,
    normalized: bool,
    stride: usize,
    offset: usize,
) {
    unsafe { gl::EnableVertexAttribArray(index) };
    unsafe {
        gl::VertexAttribPointer(
            index,
            size,
            kind,
            if normalized { TRUE } else { FALSE },
            stride as i32,
            offset as *const _,
        )
    };
}

/// GL element type for an index buffer whose entries are `index_size` bytes.
pub fn index_type(index_size: usize) -> GLenum {
    if index_size == 4 {
        UNSIGNED_INT
    } else {
        UNSIGNED_SHORT
    }
}

/// Uploads a single channel 8-bit image as a `RED` texture and returns its
/// handle. The previous 2D texture binding is left untouched.
pub fn upload_alpha8_texture(width: u32, height: u32, pixels: &[u8]) -> u32 {
    let params = [
        (TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR),
        (TEXTURE_2D, TEXTURE_MAG_FILTER, LINEAR),
    ];

    let last_texture = get_integer(TEXTURE_BINDING_2D);

    let mut texture = 0;
    unsafe { gl::GenTextures(1, &mut texture) };
    unsafe { gl::BindTexture(TEXTURE_2D, texture) };

    for (t, n, p) in params {
        unsafe { gl::TexParameteri(t, n, p as i32) };
    }
    unsafe {
        gl::PixelStorei(UNPACK_ROW_LENGTH, 0);
        gl::TexImage2D(
            TEXTURE_2D,
            0,
            RED as i32,
            width as i32,
            height as i32,
            0,
            RED,
            UNSIGNED_BYTE,
            pixels.as_ptr().cast(),
        )
    };
    check_gl_err("font atlas upload");

    unsafe { gl::BindTexture(TEXTURE_2D, last_texture as u32) };
    texture
}
