//! Error types for window/context creation and the UI shader program.

use thiserror::Error;

/// Fatal startup failures of the platform layer. Each variant carries the
/// message reported by SDL.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("failed to initialize SDL2: {0}")]
    Sdl(String),

    #[error("failed to initialize SDL2 video subsystem: {0}")]
    Video(String),

    #[error("failed to initialize SDL2 timer subsystem: {0}")]
    Timer(String),

    #[error("failed to obtain SDL2 event pump: {0}")]
    EventPump(String),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to create OpenGL context: {0}")]
    GlContext(String),

    #[error("failed to set current OpenGL context: {0}")]
    MakeCurrent(String),
}

/// Which stage of the shader pipeline failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("gl::CreateShader({0}) failed")]
    Create(ShaderStage),

    #[error("{stage} shader compilation error: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program link error: {0}")]
    Link(String),

    #[error("program({program}): '{name}' is not an active uniform or attribute")]
    MissingLocation { program: u32, name: String },
}

/// Failures while setting up the GUI layer on top of an existing context.
#[derive(Error, Debug)]
pub enum GuiError {
    #[error("renderer initialization failed: {0}")]
    Renderer(#[from] ShaderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_keeps_platform_message() {
        let err = InitError::Window("Could not create GL window".to_string());
        assert_eq!(
            err.to_string(),
            "failed to create window: Could not create GL window"
        );
    }

    #[test]
    fn compile_error_names_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader compilation error: 0:1: syntax error"
        );
    }

    #[test]
    fn gui_error_wraps_shader_error() {
        let err: GuiError = ShaderError::Link("unresolved symbol".to_string()).into();
        assert!(err.to_string().contains("program link error: unresolved symbol"));
    }
}
