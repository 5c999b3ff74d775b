use gl::types::{GLchar, GLenum, GLuint};
use std::ffi::{CStr, CString, NulError};
use std::fmt;

use thiserror::Error;

/// Matches the 512-byte log buffer of the original demo.
const INFO_LOG_LEN: usize = 512;

pub struct ProgramBuilder {
    vert: String,
    frag: String,
    frag_output: Option<String>,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: vert_src.to_owned(),
            frag: frag_src.to_owned(),
            frag_output: None,
        }
    }

    /// Binds fragment data location 0 to the named fragment shader output
    /// before linking.
    pub fn with_fragment_output(mut self, name: &str) -> Self {
        self.frag_output = Some(name.to_owned());
        self
    }

    /// Compiles both stages and links them into one program.
    ///
    /// Compile and link failures are not errors: the driver info log is
    /// captured as a [`BuildDiagnostic`] and the (possibly broken) program
    /// handle is returned anyway, so the caller can report the logs and keep
    /// running. The only hard failure is a NUL byte in a source string.
    pub fn build(self) -> Result<ProgramBuild, ProgramError> {
        let vert_src = CString::new(self.vert)?;
        let frag_src = CString::new(self.frag)?;
        let frag_output = self.frag_output.map(CString::new).transpose()?;

        let mut diagnostics = Vec::new();

        let (id, vert, frag) = unsafe {
            let vert = compile_stage(gl::VERTEX_SHADER, &vert_src, BuildStage::Vertex, &mut diagnostics);
            let frag = compile_stage(gl::FRAGMENT_SHADER, &frag_src, BuildStage::Fragment, &mut diagnostics);

            let id = gl::CreateProgram();
            gl::AttachShader(id, vert);
            gl::AttachShader(id, frag);

            if let Some(name) = &frag_output {
                gl::BindFragDataLocation(id, 0, name.as_ptr());
            }

            gl::LinkProgram(id);

            let mut success = 0;
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
            if success != 1 {
                let mut buf = [0_u8; INFO_LOG_LEN];
                gl::GetProgramInfoLog(
                    id,
                    INFO_LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut GLchar,
                );
                diagnostics.push(BuildDiagnostic {
                    stage: BuildStage::Link,
                    log: log_to_string(&buf),
                });
            }

            (id, vert, frag)
        };

        Ok(ProgramBuild {
            program: Program { id, vert, frag },
            diagnostics,
        })
    }
}

unsafe fn compile_stage(
    kind: GLenum,
    source: &CStr,
    stage: BuildStage,
    diagnostics: &mut Vec<BuildDiagnostic>,
) -> GLuint {
    let id = gl::CreateShader(kind);

    gl::ShaderSource(id, 1, &source.as_ptr(), std::ptr::null());
    gl::CompileShader(id);

    let mut success = 0;
    gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
    if success != 1 {
        let mut buf = [0_u8; INFO_LOG_LEN];
        gl::GetShaderInfoLog(
            id,
            INFO_LOG_LEN as i32,
            std::ptr::null_mut(),
            buf.as_mut_ptr() as *mut GLchar,
        );
        diagnostics.push(BuildDiagnostic {
            stage,
            log: log_to_string(&buf),
        });
    }

    id
}

fn log_to_string(buf: &[u8]) -> String {
    let data = match buf.iter().position(|b| *b == 0) {
        Some(end) => &buf[..end],
        None => buf,
    };

    String::from_utf8_lossy(data).into_owned()
}

pub struct ProgramBuild {
    pub program: Program,
    pub diagnostics: Vec<BuildDiagnostic>,
}

/// Driver info log captured for a failed build step.
#[derive(Debug)]
pub struct BuildDiagnostic {
    pub stage: BuildStage,
    pub log: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Vertex,
    Fragment,
    Link,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStage::Vertex => write!(f, "Vertex shader compilation"),
            BuildStage::Fragment => write!(f, "Fragment shader compilation"),
            BuildStage::Link => write!(f, "Program linking"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("shader source contains a NUL byte: {0}")]
    InvalidSource(#[from] NulError),
}

pub struct Program {
    id: GLuint,
    vert: GLuint,
    frag: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    /// Location of a named vertex attribute, `None` when the attribute is
    /// inactive or the program failed to link.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetAttribLocation(self.id, name.as_ptr()) };

        (location >= 0).then_some(location as u32)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
            gl::DeleteShader(self.frag);
            gl::DeleteShader(self.vert);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_decoding_stops_at_nul() {
        let mut buf = [0_u8; 16];
        buf[..5].copy_from_slice(b"0:1(2");

        assert_eq!(log_to_string(&buf), "0:1(2");
    }

    #[test]
    fn log_decoding_takes_full_buffer_without_nul() {
        let buf = [b'x'; 8];

        assert_eq!(log_to_string(&buf), "xxxxxxxx");
    }

    #[test]
    fn log_decoding_of_empty_log() {
        assert_eq!(log_to_string(&[0_u8; 4]), "");
    }
}
