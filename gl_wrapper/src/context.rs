use std::ffi::CStr;

use gl::types::GLenum;

/// GPU and driver identification strings for the current context.
///
/// Diagnostic only, printed at startup.
pub struct ContextInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
}

impl ContextInfo {
    pub fn query() -> Self {
        Self {
            vendor: get_string(gl::VENDOR),
            renderer: get_string(gl::RENDERER),
            version: get_string(gl::VERSION),
        }
    }
}

/// Whether `gl::load_with` actually resolved the entry points this crate
/// relies on.
pub fn api_loaded() -> bool {
    gl::GetString::is_loaded() && gl::CreateShader::is_loaded() && gl::DrawArrays::is_loaded()
}

fn get_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };

    if ptr.is_null() {
        return String::new();
    }

    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}
