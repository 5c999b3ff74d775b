use std::ffi::c_void;

use thiserror::Error;

use crate::program::Program;

pub struct GeometryBuilder<'a> {
    attributes: Vec<(&'a str, VertexAttribute)>,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    /// Declares the next interleaved attribute, matched by name against the
    /// program's vertex shader inputs.
    pub fn with_attribute(mut self, name: &'a str, attr: VertexAttribute) -> Self {
        self.attributes.push((name, attr));
        self
    }

    /// Floats per vertex for the declared attribute list.
    pub fn vertex_len(&self) -> usize {
        self.attributes.iter().map(|(_, a)| a.size()).sum()
    }

    /// Uploads the vertex data and records the attribute layout in a fresh
    /// vertex array object. Attributes without a resolvable location (an
    /// unlinked program, for instance) are skipped rather than fatal.
    pub fn build(self, program: &Program) -> Result<Geometry, GeometryError> {
        let total_len = self.vertex_len();

        if total_len == 0 || self.data.len() % total_len != 0 {
            return Err(GeometryError::InvalidDataLength);
        }

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenBuffers(1, (&mut vbo) as *mut u32);
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);

            gl::BindVertexArray(vao);
            // only one GL_ARRAY_BUFFER binding is active at a time
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * std::mem::size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (name, attr) in &self.attributes {
                if let Some(location) = program.attribute_location(name) {
                    gl::VertexAttribPointer(
                        location,
                        attr.size() as i32,
                        gl::FLOAT,
                        gl::FALSE,
                        (total_len * std::mem::size_of::<f32>()) as i32,
                        (offset * std::mem::size_of::<f32>()) as *const c_void,
                    );
                    gl::EnableVertexAttribArray(location);
                }
                offset += attr.size();
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        let vertices = self.data.len() / total_len;

        Ok(Geometry { vao, vbo, vertices })
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
}

#[derive(Debug, Clone, Copy)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_vertex_len() {
        let builder = GeometryBuilder::new(&[])
            .with_attribute("position", VertexAttribute::Vec2)
            .with_attribute("inColor", VertexAttribute::Vec3);

        assert_eq!(builder.vertex_len(), 5);
    }

    #[test]
    fn attribute_sizes() {
        assert_eq!(VertexAttribute::Float.size(), 1);
        assert_eq!(VertexAttribute::Vec2.size(), 2);
        assert_eq!(VertexAttribute::Vec3.size(), 3);
    }
}
