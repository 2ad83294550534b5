//! In-memory `GlApi` that records every call, for exercising the resource
//! lifecycle without a driver.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use crate::types::{Rgba, ShaderStage, Viewport};

use super::backend::{ContextInfo, GlApi};

/// Kind-tagged GL object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Object {
    Shader(u32),
    Program(u32),
    Buffer(u32),
    VertexArray(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformF32(Option<String>, f32),
    UniformVec4(Option<String>, Rgba),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferData(Vec<u8>),
    DeleteBuffer(u32),
    DescribeVec2Attribute { index: u32, stride: i32, offset: i32 },
    Viewport(Viewport),
    Clear(Rgba),
    DrawTriangles { first: i32, count: i32 },
}

/// Uniforms the recording driver pretends the linked program exposes.
const ACTIVE_UNIFORMS: [&str; 2] = ["uAngle", "uColor"];

#[derive(Default)]
pub(crate) struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    next_name: Cell<u32>,
    sources: RefCell<Vec<(u32, String)>>,
    compiled: RefCell<BTreeSet<u32>>,
    linked: RefCell<BTreeSet<u32>>,
    attached: RefCell<Vec<(u32, u32)>>,
    live: RefCell<BTreeSet<Object>>,
    released: RefCell<Vec<Object>>,
    fail_link: Cell<bool>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent link fail with a canned log.
    pub fn reject_links(&self) {
        self.fail_link.set(true);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn live_objects(&self) -> BTreeSet<Object> {
        self.live.borrow().clone()
    }

    /// Objects in the order they were deleted.
    pub fn released(&self) -> Vec<Object> {
        self.released.borrow().clone()
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::DrawTriangles { .. }))
            .count()
    }

    pub fn angles(&self) -> Vec<f32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::UniformF32(Some(name), value) if name == "uAngle" => Some(*value),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self, make: fn(u32) -> Object) -> u32 {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        self.live.borrow_mut().insert(make(name));
        name
    }

    fn release(&self, object: Object) {
        let was_live = self.live.borrow_mut().remove(&object);
        assert!(was_live, "{object:?} deleted while not live");
        self.released.borrow_mut().push(object);
    }

    fn source_of(&self, shader: u32) -> String {
        self.sources
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| *name == shader)
            .map(|(_, source)| source.clone())
            .unwrap_or_default()
    }
}

impl GlApi for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let name = self.allocate(Object::Shader);
        self.record(Call::CreateShader(stage, name));
        Ok(name)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().push((shader, source.to_string()));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
        if self.source_of(shader).contains("void main") {
            self.compiled.borrow_mut().insert(shader);
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.compiled.borrow().contains(&shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: function `main' is not defined".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.release(Object::Shader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let name = self.allocate(Object::Program);
        self.record(Call::CreateProgram(name));
        Ok(name)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        assert!(
            self.shader_compile_status(shader),
            "shader {shader} attached before a successful compile"
        );
        self.record(Call::AttachShader(program, shader));
        self.attached.borrow_mut().push((program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
        self.attached
            .borrow_mut()
            .retain(|pair| *pair != (program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
        let attached = self
            .attached
            .borrow()
            .iter()
            .filter(|(owner, _)| *owner == program)
            .count();
        if attached == 2 && !self.fail_link.get() {
            self.linked.borrow_mut().insert(program);
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.linked.borrow().contains(&program)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: vertex shader output `vColor' not written".to_string()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        if let Some(program) = program {
            assert!(
                self.program_link_status(program),
                "program {program} used before a successful link"
            );
        }
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.release(Object::Program(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<String> {
        assert!(
            self.program_link_status(program),
            "uniform lookup on unlinked program {program}"
        );
        ACTIVE_UNIFORMS
            .contains(&name)
            .then(|| name.to_string())
    }

    fn uniform_f32(&self, location: Option<&String>, value: f32) {
        self.record(Call::UniformF32(location.cloned(), value));
    }

    fn uniform_vec4(&self, location: Option<&String>, value: Rgba) {
        self.record(Call::UniformVec4(location.cloned(), value));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let name = self.allocate(Object::VertexArray);
        self.record(Call::CreateVertexArray(name));
        Ok(name)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
        self.release(Object::VertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let name = self.allocate(Object::Buffer);
        self.record(Call::CreateBuffer(name));
        Ok(name)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.record(Call::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[u8]) {
        self.record(Call::ArrayBufferData(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.release(Object::Buffer(buffer));
    }

    fn describe_vec2_attribute(&self, index: u32, stride: i32, offset: i32) {
        self.record(Call::DescribeVec2Attribute {
            index,
            stride,
            offset,
        });
    }

    fn viewport(&self, viewport: Viewport) {
        self.record(Call::Viewport(viewport));
    }

    fn clear_color_buffer(&self, color: Rgba) {
        self.record(Call::Clear(color));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangles { first, count });
    }

    fn context_info(&self) -> ContextInfo {
        ContextInfo {
            vendor: "Recording".to_string(),
            renderer: "RecordingGl".to_string(),
            version: "3.3 (Core Profile)".to_string(),
            glsl_version: "3.30".to_string(),
        }
    }
}
