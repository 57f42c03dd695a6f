//! WebGL2 renderer for the hero scene.

use js_sys::{Float32Array, Object, Reflect, Uint32Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::SiteError;
use crate::scene::SceneState;

const MESH_VS: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform mat3 u_normal_matrix;
out vec3 v_world;
out vec3 v_normal;
void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = normalize(u_normal_matrix * a_normal);
    gl_Position = u_projection * u_view * world;
}
"#;

const MESH_FS: &str = r#"#version 300 es
precision highp float;
in vec3 v_world;
in vec3 v_normal;
uniform vec3 u_color;
uniform vec3 u_emissive;
uniform float u_metalness;
uniform float u_roughness;
uniform float u_opacity;
uniform vec3 u_light_position;
uniform vec3 u_light_color;
uniform vec3 u_ambient;
uniform vec3 u_camera_position;
out vec4 out_color;
void main() {
    vec3 n = normalize(v_normal);
    vec3 l = normalize(u_light_position - v_world);
    vec3 v = normalize(u_camera_position - v_world);
    vec3 h = normalize(l + v);
    float diffuse = max(dot(n, l), 0.0);
    float shininess = mix(256.0, 4.0, u_roughness);
    float spec = diffuse > 0.0 ? pow(max(dot(n, h), 0.0), shininess) : 0.0;
    vec3 albedo = u_color * (1.0 - u_metalness);
    vec3 f0 = mix(vec3(0.04), u_color, u_metalness);
    vec3 lit = (albedo * diffuse + f0 * spec) * u_light_color;
    out_color = vec4(lit + u_ambient * u_color + u_emissive, u_opacity);
}
"#;

const POINTS_VS: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_size;
uniform float u_scale;
void main() {
    vec4 mv = u_view * vec4(a_position, 1.0);
    gl_Position = u_projection * mv;
    gl_PointSize = max(u_size * (u_scale / -mv.z), 1.0);
}
"#;

const POINTS_FS: &str = r#"#version 300 es
precision mediump float;
uniform float u_opacity;
out vec4 out_color;
void main() {
    out_color = vec4(1.0, 1.0, 1.0, u_opacity);
}
"#;

struct MeshPass {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    index_count: i32,
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    normal_matrix: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    light_position: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    camera_position: Option<WebGlUniformLocation>,
}

struct PointsPass {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    count: i32,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    size: Option<WebGlUniformLocation>,
    scale: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

/// Owns the GL context and the GPU copies of the scene geometry.
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    mesh: MeshPass,
    points: PointsPass,
    pixel_ratio: f64,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .field("pixel_ratio", &self.pixel_ratio)
            .finish()
    }
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, scene: &SceneState, pixel_ratio: f64) -> Result<Self, SiteError> {
        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::TRUE)?;
        Reflect::set(&options, &JsValue::from_str("antialias"), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(SiteError::WebGlUnavailable)?
            .dyn_into()
            .map_err(|_| SiteError::WebGlUnavailable)?;

        let mesh = MeshPass::new(&gl, scene)?;
        let points = PointsPass::new(&gl, scene)?;

        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::BLEND);
        gl.blend_func_separate(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA, GL::ONE, GL::ONE_MINUS_SRC_ALPHA);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        Ok(Self { gl, canvas, mesh, points, pixel_ratio })
    }

    /// Resize the drawing buffer for a CSS size. The canvas' CSS box is left alone.
    pub fn set_size(&self, width: f64, height: f64) {
        let (w, h) = crate::viewport::buffer_size((width, height), self.pixel_ratio);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.gl.viewport(0, 0, w as i32, h as i32);
    }

    pub fn render(&self, scene: &SceneState) {
        let gl = &self.gl;
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        let view = scene.camera.view().to_cols_array();
        let projection = scene.camera.projection().to_cols_array();

        let m = &self.mesh;
        gl.use_program(Some(&m.program));
        gl.bind_vertex_array(Some(&m.vao));
        gl.uniform_matrix4fv_with_f32_array(m.model.as_ref(), false, &scene.model_matrix().to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(m.view.as_ref(), false, &view);
        gl.uniform_matrix4fv_with_f32_array(m.projection.as_ref(), false, &projection);
        gl.uniform_matrix3fv_with_f32_array(
            m.normal_matrix.as_ref(),
            false,
            &scene.normal_matrix().to_cols_array(),
        );
        let mat = &scene.material;
        gl.uniform3fv_with_f32_array(m.color.as_ref(), &mat.color.to_array());
        gl.uniform3fv_with_f32_array(m.emissive.as_ref(), &mat.emissive.to_array());
        gl.uniform1f(m.metalness.as_ref(), mat.metalness);
        gl.uniform1f(m.roughness.as_ref(), mat.roughness);
        gl.uniform1f(m.opacity.as_ref(), mat.opacity);
        gl.uniform3fv_with_f32_array(m.light_position.as_ref(), &scene.light.position.to_array());
        gl.uniform3fv_with_f32_array(
            m.light_color.as_ref(),
            &(scene.light.color * scene.light.intensity).to_array(),
        );
        gl.uniform3fv_with_f32_array(
            m.ambient.as_ref(),
            &(scene.ambient.color * scene.ambient.intensity).to_array(),
        );
        gl.uniform3fv_with_f32_array(m.camera_position.as_ref(), &scene.camera.position.to_array());
        gl.draw_elements_with_i32(GL::TRIANGLES, m.index_count, GL::UNSIGNED_INT, 0);

        let p = &self.points;
        if p.count > 0 {
            gl.use_program(Some(&p.program));
            gl.bind_vertex_array(Some(&p.vao));
            gl.uniform_matrix4fv_with_f32_array(p.view.as_ref(), false, &view);
            gl.uniform_matrix4fv_with_f32_array(p.projection.as_ref(), false, &projection);
            gl.uniform1f(p.size.as_ref(), scene.particles.size);
            gl.uniform1f(p.scale.as_ref(), self.canvas.height() as f32 * 0.5);
            gl.uniform1f(p.opacity.as_ref(), scene.particles.opacity);
            gl.draw_arrays(GL::POINTS, 0, p.count);
        }
        gl.bind_vertex_array(None);
    }
}

impl MeshPass {
    fn new(gl: &GL, scene: &SceneState) -> Result<Self, SiteError> {
        let program = link_program(gl, MESH_VS, MESH_FS)?;
        let vao = gl.create_vertex_array().ok_or(SiteError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        upload_attribute(gl, 0, &scene.geometry.positions)?;
        upload_attribute(gl, 1, &scene.geometry.normals)?;
        let indices = gl.create_buffer().ok_or(SiteError::Resource("index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        gl.buffer_data_with_array_buffer_view(
            GL::ELEMENT_ARRAY_BUFFER,
            &Uint32Array::from(scene.geometry.indices.as_slice()),
            GL::STATIC_DRAW,
        );
        gl.bind_vertex_array(None);

        let loc = |name| gl.get_uniform_location(&program, name);
        Ok(Self {
            index_count: scene.geometry.indices.len() as i32,
            model: loc("u_model"),
            view: loc("u_view"),
            projection: loc("u_projection"),
            normal_matrix: loc("u_normal_matrix"),
            color: loc("u_color"),
            emissive: loc("u_emissive"),
            metalness: loc("u_metalness"),
            roughness: loc("u_roughness"),
            opacity: loc("u_opacity"),
            light_position: loc("u_light_position"),
            light_color: loc("u_light_color"),
            ambient: loc("u_ambient"),
            camera_position: loc("u_camera_position"),
            vao,
            program,
        })
    }
}

impl PointsPass {
    fn new(gl: &GL, scene: &SceneState) -> Result<Self, SiteError> {
        let program = link_program(gl, POINTS_VS, POINTS_FS)?;
        let vao = gl.create_vertex_array().ok_or(SiteError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        upload_attribute(gl, 0, &scene.particles.positions)?;
        gl.bind_vertex_array(None);

        let loc = |name| gl.get_uniform_location(&program, name);
        Ok(Self {
            count: scene.particles.len() as i32,
            view: loc("u_view"),
            projection: loc("u_projection"),
            size: loc("u_size"),
            scale: loc("u_scale"),
            opacity: loc("u_opacity"),
            vao,
            program,
        })
    }
}

/// Upload a tightly packed vec3 attribute into the bound vertex array.
fn upload_attribute(gl: &GL, location: u32, data: &[f32]) -> Result<(), SiteError> {
    let buffer = gl.create_buffer().ok_or(SiteError::Resource("vertex buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(data), GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, 3, GL::FLOAT, false, 0, 0);
    Ok(())
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, SiteError> {
    let shader = gl.create_shader(kind).ok_or(SiteError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(SiteError::Shader(log))
    }
}

fn link_program(gl: &GL, vs: &str, fs: &str) -> Result<WebGlProgram, SiteError> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vs)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fs)?;
    let program = gl.create_program().ok_or(SiteError::Resource("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(SiteError::Link(gl.get_program_info_log(&program).unwrap_or_default()))
    }
}
