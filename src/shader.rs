//! # Shader Programs
//!
//! A [`ShaderProgram`] pairs a wgpu render pipeline with its uniform block. It is the wgpu
//! counterpart of a linked vertex + fragment program: both stages are read from separate
//! WGSL files, compiled under a validation error scope so that a broken shader surfaces its
//! compiler log instead of aborting inside the driver, and linked into one pipeline.
//!
//! Two programs exist:
//!
//! | kind                  | files                                      | vertex layout    |
//! |-----------------------|--------------------------------------------|------------------|
//! | [`ProgramKind::Lit`]  | `lit_vertex.wgsl`, `lit_fragment.wgsl`     | `TexturedVertex` |
//! | [`ProgramKind::Flat`] | `flat_vertex.wgsl`, `flat_fragment.wgsl`   | `ColoredVertex`  |
//!
//! The lit program additionally takes the cube texture as bind group 1.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::renderer::Renderer;
use crate::uniform_binding::UniformBinding;
use crate::uniform_buffer::{FlatUniforms, LitUniforms, Uniform, UniformSlots};
use crate::vertex::{ColoredVertex, TexturedVertex};

/// Which of the two programs to build.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProgramKind {
    /// Textured geometry shaded with ambient + diffuse lighting.
    Lit,
    /// Per-vertex colored geometry with no lighting.
    Flat,
}

impl ProgramKind {
    pub fn label(self) -> &'static str {
        match self {
            ProgramKind::Lit => "lit",
            ProgramKind::Flat => "flat",
        }
    }

    /// Paths of the vertex and fragment stage sources inside `shader_dir`.
    pub fn source_paths(self, shader_dir: &Path) -> (PathBuf, PathBuf) {
        let label = self.label();
        (
            shader_dir.join(format!("{label}_vertex.wgsl")),
            shader_dir.join(format!("{label}_fragment.wgsl")),
        )
    }

    fn slots(self) -> UniformSlots {
        match self {
            ProgramKind::Lit => UniformSlots::lit(),
            ProgramKind::Flat => UniformSlots::flat(),
        }
    }

    fn vertex_attributes(self) -> Vec<wgpu::VertexAttribute> {
        match self {
            ProgramKind::Lit => TexturedVertex::vertex_attributes(),
            ProgramKind::Flat => ColoredVertex::vertex_attributes(),
        }
    }

    fn vertex_layout(self, attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        match self {
            ProgramKind::Lit => TexturedVertex::description(attributes),
            ProgramKind::Flat => ColoredVertex::description(attributes),
        }
    }
}

/// Reads one shader stage from disk.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}

/// A linked render pipeline and the uniform buffer its stages read from.
pub struct ShaderProgram {
    kind: ProgramKind,
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformBinding,
}

impl ShaderProgram {
    /// Loads, compiles and links the program of `kind` from `shader_dir`.
    ///
    /// `extra_layouts` are appended after the uniform block's layout, so the first of them
    /// becomes `@group(1)`.
    pub async fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_dir: &Path,
        kind: ProgramKind,
        extra_layouts: &[&wgpu::BindGroupLayout],
    ) -> Result<Self> {
        let (vertex_path, fragment_path) = kind.source_paths(shader_dir);
        let vertex_module = compile_module(device, &vertex_path).await?;
        let fragment_module = compile_module(device, &fragment_path).await?;

        let uniforms = match kind {
            ProgramKind::Lit => {
                UniformBinding::new(device, kind.label(), &LitUniforms::default(), kind.slots())
            }
            ProgramKind::Flat => {
                UniformBinding::new(device, kind.label(), &FlatUniforms::default(), kind.slots())
            }
        };

        let mut bind_group_layouts = vec![&uniforms.bind_group_layout];
        bind_group_layouts.extend_from_slice(extra_layouts);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(kind.label()),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        let attributes = kind.vertex_attributes();

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(kind.label()),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("vertex_main"),
                buffers: &[kind.vertex_layout(&attributes)],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Renderer::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("fragment_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(error) = device.pop_error_scope().await {
            return Err(Error::Pipeline {
                label: kind.label().to_string(),
                log: error.to_string(),
            });
        }

        log::info!(
            "Built {} program from {:?} and {:?}",
            kind.label(),
            vertex_path,
            fragment_path
        );

        Ok(Self {
            kind,
            pipeline,
            uniforms,
        })
    }

    pub fn kind(&self) -> ProgramKind {
        self.kind
    }

    /// Writes a named uniform. Uniforms this program does not declare are ignored.
    pub fn set<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, uniform: Uniform, value: &T) {
        self.uniforms.write(queue, uniform, value);
    }

    pub fn set_matrix(&self, queue: &wgpu::Queue, uniform: Uniform, matrix: &nalgebra_glm::Mat4) {
        self.set(queue, uniform, matrix);
    }

    /// Writes a `vec3` uniform, padded to the `vec4` slot the block reserves for it.
    pub fn set_vec3(&self, queue: &wgpu::Queue, uniform: Uniform, value: &nalgebra_glm::Vec3) {
        self.set(queue, uniform, &nalgebra_glm::vec4(value.x, value.y, value.z, 0.0));
    }

    /// Binds the pipeline and the uniform block at group 0.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
    }
}

/// Reads and validates one WGSL stage.
async fn compile_module(device: &wgpu::Device, path: &Path) -> Result<wgpu::ShaderModule> {
    let source = read_source(path)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&path.display().to_string()),
        source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Owned(source)),
    });
    match device.pop_error_scope().await {
        Some(error) => Err(Error::ShaderCompile {
            path: path.to_path_buf(),
            log: error.to_string(),
        }),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_program_reads_two_stage_files() {
        let dir = Path::new("shaders");
        assert_eq!(
            ProgramKind::Lit.source_paths(dir),
            (dir.join("lit_vertex.wgsl"), dir.join("lit_fragment.wgsl"))
        );
        assert_eq!(
            ProgramKind::Flat.source_paths(dir),
            (dir.join("flat_vertex.wgsl"), dir.join("flat_fragment.wgsl"))
        );
    }

    #[test]
    fn read_source_returns_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.wgsl");
        std::fs::write(&path, "@vertex fn vertex_main() {}").unwrap();

        assert_eq!(read_source(&path).unwrap(), "@vertex fn vertex_main() {}");
    }

    #[test]
    fn read_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lit_vertex.wgsl");

        let error = read_source(&path).unwrap_err();
        assert!(matches!(error, Error::ShaderSource { .. }));
        assert!(error.to_string().contains("lit_vertex.wgsl"));
    }

    #[test]
    fn bundled_shaders_are_present() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        for kind in [ProgramKind::Lit, ProgramKind::Flat] {
            let (vertex, fragment) = kind.source_paths(&dir);
            assert!(read_source(&vertex).unwrap().contains("fn vertex_main"));
            assert!(read_source(&fragment).unwrap().contains("fn fragment_main"));
        }
    }

    #[test]
    fn lit_shaders_declare_every_uniform() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        let (vertex, fragment) = ProgramKind::Lit.source_paths(&dir);
        let sources = read_source(&vertex).unwrap() + &read_source(&fragment).unwrap();

        for uniform in [
            Uniform::Projection,
            Uniform::View,
            Uniform::Model,
            Uniform::Ambient,
            Uniform::LightPos,
            Uniform::LightCol,
        ] {
            assert!(sources.contains(uniform.name()), "missing {}", uniform.name());
        }
        assert!(sources.contains("imageTexture"));
    }

    fn parse_and_validate(path: &Path) -> wgpu::naga::Module {
        use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};

        let source = read_source(path).unwrap();
        let module = wgpu::naga::front::wgsl::parse_str(&source).unwrap_or_else(|error| {
            panic!("{}: {}", path.display(), error.emit_to_string(&source))
        });
        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .unwrap_or_else(|error| panic!("{}: {error:?}", path.display()));
        module
    }

    /// `(member name, byte offset)` of the `Uniforms` struct declared in `module`, if any.
    fn uniform_block_offsets(module: &wgpu::naga::Module) -> Option<Vec<(String, u32)>> {
        module.types.iter().find_map(|(_, ty)| {
            let wgpu::naga::TypeInner::Struct { members, .. } = &ty.inner else {
                return None;
            };
            if ty.name.as_deref() != Some("Uniforms") {
                return None;
            }
            let offsets = members
                .iter()
                .map(|member| (member.name.clone().unwrap_or_default(), member.offset))
                .collect();
            Some(offsets)
        })
    }

    #[test]
    fn bundled_shaders_validate() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        for kind in [ProgramKind::Lit, ProgramKind::Flat] {
            let (vertex, fragment) = kind.source_paths(&dir);
            parse_and_validate(&vertex);
            parse_and_validate(&fragment);
        }
    }

    #[test]
    fn uniform_slots_match_wgsl_struct_layout() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        for kind in [ProgramKind::Lit, ProgramKind::Flat] {
            let slots = kind.slots();
            let (vertex, fragment) = kind.source_paths(&dir);

            for path in [vertex, fragment] {
                let Some(offsets) = uniform_block_offsets(&parse_and_validate(&path)) else {
                    continue;
                };
                for (name, offset) in &offsets {
                    let uniform = [
                        Uniform::Projection,
                        Uniform::View,
                        Uniform::Model,
                        Uniform::Ambient,
                        Uniform::LightPos,
                        Uniform::LightCol,
                    ]
                    .into_iter()
                    .find(|uniform| uniform.name() == name)
                    .unwrap_or_else(|| panic!("{}: unknown uniform {name}", path.display()));
                    let slot = slots
                        .get(uniform)
                        .unwrap_or_else(|| panic!("{}: no slot for {name}", path.display()));
                    assert_eq!(slot.offset, u64::from(*offset), "{}: {name}", path.display());
                }
            }
        }
    }

    #[test]
    fn vertex_stages_declare_the_whole_uniform_block() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        let (lit_vertex, _) = ProgramKind::Lit.source_paths(&dir);
        let (flat_vertex, _) = ProgramKind::Flat.source_paths(&dir);

        let lit = uniform_block_offsets(&parse_and_validate(&lit_vertex)).unwrap();
        let names: Vec<_> = lit.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["projection", "view", "model", "ambient", "lightPos", "lightCol"]);

        let flat = uniform_block_offsets(&parse_and_validate(&flat_vertex)).unwrap();
        assert_eq!(flat.len(), 3);
    }
}
