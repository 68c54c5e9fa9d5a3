//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    /// Player 1's half (top)
    pub top_half: [f32; 4],
    /// Player 2's half (bottom)
    pub bottom_half: [f32; 4],
    pub center_line: [f32; 4],
    pub path: [f32; 4],
    pub ball: [f32; 4],
    pub ball_glow: [f32; 4],
    /// Trail color; alpha is scaled per sample
    pub trail: [f32; 4],
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        background: [0.06, 0.07, 0.12, 1.0],
        top_half: [0.35, 0.55, 1.0, 0.12],
        bottom_half: [1.0, 0.45, 0.35, 0.12],
        center_line: [1.0, 1.0, 1.0, 0.25],
        path: [1.0, 1.0, 1.0, 0.9],
        ball: [1.0, 0.82, 0.3, 1.0],
        ball_glow: [1.0, 1.0, 1.0, 0.35],
        trail: [1.0, 1.0, 1.0, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        top_half: [0.0, 0.6, 1.0, 0.3],
        bottom_half: [1.0, 0.3, 0.0, 0.3],
        center_line: [1.0, 1.0, 1.0, 0.8],
        path: [1.0, 1.0, 1.0, 1.0],
        ball: [1.0, 1.0, 0.0, 1.0],
        ball_glow: [1.0, 1.0, 1.0, 0.6],
        trail: [1.0, 1.0, 1.0, 1.0],
    };

    pub fn for_settings(high_contrast: bool) -> Palette {
        if high_contrast {
            Palette::HIGH_CONTRAST
        } else {
            Palette::DEFAULT
        }
    }
}
