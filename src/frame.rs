use crate::selection::Finger;
use bytemuck::{Pod, Zeroable};
use nalgebra_glm as glm;
use std::collections::BTreeSet;

const FOV_Y_DEGREES: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// Everything the renderer needs from the controller for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub eye: glm::Vec3,
    pub look_at: glm::Vec3,
    pub up: glm::Vec3,
    pub active_item: Option<Finger>,
    pub progress: f32,
    pub growing: bool,
    pub completed: BTreeSet<Finger>,
    /// Model spin in degrees while every finger is finished.
    pub celebration_angle: Option<f32>,
}

impl FrameSnapshot {
    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at(&self.eye, &self.look_at, &self.up)
    }

    /// Perspective projection for a viewport of the given width/height ratio.
    pub fn projection_matrix(aspect: f32) -> glm::Mat4 {
        glm::perspective(aspect, FOV_Y_DEGREES.to_radians(), NEAR_PLANE, FAR_PLANE)
    }

    pub fn uniforms(&self) -> ShaderUniforms {
        let mut painted = [0; Finger::COUNT + 1];
        for finger in &self.completed {
            painted[finger.shader_index() as usize] = 1;
        }
        ShaderUniforms {
            active_item: self.active_item.map_or(0, Finger::shader_index),
            progress: self.progress,
            show_pattern: self.growing as i32,
            painted,
        }
    }
}

/// Uniform block handed to the decoration shader unchanged.
///
/// Slot 0 of `painted` is the whole-hand slot and stays 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShaderUniforms {
    pub active_item: i32,
    pub progress: f32,
    pub show_pattern: i32,
    pub painted: [i32; Finger::COUNT + 1],
}
