//! Application context: the world, the viewer and a render backend

use serde::Serialize;

use super::config::SceneConfig;
use crate::core::camera::{Camera, Movement};
use crate::core::time::FrameTimer;
use crate::core::types::Result;
use crate::render::{RenderBackend, RenderStats};
use crate::streaming::LoadProgress;
use crate::voxel::chunk::ChunkCoord;
use crate::voxel::edit::{apply_edit, EditAction, EditOutcome};
use crate::voxel::world::{StreamingReport, World};

const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Input gathered for one frame
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    /// Movement keys held this frame
    pub movement: Vec<Movement>,
    /// Mouse delta (x right, y up)
    pub mouse_delta: (f32, f32),
    /// Frame time override in seconds; the frame timer is used when `None`
    pub dt: Option<f32>,
    pub edit: Option<EditAction>,
}

/// What happened during one frame
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    pub streaming: StreamingReport,
    pub render: RenderStats,
    pub edit: Option<EditOutcome>,
}

/// Snapshot for the debug overlay
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DebugInfo {
    pub fps: f32,
    pub position: [f32; 3],
    pub chunk: ChunkCoord,
    pub biome: &'static str,
    pub loaded_chunks: usize,
}

/// Owns everything a running session needs
pub struct App<B: RenderBackend> {
    world: World,
    camera: Camera,
    timer: FrameTimer,
    backend: B,
    pick_distance: f32,
}

impl<B: RenderBackend> App<B> {
    pub fn new(config: SceneConfig, backend: B) -> Result<Self> {
        config.validate()?;
        let camera = config.camera.build(DEFAULT_ASPECT);
        let pick_distance = config.camera.pick_distance;
        let world = World::new(config.generation, config.streaming);
        Ok(Self {
            world,
            camera,
            timer: FrameTimer::new(),
            backend,
            pick_distance,
        })
    }

    /// Loading phase around the camera. Returns the number of chunks generated.
    pub fn load_world<F>(&mut self, progress: F) -> usize
    where
        F: Fn(LoadProgress) + Sync,
    {
        self.world.preload(self.camera.chunk_coord(), progress)
    }

    /// Advance one frame: move the camera, stream, apply the edit, then draw
    pub fn frame(&mut self, input: &FrameInput) -> FrameStats {
        self.timer.tick();
        let dt = input.dt.unwrap_or_else(|| self.timer.delta_secs());

        for &movement in &input.movement {
            self.camera.process_movement(movement, dt);
        }
        let (dx, dy) = input.mouse_delta;
        if dx != 0.0 || dy != 0.0 {
            self.camera.process_mouse(dx, dy);
        }

        let streaming = self.world.update(self.camera.position);
        for &coord in &streaming.evicted {
            self.backend.release_chunk(coord);
        }

        let edit = input.edit.and_then(|action| {
            apply_edit(
                &mut self.world,
                self.camera.position,
                self.camera.forward(),
                self.pick_distance,
                action,
            )
        });
        if let Some(outcome) = &edit {
            log::debug!("Edit applied: {:?}", outcome);
        }

        let view_projection = self.camera.view_projection();
        let render = self.world.render(&view_projection, &mut self.backend);

        FrameStats { streaming, render, edit }
    }

    pub fn debug_info(&self) -> DebugInfo {
        let position = self.camera.position;
        DebugInfo {
            fps: self.timer.fps(),
            position: position.to_array(),
            chunk: self.camera.chunk_coord(),
            biome: self
                .world
                .biome_at(position.x.floor() as i32, position.z.floor() as i32)
                .name(),
            loaded_chunks: self.world.chunk_count(),
        }
    }

    /// Update the projection for a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.set_aspect(width as f32, height as f32);
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
