//! Fly camera for viewing and streaming the world

use crate::core::types::{Mat4, Vec3};
use crate::voxel::chunk::ChunkCoord;

/// Pitch is clamped to this many degrees either side of the horizon
const PITCH_LIMIT: f32 = 89.0;

/// Directions the camera can be moved in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Camera with position, yaw/pitch orientation, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation around the Y axis in degrees (-90 looks down -Z)
    yaw: f32,
    /// Rotation above/below the horizon in degrees
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Degrees of rotation per unit of mouse movement
    pub mouse_sensitivity: f32,
}

impl Camera {
    /// Create a new camera looking down -Z
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            front: -Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
            move_speed: 15.0,
            mouse_sensitivity: 0.1,
        };
        camera.update_vectors();
        camera
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get forward direction
    pub fn forward(&self) -> Vec3 {
        self.front
    }

    /// Get right direction
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Get up direction
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Current yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set orientation from yaw and pitch in degrees
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Move the camera along its local axes for `dt` seconds
    pub fn process_movement(&mut self, movement: Movement, dt: f32) {
        let velocity = self.move_speed * dt;
        match movement {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
            Movement::Up => self.position += self.up * velocity,
            Movement::Down => self.position -= self.up * velocity,
        }
    }

    /// Apply a mouse delta (positive `dy` looks up)
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.set_orientation(
            self.yaw + dx * self.mouse_sensitivity,
            self.pitch + dy * self.mouse_sensitivity,
        );
    }

    /// Chunk column containing the camera
    pub fn chunk_coord(&self) -> ChunkCoord {
        ChunkCoord::from_world_pos(self.position)
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 50.0, 0.0), 70.0, 16.0 / 9.0)
    }
}
