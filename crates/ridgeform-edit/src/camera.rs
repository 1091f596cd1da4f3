use glam::{Quat, Vec3};
use ridgeform_core::Ray;

/// Position and orientation of a viewer, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Camera collaborator the editor parks while sculpting.
pub trait CameraRig {
    fn snapshot(&self) -> CameraPose;
    fn restore(&mut self, pose: CameraPose);
    fn free_look(&self) -> bool;
    /// Enable or suspend mouse-look and movement.
    fn set_free_look(&mut self, enabled: bool);
}

/// First-person fly camera.
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
    pub move_speed: f32,
    pub fov_y_rad: f32,
    free_look: bool,
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 90.0,
            move_speed: 10.0,
            fov_y_rad: std::f32::consts::FRAC_PI_3,
            free_look: true,
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::Y, self.yaw.to_radians())
            * Quat::from_axis_angle(Vec3::X, self.pitch.to_radians())
    }

    /// View direction. Yaw 0 and pitch 0 look down -Z.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    /// Mouse-look. Pitch stays within straight up and straight down.
    pub fn look(&mut self, dx: f32, dy: f32, dt: f32) {
        if !self.free_look {
            return;
        }
        self.yaw -= dx * self.sensitivity * dt;
        self.pitch = (self.pitch + dy * self.sensitivity * dt).clamp(-90.0, 90.0);
    }

    /// Move along the view (`forward`) and strafe (`right`) axes.
    pub fn fly(&mut self, forward: f32, right: f32, dt: f32) {
        if !self.free_look {
            return;
        }
        let step = self.move_speed * dt;
        self.position += self.forward() * (forward * step) + self.right() * (right * step);
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> Ray {
        let half_h = (self.fov_y_rad * 0.5).tan();
        let up = self.orientation() * Vec3::Y;
        let dir = self.forward() + self.right() * (ndc_x * half_h * aspect) + up * (ndc_y * half_h);
        Ray::new(self.position, dir)
    }
}

impl CameraRig for FlyCamera {
    fn snapshot(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    fn restore(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.yaw = pose.yaw;
        self.pitch = pose.pitch;
    }

    fn free_look(&self) -> bool {
        self.free_look
    }

    fn set_free_look(&mut self, enabled: bool) {
        self.free_look = enabled;
    }
}
