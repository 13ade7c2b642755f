/// Configuration for camera capture.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    device: Option<String>,
    width: u32,
    height: u32,
    fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: None,
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

impl CameraConfig {
    /// Set the device uid. `None` or an empty string selects the backend's
    /// default device.
    pub fn with_device(mut self, device: Option<String>) -> Self {
        self.device = device.filter(|uid| !uid.is_empty());
        self
    }

    /// Set the capture width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the capture height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the frames per second for the capture loop.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    // Getters
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
