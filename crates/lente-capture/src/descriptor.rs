use std::fmt;
use std::path::PathBuf;

/// Identifies what a capture source reads from.
///
/// One tagged type instead of parallel camera/decoder/file classes: a device
/// uid (`None` selects the platform default), a multi-frame asset path, or a
/// single-frame image path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    Device(Option<String>),
    Asset(PathBuf),
    Image(PathBuf),
}

impl SourceDescriptor {
    pub fn is_image(&self) -> bool {
        matches!(self, SourceDescriptor::Image(_))
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::Device(None) => write!(f, "camera(default)"),
            SourceDescriptor::Device(Some(uid)) => write!(f, "camera({uid})"),
            SourceDescriptor::Asset(path) => write!(f, "decoder({})", path.display()),
            SourceDescriptor::Image(path) => write!(f, "image({})", path.display()),
        }
    }
}
