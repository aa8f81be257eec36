mod buffer;
pub mod orientation;

pub use buffer::PixelBuffer;

pub use orientation::Orientation;
pub use orientation::OrientationCapability;
pub use orientation::OrientationProbe;
pub use orientation::normalize;
