pub mod exif;

mod encoded;
mod surface;

pub use encoded::EncodedImage;

pub use surface::ImageSurface;
pub use surface::Surface;
pub use surface::extension_for_mime;
pub use surface::jpeg_quality;
