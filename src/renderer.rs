pub mod bitmap;
pub mod cpu_backend;
pub mod layout;

pub use bitmap::Bitmap;
pub use cpu_backend::{CpuBackend, CpuFont};
pub use layout::{Justify, ParseJustifyError};
