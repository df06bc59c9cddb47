// Certificate layout export as JSON

use crate::error::LayoutError;
use crate::state::{AnnotationSurface, ImageRegion, NormBox};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateLayout {
    pub image: PathBuf,
    pub image_width: u32,
    pub image_height: u32,
    /// Name box as fractions of the image size.
    pub name_box: NormBox,
    /// Same box in image pixels, top-left origin.
    pub name_region: ImageRegion,
}

impl CertificateLayout {
    pub fn from_surface(surface: &AnnotationSurface) -> Result<Self, LayoutError> {
        let image = surface.image().ok_or(LayoutError::NoImage)?;
        let name_box = surface.final_box().ok_or(LayoutError::NoNameBox)?;
        Ok(Self {
            image: image.origin.clone(),
            image_width: image.width,
            image_height: image.height,
            name_box,
            name_region: name_box.to_image_region(image.width, image.height),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), LayoutError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Layout written to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}
