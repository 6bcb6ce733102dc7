use crate::AnalysisError;
use image::ImageFormat;
use std::io::Cursor;
use vision_gateway::BoundingPoly;

/// Cuts the polygon's region out of the image and re-encodes it as JPEG.
///
/// The rectangle is the min/max bounding box over all vertices, so the
/// result is correct regardless of the order the gateway lists the corners
/// in. Coordinates are clamped to the image bounds.
pub fn crop_face(image_bytes: &[u8], poly: &BoundingPoly) -> Result<Vec<u8>, AnalysisError> {
    if poly.vertices.is_empty() {
        return Err(AnalysisError::EmptyBoundingPoly);
    }

    let img = image::load_from_memory(image_bytes)?;
    let (left, top, right, bottom) = bounding_box(poly, img.width(), img.height())?;

    let cropped = img.crop_imm(left, top, right - left, bottom - top).to_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    cropped.write_to(&mut buffer, ImageFormat::Jpeg)?;
    Ok(buffer.into_inner())
}

fn bounding_box(
    poly: &BoundingPoly,
    width: u32,
    height: u32,
) -> Result<(u32, u32, u32, u32), AnalysisError> {
    let xs = poly.vertices.iter().map(|v| v.x);
    let ys = poly.vertices.iter().map(|v| v.y);
    let (min_x, max_x) = (xs.clone().min().unwrap_or(0), xs.max().unwrap_or(0));
    let (min_y, max_y) = (ys.clone().min().unwrap_or(0), ys.max().unwrap_or(0));

    let left = min_x.clamp(0, width as i32) as u32;
    let right = max_x.clamp(0, width as i32) as u32;
    let top = min_y.clamp(0, height as i32) as u32;
    let bottom = max_y.clamp(0, height as i32) as u32;

    if right <= left || bottom <= top {
        return Err(AnalysisError::CropOutOfBounds);
    }
    Ok((left, top, right, bottom))
}
