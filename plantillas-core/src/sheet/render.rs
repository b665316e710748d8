use printpdf::{
    Image, ImageTransform, Mm, PdfDocument, PdfLayerReference,
    image_crate::{self, DynamicImage},
};
use tracing::{debug, warn};

use crate::{
    CatalogError, Result,
    sheet::layout::{
        PAGE_HEIGHT_MM, PAGE_WIDTH_MM, SLOT_HEIGHT_MM, SLOT_WIDTH_MM,
        SheetImage, SheetPlan, slot_bottom_mm,
    },
};

const DOCUMENT_TITLE: &str = "imagenes";
const LAYER_NAME: &str = "images";
const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

/// Serialize a plan into a PDF. Blocking and CPU-bound; call it from the
/// blocking pool.
///
/// Bytes that do not decode as an image leave their slot empty.
pub fn render_sheet(plan: SheetPlan) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );

    for (page_index, page) in plan.into_pages().into_iter().enumerate() {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        for (slot, entry) in page.slots.into_iter().enumerate() {
            let Some(image) = entry else { continue };
            draw_in_slot(&layer, &image, slot);
        }
    }

    doc.save_to_bytes()
        .map_err(|err| CatalogError::Render(err.to_string()))
}

fn draw_in_slot(layer: &PdfLayerReference, image: &SheetImage, slot: usize) {
    let decoded = match image_crate::load_from_memory(&image.bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(id = %image.id, error = %err, "skipping undecodable image");
            return;
        }
    };

    // Alpha channels are dropped; the sheet is printed on white anyway.
    let rgb = decoded.to_rgb8();
    let (width_px, height_px) = rgb.dimensions();
    if width_px == 0 || height_px == 0 {
        warn!(id = %image.id, "skipping empty image");
        return;
    }

    let native_width_mm = width_px as f32 * MM_PER_INCH / IMAGE_DPI;
    let native_height_mm = height_px as f32 * MM_PER_INCH / IMAGE_DPI;

    let transform = ImageTransform {
        translate_x: Some(Mm(0.0)),
        translate_y: Some(Mm(slot_bottom_mm(slot))),
        scale_x: Some(SLOT_WIDTH_MM / native_width_mm),
        scale_y: Some(SLOT_HEIGHT_MM / native_height_mm),
        dpi: Some(IMAGE_DPI),
        ..Default::default()
    };

    Image::from_dynamic_image(&DynamicImage::ImageRgb8(rgb))
        .add_to_layer(layer.clone(), transform);

    debug!(id = %image.id, slot, width_px, height_px, "placed image");
}
