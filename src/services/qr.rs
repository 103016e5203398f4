use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::models::event::Event;
use crate::utils::error::AppError;

/// Renders a PNG QR ticket for an event. The payload is what a door
/// scanner reads back: `id|title|date`.
pub fn ticket_png(event: &Event) -> Result<Vec<u8>, AppError> {
    let payload = format!("{}|{}|{}", event.id, event.title, event.date.to_rfc3339());

    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| AppError::InternalServerError(format!("QR encoding failed: {e}")))?;

    let rendered = code.render::<Luma<u8>>().min_dimensions(256, 256).build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(rendered)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::InternalServerError(format!("QR rendering failed: {e}")))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn ticket_is_a_png() {
        let event = Event {
            id: Uuid::new_v4(),
            title: "Launch Party".to_string(),
            description: Some("Doors at eight".to_string()),
            date: Utc::now(),
            location: "Roof".to_string(),
            image_url: None,
            price: Decimal::ZERO,
            rsvp_count: 3,
            created_at: Utc::now(),
        };

        let png = ticket_png(&event).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(png.len() > 100);
    }
}
