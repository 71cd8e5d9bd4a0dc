use phonebook_core::models::ImageUpload;

/// Five bytes starting with the JPEG SOI marker
pub fn tiny_jpeg() -> ImageUpload {
    ImageUpload::new("photo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00])
}

pub fn tiny_png() -> ImageUpload {
    ImageUpload::new("photo.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47])
}

pub fn image_of_size(len: usize) -> ImageUpload {
    ImageUpload::new("large.png", "image/png", vec![0xAB; len])
}
