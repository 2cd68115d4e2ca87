use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use ::image::{codecs::jpeg::JpegEncoder, ExtendedColorType, ImageError};

use crate::{
    error::Error,
    image::{Image, ImageWriter},
};

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

pub struct JpegImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Image,
    quality: u8,
    target_name: String,
}

impl<'a, T: Write> JpegImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Image, target_name: impl Into<String>) -> Self {
        Self {
            writer,
            image,
            quality: DEFAULT_JPEG_QUALITY,
            target_name: target_name.into(),
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }
}

impl<'a> JpegImageWriter<'a, BufWriter<File>> {
    pub fn create(file_path: &Path, image: &'a Image) -> crate::Result<Self> {
        let target_name = file_path.display().to_string();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(file_path)
            .map_err(|e| Error::UnableToOpenOutputFileForWriting(target_name.clone(), e))?;
        Ok(Self::new(BufWriter::new(file), image, target_name))
    }
}

impl<T: Write> ImageWriter for JpegImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let bytes = self.image.to_rgb_bytes();
        JpegEncoder::new_with_quality(&mut self.writer, self.quality)
            .encode(
                &bytes,
                self.image.width(),
                self.image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| Error::SaveFailure(self.target_name.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| Error::SaveFailure(self.target_name.clone(), ImageError::IoError(e)))
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Cursor, Write};

    use super::JpegImageWriter;
    use crate::color::RGBColorFormat;
    use crate::error::Error;
    use crate::image::{reader::jpeg::JpegImageReader, Image, ImageReader, ImageWriter};

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read only"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn solid_image(width: u32, height: u32, color: RGBColorFormat<u8>) -> Image {
        Image::new(width, height, vec![color; width as usize * height as usize]).unwrap()
    }

    #[test]
    fn written_jpeg_decodes_to_same_size() {
        let image = solid_image(15, 9, RGBColorFormat::new(200, 40, 90));
        let mut bytes = Vec::new();
        JpegImageWriter::new(&mut bytes, &image, "crop.jpg")
            .write_image()
            .unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8], "JPEG must start with SOI");
        let decoded = JpegImageReader::new(Cursor::new(bytes), "crop.jpg")
            .read_image()
            .unwrap();
        assert_eq!(decoded.width(), 15);
        assert_eq!(decoded.height(), 9);
    }

    #[test]
    fn single_pixel_image_can_be_written() {
        let image = solid_image(1, 1, RGBColorFormat::new(0, 0, 0));
        let mut bytes = Vec::new();
        JpegImageWriter::new(&mut bytes, &image, "dot.jpg")
            .with_quality(75)
            .write_image()
            .unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn failing_sink_is_a_save_failure() {
        let image = solid_image(4, 4, RGBColorFormat::new(1, 2, 3));
        let result = JpegImageWriter::new(FailingWriter, &image, "readonly.jpg").write_image();
        match result {
            Err(Error::SaveFailure(name, _)) => assert_eq!(name, "readonly.jpg"),
            _ => panic!("Write failure was not reported as save failure"),
        }
    }
}
