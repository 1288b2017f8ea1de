//! Minimal PDF serializer: one page, JPEG image XObjects, a content stream.

use std::fmt::Write as _;

/// A JPEG-encoded RGB image ready to embed as `/DCTDecode`.
pub struct JpegImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Where an image lands on the page, in points, origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

struct ObjectBuffer {
    bytes: Vec<u8>,
    offsets: Vec<usize>,
}

impl ObjectBuffer {
    fn new() -> Self {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            bytes,
            offsets: Vec::new(),
        }
    }

    /// Object ids are assigned in call order starting at 1.
    fn dictionary(&mut self, body: &str) {
        let id = self.begin();
        self.bytes
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, dictionary: &str, data: &[u8]) {
        let id = self.begin();
        self.bytes.extend_from_slice(
            format!(
                "{id} 0 obj\n<< {dictionary} /Length {} >>\nstream\n",
                data.len()
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn begin(&mut self) -> usize {
        self.offsets.push(self.bytes.len());
        self.offsets.len()
    }

    fn finish(mut self, root: usize) -> Vec<u8> {
        let xref_offset = self.bytes.len();
        let count = self.offsets.len() + 1;
        let mut table = format!("xref\n0 {count}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(table, "{offset:010} 00000 n ");
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {count} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF"
        );
        self.bytes.extend_from_slice(table.as_bytes());
        self.bytes
    }
}

/// Serialize a single page of `width` x `height` points showing `images`.
pub fn single_page(width: f32, height: f32, images: &[(JpegImage, Placement)]) -> Vec<u8> {
    // 1 catalog, 2 pages, 3 page, 4 contents, 5.. images
    let first_image = 5;

    let mut content = String::new();
    let mut xobjects = String::new();
    for (index, (_, placement)) in images.iter().enumerate() {
        let name = index + 1;
        let _ = writeln!(
            content,
            "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im{name} Do Q",
            placement.width, placement.height, placement.x, placement.y
        );
        let _ = write!(xobjects, "/Im{name} {} 0 R ", first_image + index);
    }

    let mut pdf = ObjectBuffer::new();
    pdf.dictionary("<< /Type /Catalog /Pages 2 0 R >>");
    pdf.dictionary("<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    pdf.dictionary(&format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width:.2} {height:.2}] \
         /Resources << /XObject << {xobjects}>> >> /Contents 4 0 R >>"
    ));
    pdf.stream("", content.as_bytes());
    for (image, _) in images {
        pdf.stream(
            &format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode",
                image.width, image.height
            ),
            &image.data,
        );
    }
    pdf.finish(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_image(width: u32, height: u32) -> JpegImage {
        JpegImage {
            width,
            height,
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        }
    }

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_header_and_trailer() {
        let pdf = single_page(100.0, 200.0, &[]);
        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.ends_with(b"%%EOF"));
        assert!(as_text(&pdf).contains("/MediaBox [0 0 100.00 200.00]"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let placement = Placement {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
        };
        let pdf = single_page(100.0, 200.0, &[(fake_image(3, 4), placement)]);

        let xref_start = pdf.windows(5).position(|w| w == b"xref\n").unwrap();
        let tail = std::str::from_utf8(&pdf[xref_start..]).unwrap();
        let entries: Vec<usize> = tail
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 5);
        for (index, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", index + 1);
            assert!(pdf[*offset..].starts_with(expected.as_bytes()), "object {}", index + 1);
        }

        let startxref: usize = tail
            .rsplit("startxref\n")
            .next()
            .and_then(|rest| rest.lines().next())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(startxref, xref_start);
    }

    #[test]
    fn test_images_drawn_in_content_stream() {
        let top = Placement {
            x: 28.35,
            y: 500.0,
            width: 200.0,
            height: 100.0,
        };
        let bottom = Placement {
            x: 28.35,
            y: 100.0,
            width: 300.0,
            height: 300.0,
        };
        let pdf = single_page(
            595.28,
            841.89,
            &[(fake_image(2, 1), top), (fake_image(1, 1), bottom)],
        );
        let text = as_text(&pdf);

        assert!(text.contains("q 200.00 0 0 100.00 28.35 500.00 cm /Im1 Do Q"));
        assert!(text.contains("q 300.00 0 0 300.00 28.35 100.00 cm /Im2 Do Q"));
        assert!(text.contains("/Im1 5 0 R /Im2 6 0 R"));
        assert_eq!(text.matches("/Filter /DCTDecode").count(), 2);
        assert!(text.contains("/Width 2 /Height 1"));
    }
}
