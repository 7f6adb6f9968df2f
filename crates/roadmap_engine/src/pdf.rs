//! Minimal PDF 1.4 writer: Helvetica text, rules and RGB images.
//!
//! Coordinates given to [`PdfPage`] are millimetres measured from the top-left
//! corner of the page; they are converted to PDF user space on output.
//!
//! Image streams are written uncompressed, so each image adds
//! `width * height * 3` bytes to the file. The 2x raster of a ten-step card
//! grid (about 1920x1830 pixels) therefore yields a document of roughly 10 MB.

use std::fmt::Write as _;

use crate::layout::{text_width_mm, PT_PER_MM};
use crate::RasterImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
enum PageOp {
    Text {
        text: String,
        size_pt: f32,
        x_mm: f32,
        y_mm: f32,
        align: Align,
        color: Rgb,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
    },
    Image {
        image: RasterImage,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    ops: Vec<PageOp>,
}

impl PdfPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `text` with its baseline at `y_mm`. With `Align::Center`, `x_mm`
    /// is the horizontal centre of the text.
    pub fn text(
        &mut self,
        text: &str,
        size_pt: f32,
        x_mm: f32,
        y_mm: f32,
        align: Align,
        color: Rgb,
    ) -> &mut Self {
        self.ops.push(PageOp::Text {
            text: text.to_string(),
            size_pt,
            x_mm,
            y_mm,
            align,
            color,
        });
        self
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb) -> &mut Self {
        self.ops.push(PageOp::Line { from, to, color });
        self
    }

    /// Draws `image` with its top-left corner at (`x_mm`, `y_mm`).
    pub fn image(
        &mut self,
        image: RasterImage,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    ) -> &mut Self {
        self.ops.push(PageOp::Image {
            image,
            x_mm,
            y_mm,
            width_mm,
            height_mm,
        });
        self
    }

    /// Baseline of the first text starting with `prefix`.
    #[cfg(test)]
    pub(crate) fn text_baseline(&self, prefix: &str) -> Option<f32> {
        self.ops.iter().find_map(|op| match op {
            PageOp::Text { text, y_mm, .. } if text.starts_with(prefix) => Some(*y_mm),
            _ => None,
        })
    }

    #[cfg(test)]
    pub(crate) fn rule_y(&self) -> Option<f32> {
        self.ops.iter().find_map(|op| match op {
            PageOp::Line { from, .. } => Some(from.1),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub creator: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    width_mm: f32,
    height_mm: f32,
    info: DocumentInfo,
    pages: Vec<PdfPage>,
}

impl PdfDocument {
    pub fn new(width_mm: f32, height_mm: f32, info: DocumentInfo) -> Self {
        Self {
            width_mm,
            height_mm,
            info,
            pages: Vec::new(),
        }
    }

    pub fn add_page(&mut self, page: PdfPage) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ObjectWriter::new();

        // Fixed object numbers: 1 catalog, 2 page tree, 3 font, 4 info.
        let mut next_id = 5;
        let mut page_ids = Vec::with_capacity(self.pages.len());
        let mut bodies = Vec::new();
        for page in &self.pages {
            let page_id = next_id;
            let content_id = next_id + 1;
            next_id += 2;
            let mut images = Vec::new();
            for op in &page.ops {
                if let PageOp::Image { image, .. } = op {
                    images.push((next_id, image));
                    next_id += 1;
                }
            }
            page_ids.push(page_id);
            bodies.push((page_id, content_id, page, images));
        }

        writer.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        writer.object(
            2,
            format!(
                "<< /Type /Pages /Kids [{kids}] /Count {} /MediaBox [0 0 {} {}] >>",
                page_ids.len(),
                fmt_num(self.width_mm * PT_PER_MM),
                fmt_num(self.height_mm * PT_PER_MM)
            )
            .as_bytes(),
        );
        writer.object(
            3,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        );
        writer.object(
            4,
            format!(
                "<< /Title {} /Subject {} /Creator {} /Author {} /Producer {} >>",
                pdf_string(&self.info.title),
                pdf_string(&self.info.subject),
                pdf_string(&self.info.creator),
                pdf_string(&self.info.author),
                pdf_string(crate::DOCUMENT_CREATOR),
            )
            .as_bytes(),
        );

        for (page_id, content_id, page, images) in bodies {
            let xobjects = images
                .iter()
                .enumerate()
                .map(|(index, (id, _))| format!("/Im{index} {id} 0 R"))
                .collect::<Vec<_>>()
                .join(" ");
            writer.object(
                page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 3 0 R >> /XObject << {xobjects} >> >> /Contents {content_id} 0 R >>"
                )
                .as_bytes(),
            );
            let content = self.content_stream(page);
            writer.stream(content_id, "", content.as_bytes());
            for (id, image) in images {
                let dict = format!(
                    "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 ",
                    image.width(),
                    image.height()
                );
                writer.stream(id, &dict, image.rgb());
            }
        }

        writer.finish(next_id)
    }

    fn content_stream(&self, page: &PdfPage) -> String {
        let mut out = String::new();
        let mut image_index = 0;
        for op in &page.ops {
            match op {
                PageOp::Text {
                    text,
                    size_pt,
                    x_mm,
                    y_mm,
                    align,
                    color,
                } => {
                    let left_mm = match align {
                        Align::Left => *x_mm,
                        Align::Center => x_mm - text_width_mm(text, *size_pt) / 2.0,
                    };
                    let _ = writeln!(
                        out,
                        "BT {} rg /F1 {} Tf {} {} Td {} Tj ET",
                        fmt_color(*color),
                        fmt_num(*size_pt),
                        fmt_num(left_mm * PT_PER_MM),
                        fmt_num(self.y_pt(*y_mm)),
                        pdf_string(text)
                    );
                }
                PageOp::Line { from, to, color } => {
                    let _ = writeln!(
                        out,
                        "{} RG 0.5 w {} {} m {} {} l S",
                        fmt_color(*color),
                        fmt_num(from.0 * PT_PER_MM),
                        fmt_num(self.y_pt(from.1)),
                        fmt_num(to.0 * PT_PER_MM),
                        fmt_num(self.y_pt(to.1))
                    );
                }
                PageOp::Image {
                    x_mm,
                    y_mm,
                    width_mm,
                    height_mm,
                    ..
                } => {
                    let _ = writeln!(
                        out,
                        "q {} 0 0 {} {} {} cm /Im{} Do Q",
                        fmt_num(width_mm * PT_PER_MM),
                        fmt_num(height_mm * PT_PER_MM),
                        fmt_num(x_mm * PT_PER_MM),
                        fmt_num(self.y_pt(y_mm + height_mm)),
                        image_index
                    );
                    image_index += 1;
                }
            }
        }
        out
    }

    /// Converts a top-down millimetre offset into bottom-up PDF points.
    fn y_pt(&self, y_mm: f32) -> f32 {
        (self.height_mm - y_mm) * PT_PER_MM
    }
}

struct ObjectWriter {
    buffer: Vec<u8>,
    offsets: Vec<(u32, usize)>,
}

impl ObjectWriter {
    fn new() -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buffer,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: u32, body: &[u8]) {
        self.offsets.push((id, self.buffer.len()));
        self.buffer
            .extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        self.buffer.extend_from_slice(body);
        self.buffer.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: u32, dict_entries: &str, data: &[u8]) {
        self.offsets.push((id, self.buffer.len()));
        self.buffer.extend_from_slice(
            format!("{id} 0 obj\n<< {dict_entries}/Length {} >>\nstream\n", data.len()).as_bytes(),
        );
        self.buffer.extend_from_slice(data);
        self.buffer.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, size: u32) -> Vec<u8> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let xref_offset = self.buffer.len();
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = write!(xref, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root 1 0 R /Info 4 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buffer.extend_from_slice(xref.as_bytes());
        self.buffer
    }
}

/// Encodes a literal string. Characters outside Latin-1 become `?`.
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push(' '),
            c if (c as u32) < 0x80 => out.push(c),
            c if (c as u32) <= 0xFF => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

fn fmt_num(value: f32) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn fmt_color(Rgb(r, g, b): Rgb) -> String {
    format!(
        "{} {} {}",
        fmt_num(r as f32 / 255.0),
        fmt_num(g as f32 / 255.0),
        fmt_num(b as f32 / 255.0)
    )
}
