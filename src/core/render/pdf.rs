//! PDF format strategy

use crate::core::render::{RenderStrategy, ReportMetadata};
use crate::domain::errors::RenderError;
use crate::domain::row::RowRecord;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Rect, Rgb,
};
use std::io::BufWriter;

// Letter page, dimensions in mm
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 19.0;
const FOOTER_CLEARANCE: f32 = 22.0;

const HEADER_ROW_HEIGHT: f32 = 8.0;
const ROW_HEIGHT: f32 = 6.5;

// Approximate glyph advance for 8pt Helvetica, used for cell truncation
const CELL_CHAR_WIDTH: f32 = 1.7;

const COLOR_PRIMARY: (u8, u8, u8) = (37, 99, 235);
const COLOR_ROW_SHADE: (u8, u8, u8) = (243, 244, 246);
const COLOR_RULE: (u8, u8, u8) = (209, 213, 219);
const COLOR_TEXT: (u8, u8, u8) = (55, 65, 81);
const COLOR_TEXT_MUTED: (u8, u8, u8) = (107, 114, 128);
const COLOR_TITLE: (u8, u8, u8) = (17, 24, 39);
const COLOR_WHITE: (u8, u8, u8) = (255, 255, 255);

/// Renders reports as a paginated PDF table
///
/// Layout: clinic header, title and metadata block on the first page, a
/// repeated column header row on every page, alternating row shading, and a
/// footer with the generation timestamp and `Page N of M` numbering.
#[derive(Debug, Clone)]
pub struct PdfStrategy {
    clinic_name: String,
    footer_text: String,
}

impl PdfStrategy {
    /// Strategy with deployment branding for the page header and footer
    pub fn new(clinic_name: impl Into<String>, footer_text: impl Into<String>) -> Self {
        Self {
            clinic_name: clinic_name.into(),
            footer_text: footer_text.into(),
        }
    }
}

impl Default for PdfStrategy {
    fn default() -> Self {
        Self::new(
            "Healthcare Patient Management",
            "Healthcare Patient Management System",
        )
    }
}

impl RenderStrategy for PdfStrategy {
    fn generate(
        &self,
        rows: &[RowRecord],
        metadata: &ReportMetadata,
    ) -> Result<Vec<u8>, RenderError> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&metadata.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Layout(format!("PDF font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Layout(format!("PDF font error: {e}")))?;

        // Split rows into page-sized chunks up front so every footer can
        // carry the total page count.
        let first_capacity = table_capacity(first_table_y(metadata));
        let rest_capacity = table_capacity(PAGE_HEIGHT - MARGIN);
        let chunks = paginate(rows, first_capacity, rest_capacity);
        let total_pages = chunks.len();

        let columns = column_layout(metadata.columns.len());

        for (page_index, chunk) in chunks.iter().enumerate() {
            let layer = if page_index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            let table_top = if page_index == 0 {
                self.draw_report_header(&layer, &font, &bold, metadata, rows.len())
            } else {
                PAGE_HEIGHT - MARGIN
            };

            self.draw_table(&layer, &font, &bold, metadata, &columns, chunk, table_top);
            self.draw_footer(&layer, &font, metadata, page_index + 1, total_pages);
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| RenderError::Layout(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| RenderError::Encoding(format!("PDF buffer error: {e}")))
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}

impl PdfStrategy {
    /// Draws the first-page header block, returning the y where the table starts
    fn draw_report_header(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        bold: &IndirectFontRef,
        metadata: &ReportMetadata,
        record_count: usize,
    ) -> f32 {
        let mut y = PAGE_HEIGHT - MARGIN;

        text(layer, font, &sanitize(&self.clinic_name), MARGIN, y, 10.0, COLOR_TEXT_MUTED);
        y -= 4.0;
        rule(layer, MARGIN, y, PAGE_WIDTH - MARGIN, y, COLOR_RULE, 0.7);
        y -= 10.0;

        text(layer, bold, &sanitize(&metadata.title), MARGIN, y, 20.0, COLOR_TITLE);
        y -= 8.0;
        text(
            layer,
            font,
            &format!("{} Report", sanitize(&metadata.report_type)),
            MARGIN,
            y,
            12.0,
            COLOR_TEXT_MUTED,
        );
        y -= 9.0;

        text(
            layer,
            font,
            &format!(
                "Generated: {}",
                metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            MARGIN,
            y,
            9.0,
            COLOR_TEXT,
        );
        y -= 5.0;
        text(
            layer,
            font,
            &format!("Total Records: {record_count}"),
            MARGIN,
            y,
            9.0,
            COLOR_TEXT,
        );
        y -= 5.0;
        if !metadata.description.is_empty() {
            text(
                layer,
                font,
                &format!("Description: {}", sanitize(&metadata.description)),
                MARGIN,
                y,
                9.0,
                COLOR_TEXT,
            );
            y -= 5.0;
        }
        text(
            layer,
            font,
            &format!("Filters: {}", sanitize(&metadata.filters.summary())),
            MARGIN,
            y,
            9.0,
            COLOR_TEXT,
        );
        y -= 9.0;

        y
    }

    /// Draws the column header row plus data rows from `table_top` downwards
    fn draw_table(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        bold: &IndirectFontRef,
        metadata: &ReportMetadata,
        columns: &[f32],
        rows: &[RowRecord],
        table_top: f32,
    ) {
        let mut y = table_top;

        // Header band
        fill_rect(layer, MARGIN, y - HEADER_ROW_HEIGHT, PAGE_WIDTH - MARGIN, y, COLOR_PRIMARY);
        for (i, column) in metadata.columns.iter().enumerate() {
            let label = truncate_cell(&ReportMetadata::header_label(column), columns_width(columns));
            text(layer, bold, &label, columns[i] + 1.5, y - 5.5, 8.0, COLOR_WHITE);
        }
        y -= HEADER_ROW_HEIGHT;

        if rows.is_empty() {
            y -= ROW_HEIGHT;
            text(
                layer,
                font,
                "No data available for the selected criteria.",
                MARGIN + 2.0,
                y + 1.5,
                9.0,
                COLOR_TEXT_MUTED,
            );
            return;
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row_index % 2 == 1 {
                fill_rect(layer, MARGIN, y - ROW_HEIGHT, PAGE_WIDTH - MARGIN, y, COLOR_ROW_SHADE);
            }
            for (i, column) in metadata.columns.iter().enumerate() {
                let value = truncate_cell(
                    &sanitize(row.get(column).unwrap_or("")),
                    columns_width(columns),
                );
                text(layer, font, &value, columns[i] + 1.5, y - 4.7, 8.0, COLOR_TEXT);
            }
            y -= ROW_HEIGHT;
        }

        rule(layer, MARGIN, y, PAGE_WIDTH - MARGIN, y, COLOR_RULE, 0.5);
    }

    /// Draws the per-page footer: rule, branding, timestamp and page numbers
    fn draw_footer(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        metadata: &ReportMetadata,
        page: usize,
        total_pages: usize,
    ) {
        let y = 15.0;
        rule(layer, MARGIN, y, PAGE_WIDTH - MARGIN, y, COLOR_RULE, 0.5);
        text(layer, font, &sanitize(&self.footer_text), MARGIN, y - 5.0, 8.0, COLOR_TEXT_MUTED);

        let page_label = format!("Page {page} of {total_pages}");
        // Right-aligned by approximate glyph advance
        let label_width = page_label.len() as f32 * 1.5;
        text(
            layer,
            font,
            &page_label,
            PAGE_WIDTH - MARGIN - label_width,
            y - 5.0,
            8.0,
            COLOR_TEXT_MUTED,
        );

        let generated = format!(
            "Generated {}",
            metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        let generated_width = generated.len() as f32 * 1.5;
        text(
            layer,
            font,
            &generated,
            (PAGE_WIDTH - generated_width) / 2.0,
            y - 5.0,
            8.0,
            COLOR_TEXT_MUTED,
        );
    }
}

/// y position where the table starts on the first page
fn first_table_y(metadata: &ReportMetadata) -> f32 {
    // Mirrors draw_report_header's cursor arithmetic
    let mut y = PAGE_HEIGHT - MARGIN;
    y -= 4.0 + 10.0; // clinic line + rule gap
    y -= 8.0 + 9.0; // title + subtitle
    y -= 5.0 + 5.0; // generated + record count
    if !metadata.description.is_empty() {
        y -= 5.0;
    }
    y -= 9.0; // filters + gap
    y
}

/// Number of data rows that fit in a table starting at `table_top`
fn table_capacity(table_top: f32) -> usize {
    let usable = table_top - FOOTER_CLEARANCE - HEADER_ROW_HEIGHT;
    ((usable / ROW_HEIGHT).floor() as usize).max(1)
}

/// Splits rows into per-page chunks; always yields at least one page
fn paginate(rows: &[RowRecord], first_capacity: usize, rest_capacity: usize) -> Vec<&[RowRecord]> {
    let mut chunks: Vec<&[RowRecord]> = Vec::new();
    let first_end = rows.len().min(first_capacity);
    chunks.push(&rows[..first_end]);

    let mut offset = first_end;
    while offset < rows.len() {
        let end = rows.len().min(offset + rest_capacity);
        chunks.push(&rows[offset..end]);
        offset = end;
    }
    chunks
}

/// Left x position of each column, evenly distributed across the page
fn column_layout(count: usize) -> Vec<f32> {
    let count = count.max(1);
    let available = PAGE_WIDTH - 2.0 * MARGIN;
    let width = available / count as f32;
    (0..count).map(|i| MARGIN + i as f32 * width).collect()
}

fn columns_width(columns: &[f32]) -> f32 {
    let available = PAGE_WIDTH - 2.0 * MARGIN;
    available / columns.len().max(1) as f32
}

/// Truncates a cell value to fit the column width
fn truncate_cell(value: &str, column_width: f32) -> String {
    let max_chars = ((column_width - 3.0) / CELL_CHAR_WIDTH).floor().max(4.0) as usize;
    if value.len() <= max_chars {
        return value.to_string();
    }
    format!("{}...", &value[..max_chars.saturating_sub(3)])
}

/// Builtin fonts carry WinAnsi encoding only; anything else becomes `?`
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c
            } else {
                '?'
            }
        })
        .collect()
}

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    value: &str,
    x: f32,
    y: f32,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb(color));
    layer.use_text(value, size, Mm(x), Mm(y), font);
}

fn rule(
    layer: &PdfLayerReference,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: (u8, u8, u8),
    width: f32,
) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(width);
    let line = Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn fill_rect(
    layer: &PdfLayerReference,
    llx: f32,
    lly: f32,
    urx: f32,
    ury: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb(color));
    let rect = Rect::new(Mm(llx), Mm(lly), Mm(urx), Mm(ury)).with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}
