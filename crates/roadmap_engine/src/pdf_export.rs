use std::path::PathBuf;

use roadmap_core::Roadmap;
use roadmap_logging::roadmap_debug;

use crate::layout::{fit_ratio, wrap_text};
use crate::pdf::{Align, DocumentInfo, PdfDocument, PdfPage, Rgb};
use crate::{
    roadmap_filename, AtomicFileWriter, DateClock, EngineConfig, ExportStrategy, ExportSuccess,
    PageSettings, RasterOptions, RenderedView, StrategyError, StrategyKind,
};

pub const DOCUMENT_CREATOR: &str = "Career Roadmap Generator";
const DOCUMENT_AUTHOR: &str = "Career Roadmap";

const SIDE_MARGIN_MM: f32 = 20.0;
const IMAGE_TOP_MM: f32 = 20.0;

const TITLE_COLOR: Rgb = Rgb(33, 37, 41);
const DESCRIPTION_COLOR: Rgb = Rgb(73, 80, 87);
const DATE_COLOR: Rgb = Rgb(108, 117, 125);
const RULE_COLOR: Rgb = Rgb(222, 226, 230);

const TITLE_SIZE_PT: f32 = 24.0;
const DESCRIPTION_SIZE_PT: f32 = 14.0;
const DATE_SIZE_PT: f32 = 12.0;
const DESCRIPTION_LINE_MM: f32 = 6.0;

/// Builds the document locally: a title page plus a page holding the
/// rasterized view, saved under the output directory.
pub struct ClientPdfStrategy {
    output_dir: PathBuf,
    page: PageSettings,
    generated_on: DateClock,
}

impl ClientPdfStrategy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            page: config.page.clone(),
            generated_on: config.generated_on.clone(),
        }
    }

    fn title_page(&self, roadmap: &Roadmap) -> PdfPage {
        let width = self.page.width_mm;
        let center = width / 2.0;
        let mut page = PdfPage::new();

        page.text(
            &roadmap.title,
            TITLE_SIZE_PT,
            center,
            30.0,
            Align::Center,
            TITLE_COLOR,
        );
        let lines = wrap_text(
            &roadmap.description,
            width - 2.0 * SIDE_MARGIN_MM,
            DESCRIPTION_SIZE_PT,
        );
        for (index, line) in lines.iter().enumerate() {
            page.text(
                line,
                DESCRIPTION_SIZE_PT,
                center,
                45.0 + index as f32 * DESCRIPTION_LINE_MM,
                Align::Center,
                DESCRIPTION_COLOR,
            );
        }
        // Long descriptions push the date and rule down instead of overlapping.
        let overflow = (lines.len().saturating_sub(3)) as f32 * DESCRIPTION_LINE_MM;
        page.text(
            &format!("Generated on {}", (self.generated_on)()),
            DATE_SIZE_PT,
            center,
            65.0 + overflow,
            Align::Center,
            DATE_COLOR,
        );
        page.line(
            (SIDE_MARGIN_MM, 75.0 + overflow),
            (width - SIDE_MARGIN_MM, 75.0 + overflow),
            RULE_COLOR,
        );
        page
    }

    fn build_document(
        &self,
        roadmap: &Roadmap,
        view: &dyn RenderedView,
    ) -> Result<PdfDocument, StrategyError> {
        let mut document = PdfDocument::new(
            self.page.width_mm,
            self.page.height_mm,
            DocumentInfo {
                title: roadmap.title.clone(),
                subject: roadmap.description.clone(),
                creator: DOCUMENT_CREATOR.to_string(),
                author: DOCUMENT_AUTHOR.to_string(),
            },
        );
        document.add_page(self.title_page(roadmap));

        let image = view.rasterize(&RasterOptions::for_export())?;
        let ratio = fit_ratio(
            self.page.width_mm,
            self.page.height_mm,
            self.page.image_margin_mm,
            image.width(),
            image.height(),
        );
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(StrategyError::Layout(format!(
                "cannot fit {}x{} image on page",
                image.width(),
                image.height()
            )));
        }
        let width_mm = image.width() as f32 * ratio;
        let height_mm = image.height() as f32 * ratio;
        let x_mm = (self.page.width_mm - width_mm) / 2.0;
        roadmap_debug!(
            "Placing {}x{} raster at ratio {:.4} ({:.1}mm x {:.1}mm)",
            image.width(),
            image.height(),
            ratio,
            width_mm,
            height_mm
        );

        let mut image_page = PdfPage::new();
        image_page.image(image, x_mm, IMAGE_TOP_MM, width_mm, height_mm);
        document.add_page(image_page);
        Ok(document)
    }
}

#[async_trait::async_trait]
impl ExportStrategy for ClientPdfStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Client
    }

    async fn attempt(
        &self,
        roadmap: &Roadmap,
        view: &dyn RenderedView,
    ) -> Result<ExportSuccess, StrategyError> {
        let document = self.build_document(roadmap, view)?;
        let bytes = document.to_bytes();
        let writer = AtomicFileWriter::new(self.output_dir.clone());
        let path = writer.write(&roadmap_filename(&roadmap.title), &bytes)?;
        Ok(ExportSuccess::Saved { path })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roadmap_core::Step;

    use super::*;
    use crate::{RasterImage, RenderError};

    struct SolidView;

    impl RenderedView for SolidView {
        fn rasterize(&self, options: &RasterOptions) -> Result<RasterImage, RenderError> {
            assert_eq!(options.scale, 2.0);
            RasterImage::filled(40, 30, [255, 255, 255])
        }
    }

    fn strategy() -> ClientPdfStrategy {
        let mut config = EngineConfig::default_with_output(PathBuf::from("unused"));
        config.generated_on = Arc::new(|| "2024-05-01".to_string());
        ClientPdfStrategy::new(&config)
    }

    fn roadmap(description: &str) -> Roadmap {
        Roadmap {
            title: "Data Scientist".to_string(),
            description: description.to_string(),
            steps: vec![Step {
                number: 1,
                title: "Python".to_string(),
                description: "Basics".to_string(),
                skills: vec!["Python".to_string()],
                timeframe: "1 month".to_string(),
            }],
        }
    }

    #[test]
    fn short_description_keeps_fixed_positions() {
        let page = strategy().title_page(&roadmap("A path into data science"));

        assert_eq!(page.text_baseline("Data Scientist"), Some(30.0));
        assert_eq!(page.text_baseline("A path"), Some(45.0));
        assert_eq!(page.text_baseline("Generated on 2024-05-01"), Some(65.0));
        assert_eq!(page.rule_y(), Some(75.0));
    }

    #[test]
    fn long_description_pushes_date_and_rule_down() {
        let description = "Learn statistics, programming and machine learning. ".repeat(8);
        let lines = wrap_text(
            &description,
            PageSettings::default().width_mm - 2.0 * SIDE_MARGIN_MM,
            DESCRIPTION_SIZE_PT,
        );
        assert!(lines.len() >= 4, "only {} lines", lines.len());
        let overflow = (lines.len() - 3) as f32 * DESCRIPTION_LINE_MM;

        let page = strategy().title_page(&roadmap(&description));

        let date_y = page.text_baseline("Generated on").unwrap();
        let rule_y = page.rule_y().unwrap();
        assert!(date_y > 65.0);
        assert_eq!(date_y, 65.0 + overflow);
        assert_eq!(rule_y, 75.0 + overflow);
        let last_line_y = 45.0 + (lines.len() - 1) as f32 * DESCRIPTION_LINE_MM;
        assert!(last_line_y < date_y);
    }

    #[test]
    fn document_has_title_and_image_pages() {
        let document = strategy()
            .build_document(&roadmap("A path"), &SolidView)
            .unwrap();
        assert_eq!(document.page_count(), 2);
    }
}
