//! The ingestion pipeline: OCR, then summarization and health analysis.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use medivault_ai::{DocumentAnalyzer, OcrEngine};
use medivault_core::error::AppError;
use medivault_core::result::AppResult;
use medivault_entity::analysis::IngestionReport;
use medivault_storage::mime_from_path;

/// Extracted text used for PDFs, which are not run through OCR.
pub const PDF_PLACEHOLDER: &str = "PDF document uploaded - text extraction not available";

/// What the pipeline does with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Any `image/*` type; goes through OCR.
    Image,
    /// `application/pdf`; gets the placeholder text.
    Pdf,
}

impl MediaKind {
    /// Classify a media type, falling back to the file name's extension when
    /// the type is missing or generic.
    pub fn detect(media_type: Option<&str>, file_name: &str) -> AppResult<Self> {
        let declared = media_type
            .map(|m| m.split(';').next().unwrap_or(m).trim().to_lowercase())
            .filter(|m| !m.is_empty() && m != "application/octet-stream");
        let media_type = declared
            .or_else(|| mime_from_path(file_name).map(str::to_string))
            .unwrap_or_default();

        if media_type.starts_with("image/") {
            Ok(Self::Image)
        } else if media_type == "application/pdf" {
            Ok(Self::Pdf)
        } else {
            Err(AppError::validation(format!(
                "Unsupported file type '{media_type}'. Upload an image or a PDF."
            )))
        }
    }
}

/// Runs uploaded files through OCR and the analyzer.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    ocr: Arc<dyn OcrEngine>,
    analyzer: Arc<dyn DocumentAnalyzer>,
    min_text_length: usize,
}

impl IngestionPipeline {
    /// Creates a new pipeline.
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        analyzer: Arc<dyn DocumentAnalyzer>,
        min_text_length: usize,
    ) -> Self {
        Self {
            ocr,
            analyzer,
            min_text_length: min_text_length.max(1),
        }
    }

    /// Ingest one file.
    ///
    /// OCR failures abort; analyzer failures only blank their fields.
    pub async fn run(
        &self,
        file_name: &str,
        media_type: Option<&str>,
        data: Bytes,
        progress: &watch::Sender<f32>,
    ) -> AppResult<IngestionReport> {
        let kind = MediaKind::detect(media_type, file_name)?;

        let extracted = match kind {
            MediaKind::Image => self.ocr.recognize(data, progress).await?,
            MediaKind::Pdf => {
                progress.send_replace(1.0);
                PDF_PLACEHOLDER.to_string()
            }
        };

        let text = extracted.trim();
        let char_count = text.chars().count();
        if char_count < self.min_text_length {
            info!(file_name, "No text extracted, skipping analysis");
            return Ok(IngestionReport::NothingExtracted);
        }

        let (analysis, findings) = tokio::join!(
            self.analyzer.summarize_and_tag(text),
            self.analyzer.analyze_health_report(text),
        );

        let (summary, suggested_tags) = match analysis {
            Ok(a) => (Some(a.summary), Some(a.suggested_tags)),
            Err(e) => {
                warn!(file_name, error = %e, "Summarization failed");
                (None, None)
            }
        };
        let health_findings = match findings {
            Ok(f) => Some(f),
            Err(e) => {
                warn!(file_name, error = %e, "Health analysis failed");
                None
            }
        };

        debug!(
            file_name,
            chars = char_count,
            summarized = summary.is_some(),
            analyzed = health_findings.is_some(),
            "Ingestion finished"
        );

        Ok(IngestionReport::Analyzed {
            extracted_text: text.to_string(),
            summary,
            suggested_tags,
            health_findings,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use medivault_core::error::ErrorKind;
    use medivault_entity::analysis::{DocumentAnalysis, HealthFinding};

    use super::*;

    #[derive(Debug)]
    struct FakeOcr(Result<&'static str, ()>);

    #[async_trait]
    impl OcrEngine for FakeOcr {
        async fn recognize(&self, _image: Bytes, progress: &watch::Sender<f32>) -> AppResult<String> {
            progress.send_replace(0.5);
            progress.send_replace(1.0);
            self.0
                .map(str::to_string)
                .map_err(|_| AppError::external_service("vision model unavailable"))
        }
    }

    #[derive(Debug, Default)]
    struct FakeAnalyzer {
        fail_summary: bool,
        fail_findings: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentAnalyzer for FakeAnalyzer {
        async fn summarize_and_tag(&self, _text: &str) -> AppResult<DocumentAnalysis> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_summary {
                return Err(AppError::external_service("model error"));
            }
            Ok(DocumentAnalysis {
                summary: "Blood test, all normal.".into(),
                suggested_tags: vec!["Lab Report".into()],
            })
        }

        async fn analyze_health_report(&self, _text: &str) -> AppResult<Vec<HealthFinding>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_findings {
                return Err(AppError::external_service("model error"));
            }
            Ok(vec![HealthFinding {
                term: "Hemoglobin: 8 g/dL".into(),
                observation: "This value is often noted as being below the typical range.".into(),
            }])
        }
    }

    fn pipeline(ocr: FakeOcr, analyzer: Arc<FakeAnalyzer>) -> IngestionPipeline {
        IngestionPipeline::new(Arc::new(ocr), analyzer, 1)
    }

    fn image() -> Bytes {
        Bytes::from_static(b"\x89PNG")
    }

    #[tokio::test]
    async fn test_image_full_analysis() {
        let analyzer = Arc::new(FakeAnalyzer::default());
        let p = pipeline(FakeOcr(Ok("  Hemoglobin: 8 g/dL  ")), analyzer.clone());
        let (tx, rx) = watch::channel(0.0);

        let report = p.run("scan.png", Some("image/png"), image(), &tx).await.unwrap();
        let IngestionReport::Analyzed {
            extracted_text,
            summary,
            suggested_tags,
            health_findings,
        } = report
        else {
            panic!("expected analysis");
        };
        assert_eq!(extracted_text, "Hemoglobin: 8 g/dL");
        assert_eq!(summary.as_deref(), Some("Blood test, all normal."));
        assert_eq!(suggested_tags.unwrap(), vec!["Lab Report"]);
        assert_eq!(
            health_findings.unwrap()[0].observation,
            "This value is often noted as being below the typical range."
        );
        assert_eq!(*rx.borrow(), 1.0);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_pdf_uses_placeholder() {
        let analyzer = Arc::new(FakeAnalyzer::default());
        let p = pipeline(FakeOcr(Err(())), analyzer);
        let (tx, rx) = watch::channel(0.0);

        let report = p
            .run("report.pdf", Some("application/pdf"), Bytes::new(), &tx)
            .await
            .unwrap();
        let IngestionReport::Analyzed { extracted_text, .. } = report else {
            panic!("expected analysis");
        };
        assert_eq!(extracted_text, PDF_PLACEHOLDER);
        assert_eq!(*rx.borrow(), 1.0);
    }

    #[tokio::test]
    async fn test_empty_ocr_skips_analysis() {
        let analyzer = Arc::new(FakeAnalyzer::default());
        let p = pipeline(FakeOcr(Ok("   \n ")), analyzer.clone());
        let (tx, _rx) = watch::channel(0.0);

        let report = p.run("blank.jpg", Some("image/jpeg"), image(), &tx).await.unwrap();
        assert!(matches!(report, IngestionReport::NothingExtracted));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_min_length_counts_characters_not_bytes() {
        // Four characters, eight bytes.
        let text = "\u{3b1}\u{3b2}\u{3b3}\u{3b4}";
        let (tx, _rx) = watch::channel(0.0);

        let short = IngestionPipeline::new(
            Arc::new(FakeOcr(Ok(text))),
            Arc::new(FakeAnalyzer::default()),
            5,
        );
        let report = short.run("greek.png", Some("image/png"), image(), &tx).await.unwrap();
        assert!(matches!(report, IngestionReport::NothingExtracted));

        let exact = IngestionPipeline::new(
            Arc::new(FakeOcr(Ok(text))),
            Arc::new(FakeAnalyzer::default()),
            4,
        );
        let report = exact.run("greek.png", Some("image/png"), image(), &tx).await.unwrap();
        assert!(matches!(report, IngestionReport::Analyzed { .. }));
    }

    #[tokio::test]
    async fn test_partial_results_when_one_call_fails() {
        let analyzer = Arc::new(FakeAnalyzer {
            fail_summary: true,
            ..Default::default()
        });
        let p = pipeline(FakeOcr(Ok("Cholesterol 240")), analyzer);
        let (tx, _rx) = watch::channel(0.0);

        let IngestionReport::Analyzed {
            summary,
            suggested_tags,
            health_findings,
            ..
        } = p.run("lab.png", Some("image/png"), image(), &tx).await.unwrap()
        else {
            panic!("expected analysis");
        };
        assert!(summary.is_none());
        assert!(suggested_tags.is_none());
        assert_eq!(health_findings.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_both_calls_failing_is_still_success() {
        let analyzer = Arc::new(FakeAnalyzer {
            fail_summary: true,
            fail_findings: true,
            ..Default::default()
        });
        let p = pipeline(FakeOcr(Ok("some text")), analyzer);
        let (tx, _rx) = watch::channel(0.0);

        let report = p.run("lab.png", Some("image/png"), image(), &tx).await.unwrap();
        assert!(matches!(
            report,
            IngestionReport::Analyzed {
                summary: None,
                health_findings: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_ocr_failure_aborts() {
        let p = pipeline(FakeOcr(Err(())), Arc::new(FakeAnalyzer::default()));
        let (tx, _rx) = watch::channel(0.0);

        let err = p.run("x.png", Some("image/png"), image(), &tx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }

    #[tokio::test]
    async fn test_unsupported_type_is_validation_error() {
        let p = pipeline(FakeOcr(Ok("x")), Arc::new(FakeAnalyzer::default()));
        let (tx, _rx) = watch::channel(0.0);

        let err = p
            .run("notes.docx", Some("application/msword"), Bytes::new(), &tx)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(MediaKind::detect(None, "scan.JPG").unwrap(), MediaKind::Image);
        assert_eq!(
            MediaKind::detect(Some("application/octet-stream"), "r.pdf").unwrap(),
            MediaKind::Pdf
        );
        assert_eq!(
            MediaKind::detect(Some("image/png; charset=binary"), "x").unwrap(),
            MediaKind::Image
        );
        assert!(MediaKind::detect(None, "README").is_err());
    }
}
