//! Prompt text sent to the models.

use std::fmt::Write;

use medivault_entity::document::MedicalDocument;

/// Instruction for the vision model doing OCR.
pub fn ocr_prompt(language: &str) -> String {
    format!(
        "Extract all text from this image exactly as written. The text is in language '{language}'. \
         Return only the extracted text, nothing else."
    )
}

/// Summary and tag suggestion for a medical document.
pub fn summarize_and_tag(document_text: &str) -> String {
    format!(
        "You are an AI assistant specialized in analyzing medical documents.\n\
         Based on the content of the document text provided, do two things:\n\
         1. Write a concise summary of the key information, such as doctor remarks, test results, or diagnosis.\n\
         2. Suggest a list of relevant tags that would help categorize the document.\n\
         Respond with JSON of the form {{\"summary\": string, \"suggestedTags\": [string]}}.\n\n\
         Document Text: {document_text}"
    )
}

/// Extraction of key medical terms with neutral observations.
pub fn analyze_health_report(document_text: &str) -> String {
    format!(
        "You are an expert AI medical data analyst. Scan the medical document below and identify key \
         medical terms, test results, and values.\n\
         For each significant finding, provide the term and a brief, neutral observation.\n\
         You must not give medical advice, diagnoses, or treatment recommendations. Observations are \
         purely informational and encourage consulting a real doctor.\n\
         Good observation: \"This value is outside the typical reference range for an adult male.\"\n\
         Bad observation: \"You have anemia, you should take iron supplements.\"\n\
         Respond with JSON of the form {{\"findings\": [{{\"term\": string, \"observation\": string}}]}}.\n\n\
         Document Text: {document_text}"
    )
}

/// System instructions for the document assistant.
pub const ASSISTANT_SYSTEM: &str = "You are a helpful AI assistant for the MediVault app. \
Answer questions using only the user's medical documents listed in the prompt. \
If none of the documents are relevant, say that no matching documents were found. \
Keep answers concise and directly related to the information in the documents. \
Do not provide medical advice.";

/// User prompt grounding the question in the matching documents.
pub fn assistant_prompt(query: &str, documents: &[MedicalDocument]) -> String {
    let mut prompt = String::new();
    if documents.is_empty() {
        prompt.push_str("No documents matched the question.\n");
    } else {
        prompt.push_str("Relevant documents:\n");
        for doc in documents {
            let _ = writeln!(prompt, "- File: {}", doc.file_name);
            if let Some(summary) = &doc.summary {
                let _ = writeln!(prompt, "  Summary: {summary}");
            }
            if let Some(content) = &doc.file_content {
                let _ = writeln!(prompt, "  Content: {content}");
            }
        }
    }
    let _ = write!(prompt, "\nQuestion: {query}");
    prompt
}
