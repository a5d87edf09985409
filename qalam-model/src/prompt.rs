//! Language-specific prompt templates and answer extraction.

use std::fmt::Write;

use qalam_rag::Language;

/// The cue that separates the prompt from the model's answer.
pub fn answer_cue(language: Language) -> &'static str {
    match language {
        Language::En => "Answer:",
        Language::Ar => "الجواب:",
    }
}

/// Assemble the generation prompt for a question and its retrieved
/// context.
///
/// The template instructs the model to answer only from the context, in
/// the target language, and to say so when the context lacks the
/// answer. Context passages are rendered as bulleted lines; the prompt
/// ends with the language's answer cue so the completion can be split
/// on it afterwards.
pub fn build_prompt(question: &str, context: &[String], language: Language) -> String {
    let mut context_block = String::new();
    for passage in context {
        let _ = writeln!(context_block, "- {passage}");
    }

    match language {
        Language::Ar => format!(
            "أنت مساعد ذكي. أجب على السؤال التالي باللغة العربية بناءً على السياق المقدم فقط.\n\
             إذا كان السياق لا يحتوي على إجابة، قل \"المعلومات غير متوفرة في السياق\".\n\
             \n\
             السياق:\n\
             {context_block}\n\
             السؤال: {question}\n\
             \n\
             الجواب:"
        ),
        Language::En => format!(
            "You are a helpful assistant. Answer the following question in English based only on the provided context.\n\
             If the context does not contain the answer, say \"The information is not available in the context\".\n\
             \n\
             Context:\n\
             {context_block}\n\
             Question: {question}\n\
             \n\
             Answer:"
        ),
    }
}

/// Extract the answer segment from a completion.
///
/// Takes the text after the LAST occurrence of the language's answer
/// cue, trimmed. The prompt itself ends with the cue, so a completion
/// that only echoes the prompt yields the newly generated tail. When
/// the cue is absent entirely (the backend returned only new tokens, or
/// mangled the prompt), the whole text is returned trimmed rather than
/// guessing.
pub fn extract_answer(generated: &str, language: Language) -> String {
    let cue = answer_cue(language);
    match generated.rfind(cue) {
        Some(pos) => generated[pos + cue.len()..].trim().to_string(),
        None => generated.trim().to_string(),
    }
}
