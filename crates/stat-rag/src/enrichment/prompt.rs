//! Prompt template for chunk metadata extraction

/// Prompt builder for enrichment requests
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the enrichment prompt: strict JSON with `heading` and `summary`
    pub fn build_enrichment_prompt(excerpt: &str) -> String {
        format!(
            r#"You are a statistical assistant. Analyze the following text chunk from a book.
Extract a concise heading and a 1-sentence summary.

Respond with a JSON object of exactly this shape and nothing else:
{{"heading": "...", "summary": "..."}}

"heading" is the specific section or chapter title this text belongs to.
"summary" is a 1-sentence summary of the statistical concepts discussed.

Text: {excerpt}"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_excerpt() {
        let prompt = PromptBuilder::build_enrichment_prompt("the F distribution");
        assert!(prompt.contains("Text: the F distribution"));
        assert!(prompt.contains(r#"{"heading": "...", "summary": "..."}"#));
    }
}
