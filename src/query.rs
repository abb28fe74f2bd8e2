//! Query rewriting and sanitization.
//!
//! The rewriter wraps the user request in a fixed instruction and asks the
//! model for a concise search query; the sanitizer normalizes dash characters
//! the model tends to emit into plain spaces.

use crate::model::{GenerationOptions, ModelError, TextGenerator};

/// Fixed directive prepended to the trimmed user request
const REWRITE_INSTRUCTION: &str =
    "Convert the following user request into a concise search query for Wikipedia:\n";

/// Rewrite a free-form request into a Wikipedia search query.
///
/// May return an empty string when the model produces no usable text;
/// downstream search treats that as "no results" rather than an error.
pub fn rewrite(
    generator: &mut impl TextGenerator,
    request: &str,
) -> Result<String, ModelError> {
    let prompt = format!("{REWRITE_INSTRUCTION}{}", request.trim());
    let generation = generator.generate(&prompt, &GenerationOptions::default())?;
    Ok(generation.into_text())
}

/// Replace every maximal run of hyphen, en-dash, or em-dash characters with a
/// single space and trim outer whitespace. Pure and idempotent.
pub fn sanitize(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut in_dash_run = false;
    for c in query.chars() {
        if matches!(c, '-' | '–' | '—') {
            if !in_dash_run {
                out.push(' ');
                in_dash_run = true;
            }
        } else {
            in_dash_run = false;
            out.push(c);
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Generation;

    /// Generator double that records the prompt and replays a canned result.
    struct FakeGenerator {
        result: Generation,
        last_prompt: Option<String>,
    }

    impl FakeGenerator {
        fn returning(result: Generation) -> Self {
            Self {
                result,
                last_prompt: None,
            }
        }
    }

    impl TextGenerator for FakeGenerator {
        fn generate(
            &mut self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<Generation, ModelError> {
            self.last_prompt = Some(prompt.to_string());
            Ok(self.result.clone())
        }
    }

    #[test]
    fn rewrite_prefixes_instruction_and_trims_request() {
        let mut generator = FakeGenerator::returning(Generation {
            generated_text: Some("Apollo 11 moon landing".to_string()),
            text: None,
        });
        let rewritten = rewrite(&mut generator, "  tell me about the moon landing  ").unwrap();
        assert_eq!(rewritten, "Apollo 11 moon landing");
        assert_eq!(
            generator.last_prompt.unwrap(),
            format!("{REWRITE_INSTRUCTION}tell me about the moon landing")
        );
    }

    #[test]
    fn rewrite_trims_generated_output() {
        let mut generator = FakeGenerator::returning(Generation {
            generated_text: Some("\n Apollo 11 \n".to_string()),
            text: None,
        });
        assert_eq!(rewrite(&mut generator, "x").unwrap(), "Apollo 11");
    }

    #[test]
    fn rewrite_tolerates_empty_generation() {
        let mut generator = FakeGenerator::returning(Generation::default());
        assert_eq!(rewrite(&mut generator, "x").unwrap(), "");
    }

    #[test]
    fn sanitize_collapses_dash_runs_to_one_space() {
        assert_eq!(sanitize("Apollo-11"), "Apollo 11");
        assert_eq!(sanitize("Apollo--11"), "Apollo 11");
        assert_eq!(sanitize("Apollo–—-11"), "Apollo 11");
    }

    #[test]
    fn sanitize_trims_outer_whitespace() {
        assert_eq!(sanitize("  Apollo 11  "), "Apollo 11");
        assert_eq!(sanitize("--Apollo 11--"), "Apollo 11");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = ["Apollo-11", "a -- b – c", "  spaced  ", "—", ""];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn sanitize_leaves_other_characters_alone() {
        assert_eq!(sanitize("Hallo, Welt!"), "Hallo, Welt!");
        assert_eq!(sanitize(""), "");
    }
}
