//! Prompt construction: fills the post template from a persona, an objective,
//! a topic and the selected platform blocks.

use crate::generation::platform::Platform;
use crate::generation::prompts::{BLOCK_SEPARATOR, POST_PROMPT_TEMPLATE};
use crate::llm_client::prompts::STRICT_POST_OUTPUT_RULES;
use crate::models::persona::PersonaInput;

/// Builds the post generation prompt.
///
/// Blocks appear in canonical platform order no matter how `platforms` is ordered,
/// and unselected platforms leave nothing behind. Output is a pure function of the inputs.
pub fn build_prompt(
    persona: &PersonaInput,
    objective: &str,
    topic: &str,
    platforms: &[Platform],
) -> String {
    let platforms = Platform::canonical(platforms);

    let first_marker = platforms
        .first()
        .map(|p| format!("**{}**", p.section_marker()))
        .unwrap_or_default();
    let output_rules = render_template(
        STRICT_POST_OUTPUT_RULES,
        &[("first_marker", first_marker.as_str())],
    );

    let platform_blocks = platforms
        .iter()
        .map(|p| p.block())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);

    render_template(
        POST_PROMPT_TEMPLATE,
        &[
            ("persona_name", persona.name.as_str()),
            ("persona_description", persona.description.as_str()),
            ("tone_of_voice", persona.tone_of_voice.as_str()),
            ("objective", objective),
            ("topic", topic),
            ("output_rules", output_rules.as_str()),
            ("platform_blocks", platform_blocks.as_str()),
        ],
    )
}

/// Replaces `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never scanned again, so user text containing `{topic}`
/// stays literal. Braces that do not name a known key are copied verbatim.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let replacement = after_open.find('}').and_then(|close| {
            let key = &after_open[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona() -> PersonaInput {
        PersonaInput {
            name: "Dental Clinic".to_string(),
            description: "Dental clinic in Fortaleza-CE that wants young, irreverent content."
                .to_string(),
            tone_of_voice: "Inspiring and motivational".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_persona_objective_and_topic() {
        let prompt = build_prompt(
            &persona(),
            "Increase social media engagement",
            "Wearing braces",
            &[Platform::Instagram],
        );
        assert!(prompt.contains("- **Name:** Dental Clinic"));
        assert!(prompt.contains("- **Tone of voice to use:** Inspiring and motivational"));
        assert!(prompt.contains("- **Main goal:** Increase social media engagement"));
        assert!(prompt.contains("- **Subject:** Wearing braces"));
        assert!(!prompt.contains("{persona_name}"));
        assert!(!prompt.contains("{platform_blocks}"));
    }

    #[test]
    fn test_only_selected_blocks_are_included() {
        let prompt = build_prompt(&persona(), "Goal", "Topic", &[Platform::TwitterX]);
        assert!(prompt.contains("[OUTPUT FOR TWITTER/X]"));
        assert!(!prompt.contains("[OUTPUT FOR INSTAGRAM]"));
        assert!(!prompt.contains("[OUTPUT FOR LINKEDIN]"));
        assert!(prompt.contains("(e.g. `**[OUTPUT FOR TWITTER/X]**`)"));
    }

    #[test]
    fn test_block_order_is_canonical_and_deterministic() {
        let a = build_prompt(
            &persona(),
            "Goal",
            "Topic",
            &[Platform::TwitterX, Platform::Instagram, Platform::Linkedin],
        );
        let b = build_prompt(
            &persona(),
            "Goal",
            "Topic",
            &[Platform::Linkedin, Platform::TwitterX, Platform::Instagram, Platform::Linkedin],
        );
        assert_eq!(a, b);

        let instagram = a.find("[OUTPUT FOR INSTAGRAM]").unwrap();
        let linkedin = a.find("[OUTPUT FOR LINKEDIN]").unwrap();
        let twitter = a.find("[OUTPUT FOR TWITTER/X]").unwrap();
        assert!(instagram < linkedin && linkedin < twitter);
        assert_eq!(a.matches("[OUTPUT FOR LINKEDIN]").count(), 1);
    }

    #[test]
    fn test_user_values_are_not_re_expanded() {
        let prompt = build_prompt(&persona(), "Mention {topic} literally", "Braces", &[Platform::Instagram]);
        assert!(prompt.contains("- **Main goal:** Mention {topic} literally"));
    }

    #[test]
    fn test_render_template_keeps_unknown_braces() {
        let rendered = render_template("{a} and {b} and {", &[("a", "x")]);
        assert_eq!(rendered, "x and {b} and {");
    }

    #[test]
    fn test_render_template_handles_multibyte_text() {
        let rendered = render_template("Tema: {tema} ✨", &[("tema", "Cuidados com pets no verão")]);
        assert_eq!(rendered, "Tema: Cuidados com pets no verão ✨");
    }
}
