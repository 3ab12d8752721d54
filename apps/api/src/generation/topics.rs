//! Topic brainstorming: asks the model for post ideas that suit a persona and
//! reads the numbered list it returns.

use crate::generation::prompt_builder::render_template;
use crate::generation::prompts::TOPIC_PROMPT_TEMPLATE;
use crate::llm_client::prompts::STRICT_LIST_OUTPUT_RULES;
use crate::models::persona::PersonaInput;

/// Number of ideas requested per brainstorm.
pub const TOPIC_COUNT: usize = 5;

pub fn build_topic_prompt(persona: &PersonaInput) -> String {
    let topic_count = TOPIC_COUNT.to_string();
    render_template(
        TOPIC_PROMPT_TEMPLATE,
        &[
            ("persona_name", persona.name.as_str()),
            ("persona_description", persona.description.as_str()),
            ("topic_count", topic_count.as_str()),
            ("output_rules", STRICT_LIST_OUTPUT_RULES),
        ],
    )
}

/// Extracts list items from the model's answer.
///
/// Numbered lines (`1.`, `2)`) win; if there are none, `-`/`*` bullets are used.
/// Bold markers are stripped and duplicates dropped.
pub fn parse_topic_list(raw: &str) -> Vec<String> {
    let numbered: Vec<&str> = raw.lines().filter_map(strip_number).collect();
    let items = if numbered.is_empty() {
        raw.lines().filter_map(strip_bullet).collect()
    } else {
        numbered
    };

    let mut topics: Vec<String> = Vec::new();
    for item in items {
        let topic = item.replace("**", "").trim().to_string();
        if !topic.is_empty() && !topics.contains(&topic) {
            topics.push(topic);
        }
    }
    topics
}

fn strip_number(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))
        .filter(|item| item.starts_with(char::is_whitespace))
}

fn strip_bullet(line: &str) -> Option<&str> {
    let line = line.trim_start();
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
}
