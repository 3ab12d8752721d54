// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts alongside it;
// this file holds the cross-cutting output rules.

/// Output rules for post generation. The parser relies on the model
/// starting directly with a section marker and not inventing labels.
pub const STRICT_POST_OUTPUT_RULES: &str = "\
**STRICT OUTPUT RULES:**
- Do NOT include greetings, introductions, farewells, strategy summaries or any text that is not the formatted post content itself.
- Do NOT write \"Option 1\", \"Option 2\", \"Caption\", \"Tweet\", etc. on your own. Follow the structure of the formatting blocks exactly.
- Your answer must start DIRECTLY with the first line of the first requested section (e.g. `{first_marker}`).";

/// Output rules for list-shaped answers.
pub const STRICT_LIST_OUTPUT_RULES: &str = "\
**STRICT OUTPUT RULES:**
- Return the answer as a numbered list and NOTHING ELSE.
- Do NOT include greetings, introductions, farewells or any additional text.";
