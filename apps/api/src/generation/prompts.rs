// All LLM prompt templates for the Generation module.
// Placeholders are `{name}` tokens filled by `prompt_builder::render_template`.

/// Post generation prompt.
/// Replace: {persona_name}, {persona_description}, {tone_of_voice}, {objective},
///          {topic}, {output_rules}, {platform_blocks}
pub const POST_PROMPT_TEMPLATE: &str = r#"You are a social media content generator. Your task is to create posts from the information provided, following the formatting rules precisely.

**1. Persona (Target Audience):**
- **Name:** {persona_name}
- **Description:** {persona_description}
- **Tone of voice to use:** {tone_of_voice}

**2. Post Objective:**
- **Main goal:** {objective}

**3. Central Topic of the Post:**
- **Subject:** {topic}

**4. Generation Instructions:**
Using ALL of the information above, generate the content for the social network sections requested below. For each section, provide **TWO (2) CREATIVE AND DISTINCT OPTIONS**.

---
{output_rules}
---
{platform_blocks}
"#;

/// Separator placed between platform blocks.
pub const BLOCK_SEPARATOR: &str = "\n---\n";

pub const INSTAGRAM_BLOCK: &str = "\
**[OUTPUT FOR INSTAGRAM]**
**[OPTION 1]**
- **Caption:** [Write the first version of the caption here]
- **Media Suggestion:** [Describe the media suggestion for option 1]
- **Hashtags:** [Suggest 5 hashtags for option 1]
**[OPTION 2]**
- **Caption:** [Write the second version of the caption here, with a different approach]
- **Media Suggestion:** [Describe an alternative media suggestion for option 2]
- **Hashtags:** [Suggest 5 different hashtags, or a new combination, for option 2]";

pub const LINKEDIN_BLOCK: &str = "\
**[OUTPUT FOR LINKEDIN]**
**[OPTION 1]**
- **Post Text:** [Write the first version of the LinkedIn post here]
- **Hashtags:** [Suggest 3 professional hashtags for option 1]
**[OPTION 2]**
- **Post Text:** [Write the second version of the post here, with a different approach]
- **Hashtags:** [Suggest 3 different professional hashtags for option 2]";

pub const TWITTER_X_BLOCK: &str = "\
**[OUTPUT FOR TWITTER/X]**
**[OPTION 1]**
- **Tweet:** [Write the first version of the tweet here, concise and punchy]
- **Hashtags:** [Suggest 2 relevant hashtags for option 1]
**[OPTION 2]**
- **Tweet:** [Write the second version of the tweet here, with a different hook]
- **Hashtags:** [Suggest 2 different relevant hashtags for option 2]";

/// Topic brainstorming prompt.
/// Replace: {persona_name}, {persona_description}, {topic_count}, {output_rules}
pub const TOPIC_PROMPT_TEMPLATE: &str = r#"You are a content strategist who specialises in brainstorming. Your task is to generate social media post ideas based on a persona.

**Persona:**
- **Name:** {persona_name}
- **Description:** {persona_description}

Based on the persona above, generate {topic_count} topic ideas for posts. Topics must be short, direct and interesting to the target audience described.

{output_rules}

Example output:
1. Topic A
2. Topic B
3. Topic C
"#;
