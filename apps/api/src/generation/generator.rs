//! Post generation: orchestrates the full pipeline.
//!
//! Flow: build_prompt → LLM generate → parse_generated_posts → report missing platforms.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::parser::{missing_platforms, parse_generated_posts, PlatformPosts};
use crate::generation::platform::Platform;
use crate::generation::prompt_builder::build_prompt;
use crate::generation::topics::{build_topic_prompt, parse_topic_list};
use crate::llm_client::ContentGenerator;
use crate::models::persona::PersonaInput;

/// Validated inputs for one generation run.
#[derive(Debug, Clone)]
pub struct PostBrief {
    pub persona: PersonaInput,
    pub objective: String,
    pub topic: String,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPosts {
    pub posts: Vec<PlatformPosts>,
    /// Requested platforms the model produced nothing usable for.
    pub missing_platforms: Vec<Platform>,
    /// The model's answer verbatim, for clients that render it directly.
    pub raw_content: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicSuggestions {
    pub topics: Vec<String>,
    pub raw_content: String,
}

/// Builds the prompt, calls the model once and parses its answer.
///
/// A parse that recovers nothing is not an error: `raw_content` is still returned.
pub async fn generate_posts(
    llm: &dyn ContentGenerator,
    brief: &PostBrief,
) -> Result<GeneratedPosts, AppError> {
    let prompt = build_prompt(&brief.persona, &brief.objective, &brief.topic, &brief.platforms);
    info!(
        "Generating posts for persona '{}' on {:?} ({} prompt chars)",
        brief.persona.name,
        brief.platforms,
        prompt.len()
    );

    let raw_content = llm.generate(&prompt).await?;

    let posts = parse_generated_posts(&raw_content);
    let missing = missing_platforms(&brief.platforms, &posts);
    if !missing.is_empty() {
        warn!("Model output had no usable section for {:?}", missing);
    }
    info!(
        "Parsed {} options across {} platforms",
        posts.iter().map(|p| p.options.len()).sum::<usize>(),
        posts.len()
    );

    Ok(GeneratedPosts {
        posts,
        missing_platforms: missing,
        raw_content,
        model: llm.model().to_string(),
        generated_at: Utc::now(),
    })
}

/// Asks the model for post topic ideas suited to a persona.
pub async fn suggest_topics(
    llm: &dyn ContentGenerator,
    persona: &PersonaInput,
) -> Result<TopicSuggestions, AppError> {
    info!("Suggesting topics for persona '{}'", persona.name);
    let raw_content = llm.generate(&build_topic_prompt(persona)).await?;
    let topics = parse_topic_list(&raw_content);
    if topics.is_empty() {
        warn!("Model answer contained no recognisable topic list");
    }
    Ok(TopicSuggestions {
        topics,
        raw_content,
    })
}
