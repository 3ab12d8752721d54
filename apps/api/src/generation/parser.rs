//! Recovers structured posts from the model's marker-delimited text.
//!
//! The model is asked to answer with `**[OUTPUT FOR <NETWORK>]**` sections, each
//! holding `**[OPTION N]**` blocks of `- **Label:** value` lines. Models drift
//! from that shape, so parsing is lenient: markdown emphasis and bullets are
//! ignored, labels match case-insensitively, values may continue over several
//! lines and anything outside a recognised section is dropped.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::generation::platform::Platform;

/// One drafted post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostOption {
    /// Caption, post text or tweet depending on the platform.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_suggestion: Option<String>,
    pub hashtags: Vec<String>,
}

/// All drafted options for one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformPosts {
    pub platform: Platform,
    pub options: Vec<PostOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Text,
    Media,
    Hashtags,
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    /// `None` for an `[OUTPUT FOR ...]` header naming an unsupported network.
    /// Markers carry whatever follows them on the same line.
    Section(Option<Platform>, &'a str),
    OptionMarker(&'a str),
    Field(Field, &'a str),
    Separator,
    Content(&'a str),
}

/// Parses raw model output into posts grouped by platform, in canonical platform order.
///
/// Platforms whose section is missing or empty are absent from the result.
pub fn parse_generated_posts(raw: &str) -> Vec<PlatformPosts> {
    let mut sections: BTreeMap<Platform, Vec<PostOption>> = BTreeMap::new();
    let mut current_platform: Option<Platform> = None;
    let mut draft = OptionDraft::default();

    for line in raw.lines() {
        match classify(line) {
            Line::Section(platform, rest) => {
                flush(&mut sections, current_platform, &mut draft);
                current_platform = platform;
                draft.start_inline_field(rest);
            }
            Line::OptionMarker(rest) => {
                flush(&mut sections, current_platform, &mut draft);
                draft.start_inline_field(rest);
            }
            Line::Field(field, value) => draft.start_field(field, value),
            Line::Separator => draft.current = None,
            Line::Content(text) => draft.continue_field(text),
        }
    }
    flush(&mut sections, current_platform, &mut draft);

    sections
        .into_iter()
        .filter(|(_, options)| !options.is_empty())
        .map(|(platform, options)| PlatformPosts { platform, options })
        .collect()
}

/// Requested platforms (canonical order) that the parsed output has no posts for.
pub fn missing_platforms(requested: &[Platform], parsed: &[PlatformPosts]) -> Vec<Platform> {
    Platform::canonical(requested)
        .into_iter()
        .filter(|p| !parsed.iter().any(|posts| posts.platform == *p))
        .collect()
}

/// Splits a hashtag field into normalised `#tags`, keeping first-seen order.
pub fn parse_hashtags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for token in value.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
        let word = token
            .trim_matches(|c: char| !(c.is_alphanumeric() || c == '#' || c == '_'))
            .trim_start_matches('#');
        if word.is_empty() {
            continue;
        }
        let tag = format!("#{word}");
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            tags.push(tag);
        }
    }

    tags
}

#[derive(Debug, Default)]
struct OptionDraft {
    text: Vec<String>,
    media: Vec<String>,
    hashtags: Vec<String>,
    current: Option<Field>,
}

impl OptionDraft {
    fn lines_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Text => &mut self.text,
            Field::Media => &mut self.media,
            Field::Hashtags => &mut self.hashtags,
        }
    }

    fn start_field(&mut self, field: Field, value: &str) {
        self.current = Some(field);
        self.push_line(field, value);
    }

    /// Starts a field written on the same line as a marker, if there is one.
    fn start_inline_field(&mut self, rest: &str) {
        if let Some((field, value)) = parse_field(rest) {
            self.start_field(field, value);
        }
    }

    fn continue_field(&mut self, text: &str) {
        match self.current {
            // hashtags only continue over lines made entirely of tags
            Some(Field::Hashtags) if !is_hashtag_line(text) => self.current = None,
            Some(field) => self.push_line(field, text),
            None => {}
        }
    }

    fn push_line(&mut self, field: Field, value: &str) {
        let lines = self.lines_mut(field);
        // collapse runs of blank lines into one paragraph break
        if value.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            return;
        }
        lines.push(value.to_string());
    }

    fn take(&mut self) -> Option<PostOption> {
        let draft = std::mem::take(self);
        let text = join_lines(&draft.text);
        let media = join_lines(&draft.media);
        let hashtags = parse_hashtags(&draft.hashtags.join(" "));

        if text.is_empty() && media.is_empty() && hashtags.is_empty() {
            return None;
        }

        Some(PostOption {
            text,
            media_suggestion: (!media.is_empty()).then_some(media),
            hashtags,
        })
    }
}

fn is_hashtag_line(text: &str) -> bool {
    let mut tokens = text
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .peekable();
    tokens.peek().is_some() && tokens.all(|t| t.starts_with('#'))
}

fn join_lines(lines: &[String]) -> String {
    lines.join("\n").trim().to_string()
}

fn flush(
    sections: &mut BTreeMap<Platform, Vec<PostOption>>,
    platform: Option<Platform>,
    draft: &mut OptionDraft,
) {
    let option = draft.take();
    if let Some(platform) = platform {
        let options = sections.entry(platform).or_default();
        options.extend(option);
    }
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if is_separator(trimmed) {
        return Line::Separator;
    }

    if let Some(marker) = classify_marker(trimmed) {
        return marker;
    }

    if let Some((field, value)) = parse_field(trimmed) {
        return Line::Field(field, value);
    }

    Line::Content(trimmed)
}

/// Matches a line opening with `[OUTPUT FOR ...]` or `[OPTION N]`, emphasis aside.
fn classify_marker(line: &str) -> Option<Line<'_>> {
    let is_decoration = |c: char| c == '*' || c == '#' || c.is_whitespace();
    let bracketed = line.trim_start_matches(is_decoration).strip_prefix('[')?;
    let close = bracketed.find(']')?;
    let inner = bracketed[..close].trim().to_uppercase();
    let rest = bracketed[close + 1..].trim_start_matches(is_decoration);

    if let Some(name) = inner.strip_prefix("OUTPUT FOR ") {
        return Some(Line::Section(Platform::from_section_name(name), rest));
    }
    let number = inner.strip_prefix("OPTION")?;
    number
        .trim()
        .chars()
        .all(|c| c.is_ascii_digit())
        .then_some(Line::OptionMarker(rest))
}

fn is_separator(line: &str) -> bool {
    line.chars().count() >= 3 && line.chars().all(|c| c == '-' || c == '—' || c == '_' || c == '*')
}

/// Recognises `- **Label:** value`, `**Label**: value` and `Label: value`.
fn parse_field(line: &str) -> Option<(Field, &str)> {
    let body = strip_bullet(line);
    let colon = body.find(':')?;
    let raw_label = &body[..colon];
    let field = label_field(raw_label.replace('*', "").trim())?;

    let value = body[colon + 1..].trim_start();
    // an unmatched `**` in the label is closed at the start of the value
    let value = if raw_label.matches("**").count() % 2 == 1 {
        value.strip_prefix("**").unwrap_or(value)
    } else {
        value
    };
    Some((field, value.trim()))
}

fn strip_bullet(line: &str) -> &str {
    for bullet in ["- ", "* ", "• ", "-", "•"] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }
    line
}

/// Any platform's text label is accepted in any section.
fn label_field(label: &str) -> Option<Field> {
    let is_text_label = label.eq_ignore_ascii_case("text")
        || Platform::ALL
            .iter()
            .any(|p| p.text_label().eq_ignore_ascii_case(label));
    if is_text_label {
        return Some(Field::Text);
    }
    match label.to_lowercase().as_str() {
        "media suggestion" | "media" => Some(Field::Media),
        "hashtags" | "hashtag" => Some(Field::Hashtags),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
**[OUTPUT FOR INSTAGRAM]**
**[OPTION 1]**
- **Caption:** Braces are not a sentence, they're a glow-up in progress! 😁
- **Media Suggestion:** Reel of a patient's before/after smile.
- **Hashtags:** #Braces #Orthodontics #Smile #Fortaleza #GlowUp
**[OPTION 2]**
- **Caption:** Fun fact: your braces work 24/7 so you don't have to.
- **Media Suggestion:** Carousel with 3 braces myths.
- **Hashtags:** #DentalCare #BracesLife #Myths #Smile #Clinic
---
**[OUTPUT FOR TWITTER/X]**
**[OPTION 1]**
- **Tweet:** Braces: temporary hardware, permanent smile.
- **Hashtags:** #Braces #Smile
**[OPTION 2]**
- **Tweet:** Who else names their rubber bands?
- **Hashtags:** #BracesLife #Orthodontics
";

    #[test]
    fn test_well_formed_output_parses_every_option() {
        let posts = parse_generated_posts(WELL_FORMED);
        assert_eq!(posts.len(), 2);

        let instagram = &posts[0];
        assert_eq!(instagram.platform, Platform::Instagram);
        assert_eq!(instagram.options.len(), 2);
        assert_eq!(
            instagram.options[0].text,
            "Braces are not a sentence, they're a glow-up in progress! 😁"
        );
        assert_eq!(
            instagram.options[0].media_suggestion.as_deref(),
            Some("Reel of a patient's before/after smile.")
        );
        assert_eq!(instagram.options[0].hashtags.len(), 5);
        assert_eq!(instagram.options[1].hashtags[0], "#DentalCare");

        let twitter = &posts[1];
        assert_eq!(twitter.platform, Platform::TwitterX);
        assert_eq!(twitter.options[1].text, "Who else names their rubber bands?");
        assert_eq!(twitter.options[1].media_suggestion, None);
        assert_eq!(twitter.options[1].hashtags, vec!["#BracesLife", "#Orthodontics"]);
    }

    #[test]
    fn test_preamble_before_first_section_is_ignored() {
        let raw = "Sure! Here are your posts:\n\n**[OUTPUT FOR LINKEDIN]**\n**[OPTION 1]**\n- **Post Text:** Hiring season.\n- **Hashtags:** #Hiring";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].platform, Platform::Linkedin);
        assert_eq!(posts[0].options[0].text, "Hiring season.");
    }

    #[test]
    fn test_multiline_caption_keeps_paragraphs() {
        let raw = "\
**[OUTPUT FOR INSTAGRAM]**
**[OPTION 1]**
- **Caption:** First paragraph.


Second paragraph.
- **Hashtags:** #one";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].options[0].text, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_fields_without_option_markers_form_one_option() {
        let raw = "[OUTPUT FOR TWITTER]\nTweet: Short and sweet.\nHashtags: Smile, Braces";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].platform, Platform::TwitterX);
        assert_eq!(posts[0].options.len(), 1);
        assert_eq!(posts[0].options[0].hashtags, vec!["#Smile", "#Braces"]);
    }

    #[test]
    fn test_label_variants_and_heading_markers() {
        let raw = "\
### [output for linkedin]
**Option 1**
* **Post Text**: Leadership starts with listening.
- **hashtags:** #Leadership #Teams";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].platform, Platform::Linkedin);
        // "**Option 1**" lacks brackets, so it is not a marker; the fields still form an option
        assert_eq!(posts[0].options.len(), 1);
        assert_eq!(posts[0].options[0].text, "Leadership starts with listening.");
        assert_eq!(posts[0].options[0].hashtags, vec!["#Leadership", "#Teams"]);
    }

    #[test]
    fn test_unsupported_section_content_is_dropped() {
        let raw = "\
**[OUTPUT FOR FACEBOOK]**
**[OPTION 1]**
- **Caption:** Should not appear.
**[OUTPUT FOR INSTAGRAM]**
**[OPTION 1]**
- **Caption:** Kept.";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].options[0].text, "Kept.");
    }

    #[test]
    fn test_repeated_platform_sections_are_merged_in_canonical_order() {
        let raw = "\
[OUTPUT FOR TWITTER/X]
- Tweet: t1
[OUTPUT FOR INSTAGRAM]
- Caption: c1
[OUTPUT FOR TWITTER/X]
- Tweet: t2";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].platform, Platform::Instagram);
        assert_eq!(posts[1].platform, Platform::TwitterX);
        let tweets: Vec<_> = posts[1].options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(tweets, vec!["t1", "t2"]);
    }

    #[test]
    fn test_empty_options_and_sections_are_discarded() {
        let raw = "**[OUTPUT FOR INSTAGRAM]**\n**[OPTION 1]**\n**[OPTION 2]**\n---\n**[OUTPUT FOR LINKEDIN]**";
        assert!(parse_generated_posts(raw).is_empty());
        assert!(parse_generated_posts("").is_empty());
    }

    #[test]
    fn test_separator_ends_a_multiline_field() {
        let raw = "[OUTPUT FOR INSTAGRAM]\n- Caption: Hello\n---\nstray closing remark";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].options[0].text, "Hello");
    }

    #[test]
    fn test_closing_remark_after_hashtags_is_not_tagged() {
        let raw = "\
**[OUTPUT FOR INSTAGRAM]**
**[OPTION 1]**
- **Caption:** Smile more.
- **Hashtags:** #Smile #Braces

I hope these help your clinic!";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].options[0].hashtags, vec!["#Smile", "#Braces"]);
    }

    #[test]
    fn test_hashtags_continue_over_tag_only_lines() {
        let raw = "[OUTPUT FOR LINKEDIN]\n- Post Text: Hiring.\n- Hashtags: #Hiring\n#Careers, #Tech\nThanks for reading";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].options[0].hashtags, vec!["#Hiring", "#Careers", "#Tech"]);
    }

    #[test]
    fn test_option_marker_sharing_a_line_with_its_first_field() {
        let raw = "\
[OUTPUT FOR INSTAGRAM]
[OPTION 1]
- Caption: one
- Hashtags: #a
**[OPTION 2]** - **Caption:** two
- Hashtags: #b";
        let posts = parse_generated_posts(raw);
        let options = &posts[0].options;
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].hashtags, vec!["#a"]);
        assert_eq!(options[1].text, "two");
        assert_eq!(options[1].hashtags, vec!["#b"]);
    }

    #[test]
    fn test_bold_at_start_of_value_is_kept() {
        let raw = "[OUTPUT FOR INSTAGRAM]\n- Caption: **Bold** start\n- Hashtags: #a";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].options[0].text, "**Bold** start");

        assert_eq!(parse_field("- **Caption:** plain"), Some((Field::Text, "plain")));
        assert_eq!(parse_field("**Caption**: plain"), Some((Field::Text, "plain")));
    }

    #[test]
    fn test_single_dash_character_is_caption_content() {
        let raw = "[OUTPUT FOR INSTAGRAM]\n- Caption: First line\n—\nLast line";
        let posts = parse_generated_posts(raw);
        assert_eq!(posts[0].options[0].text, "First line\n—\nLast line");
        assert_eq!(classify("—"), Line::Content("—"));
        assert_eq!(classify("———"), Line::Separator);
    }

    #[test]
    fn test_parse_hashtags_normalises_and_dedups() {
        assert_eq!(
            parse_hashtags("#Smile, smile #Braces. ##Clinic (#dental_care)"),
            vec!["#Smile", "#Braces", "#Clinic", "#dental_care"]
        );
        assert!(parse_hashtags(" , # ").is_empty());
    }

    #[test]
    fn test_missing_platforms_reports_absent_sections() {
        let posts = parse_generated_posts(WELL_FORMED);
        let missing = missing_platforms(
            &[Platform::TwitterX, Platform::Linkedin, Platform::Instagram],
            &posts,
        );
        assert_eq!(missing, vec![Platform::Linkedin]);
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(
            classify("**[OUTPUT FOR INSTAGRAM]**"),
            Line::Section(Some(Platform::Instagram), "")
        );
        assert_eq!(classify("  **[OPTION 2]** "), Line::OptionMarker(""));
        assert_eq!(
            classify("**[OPTION 2]** - **Caption:** two"),
            Line::OptionMarker("- **Caption:** two")
        );
        assert_eq!(classify("---"), Line::Separator);
        assert_eq!(classify("[Write the caption here]"), Line::Content("[Write the caption here]"));
    }
}
