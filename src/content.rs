use crate::{
    error::Result,
    gemini::TextGenerator,
    models::{GeneratedContent, TextGenerationRequest},
};

pub const STOP_SEQUENCE: &str = "---";
pub const GENERATION_TEMPERATURE: f32 = 0.7;
pub const GENERATION_MAX_TOKENS: i32 = 500;

const DESCRIPTION_MARKER: &str = "DESCRIPTION:";
const TITLES_LABEL: &str = "TITLES:";

/// Instructional template sent to the model. The script is embedded verbatim;
/// the model is asked for a response in the TITLES/DESCRIPTION layout that
/// `parse_generated` understands.
pub fn build_prompt(script_or_summary: &str) -> String {
    format!(
        r#"You are an expert YouTube content strategist. Based on the following video script or summary,
generate 3 catchy, clickbait-style but informative YouTube video titles and a detailed,
SEO-optimized YouTube video description.

Focus on:
- Keywords relevant to the content.
- Engaging language for titles.
- A clear summary, timestamps (if applicable, suggest placeholders), calls to action,
  and relevant hashtags for the description.

---
Video Script/Summary:
{}
---

Format your response as follows:

TITLES:
1. [Title 1]
2. [Title 2]
3. [Title 3]

DESCRIPTION:
[Start with an engaging hook related to the video content.]

In this video, we'll cover:
- [Main point 1]
- [Main point 2]
- [Main point 3]
[Add more points as relevant]

Timestamps:
0:00 Intro
[Suggest other key timestamps based on likely video structure, e.g., 1:30 Topic A, 3:45 Topic B]

🔔 Don't forget to like, comment, and subscribe for more valuable content!
🔗 Connect with me: [Your Social Media Link] | [Your Website Link]

#RelevantHashtag1 #RelevantHashtag2 #RelevantHashtag3 #YouTubeTips"#,
        script_or_summary
    )
}

/// Best-effort split of the raw model output into 3 titles and a description.
/// Parsing irregularities degrade to placeholders, never to an error.
pub fn parse_generated(raw: &str) -> GeneratedContent {
    let Some((titles_section, description_section)) = raw.split_once(DESCRIPTION_MARKER) else {
        log::warn!(
            "Could not parse generated response structure. Full response: {}",
            raw
        );
        return GeneratedContent {
            titles: vec![
                "Could not generate specific titles.".to_string(),
                "Try rephrasing your summary.".to_string(),
                "Default Title".to_string(),
            ],
            description: raw.to_string(),
        };
    };

    let titles_block = titles_section.replace(TITLES_LABEL, "");

    let mut titles: Vec<String> = titles_block
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.starts_with("1. ") || line.starts_with("2. ") || line.starts_with("3. ")
        })
        .filter_map(|line| line.split_once(". ").map(|(_, title)| title.to_string()))
        .take(3)
        .collect();

    while titles.len() < 3 {
        titles.push(format!("Generated Title {}", titles.len() + 1));
    }

    GeneratedContent {
        titles,
        description: description_section.trim().to_string(),
    }
}

/// The relay operation: one prompt, one upstream call, one parsed result.
pub async fn generate_video_content(
    generator: &dyn TextGenerator,
    script_or_summary: &str,
) -> Result<GeneratedContent> {
    let request = TextGenerationRequest {
        prompt: build_prompt(script_or_summary),
        max_tokens: Some(GENERATION_MAX_TOKENS),
        temperature: Some(GENERATION_TEMPERATURE),
        stop_sequences: Some(vec![STOP_SEQUENCE.to_string()]),
        model_id: None,
    };

    let raw = generator.generate(request).await?;
    Ok(parse_generated(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_script_verbatim() {
        let prompt = build_prompt("How to sharpen a chisel in 5 minutes");
        assert!(prompt.contains("How to sharpen a chisel in 5 minutes"));
        assert!(prompt.contains("TITLES:"));
        assert!(prompt.contains("DESCRIPTION:"));
    }

    #[test]
    fn test_parse_well_formed_response() {
        let raw = "TITLES:\n1. A\n2. B\n3. C\nDESCRIPTION:\nHello";
        let content = parse_generated(raw);

        assert_eq!(content.titles, vec!["A", "B", "C"]);
        assert_eq!(content.description, "Hello");
    }

    #[test]
    fn test_parse_without_marker_falls_back() {
        let raw = "just some text";
        let content = parse_generated(raw);

        assert_eq!(content.titles.len(), 3);
        assert_eq!(content.titles[0], "Could not generate specific titles.");
        assert_eq!(content.description, "just some text");
    }

    #[test]
    fn test_parse_pads_missing_titles() {
        let raw = "TITLES:\n1. Only One Title\nDESCRIPTION:\nBody text";
        let content = parse_generated(raw);

        assert_eq!(
            content.titles,
            vec!["Only One Title", "Generated Title 2", "Generated Title 3"]
        );
        assert_eq!(content.description, "Body text");
    }

    #[test]
    fn test_parse_no_titles_at_all() {
        let raw = "DESCRIPTION:\nOnly a description";
        let content = parse_generated(raw);

        assert_eq!(
            content.titles,
            vec![
                "Generated Title 1",
                "Generated Title 2",
                "Generated Title 3"
            ]
        );
        assert_eq!(content.description, "Only a description");
    }

    #[test]
    fn test_parse_ignores_unnumbered_lines() {
        let raw = "TITLES:\nSome preamble\n1. First\n- bullet\n2. Second\n3. Third\nDESCRIPTION:\nD";
        let content = parse_generated(raw);

        assert_eq!(content.titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_parse_truncates_extra_titles() {
        let raw = "TITLES:\n1. A\n2. B\n3. C\n3. D\nDESCRIPTION:\nD";
        let content = parse_generated(raw);

        assert_eq!(content.titles.len(), 3);
        assert_eq!(content.titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_description_after_first_marker_only() {
        let raw = "TITLES:\n1. A\n2. B\n3. C\nDESCRIPTION:\nFirst part DESCRIPTION: second part";
        let content = parse_generated(raw);

        assert_eq!(content.description, "First part DESCRIPTION: second part");
    }

    #[test]
    fn test_parse_trims_title_whitespace() {
        let raw = "TITLES:\n  1. Indented Title\n2. B\n3. C\nDESCRIPTION:\n  Padded body  ";
        let content = parse_generated(raw);

        assert_eq!(content.titles[0], "Indented Title");
        assert_eq!(content.description, "Padded body");
    }
}
