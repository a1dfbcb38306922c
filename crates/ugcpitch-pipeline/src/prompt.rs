//! Prompt text for each stage.
//!
//! Every builder is a pure function of its inputs. The research prompts end
//! with a JSON-only directive naming the exact keys the extractor's callers
//! read.

use std::fmt::Write as _;

use ugcpitch_core::{BrandProfile, CompetitorSet, PitchRequest};

/// Used when the creator gave no personal connection to the brand.
pub const DEFAULT_PERSONAL_CONNECTION: &str =
    "Create genuine connection based on brand's product";

#[must_use]
pub fn brand_research_prompt(brand_input: &str) -> String {
    format!(
        r#"Research this brand: {brand_input}

Analyze and provide:
1. Brand name (clean, no URL extensions)
2. Industry/niche
3. Main products or services
4. Brand style and vibe
5. Target audience
6. Content strategy
7. Opportunities

Respond ONLY with valid JSON:
{{
  "brandName": "string",
  "industry": "string",
  "products": "string",
  "brandStyle": "string",
  "targetAudience": "string",
  "contentStrategy": "string",
  "opportunities": "string"
}}"#
    )
}

#[must_use]
pub fn competitor_research_prompt(brand: &BrandProfile) -> String {
    format!(
        r#"Find 2-3 competitors for {name} in {industry}.

For each provide:
1. Name
2. Strengths (especially UGC/content)
3. Social media approach
4. Advantages

Respond ONLY with valid JSON:
{{
  "competitors": [
    {{
      "name": "string",
      "strengths": "string",
      "contentApproach": "string",
      "advantages": "string"
    }}
  ]
}}"#,
        name = brand.brand_name,
        industry = brand.industry,
    )
}

#[must_use]
pub fn pitch_prompt(
    request: &PitchRequest,
    brand: &BrandProfile,
    competitors: &CompetitorSet,
) -> String {
    let has_story = request.personal_story().is_some();
    let focus = request.pitch_focus();
    let creator = request.creator();

    let mut prompt = String::from("Create a personalized UGC pitch.\n\n");
    let _ = writeln!(prompt, "BRAND: {}", pretty_json(brand));
    let _ = writeln!(prompt, "COMPETITORS: {}", pretty_json(competitors));
    let _ = write!(
        prompt,
        "PERSONAL CONNECTION: {}",
        request
            .personal_story()
            .unwrap_or(DEFAULT_PERSONAL_CONNECTION)
    );
    if let Some(focus) = focus {
        let _ = write!(
            prompt,
            "\n\nPITCH FOCUS (CRITICAL - CENTER ENTIRE PITCH AROUND THIS):\n{focus}\n\nMake this the core problem/opportunity."
        );
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "CREATOR: {}", creator.name);
    let _ = writeln!(prompt, "PORTFOLIO: {}", creator.portfolio_url);
    let _ = writeln!(prompt, "TIKTOK: {}", creator.social_handle);

    prompt.push_str("\nSTRUCTURE:\n");
    let _ = writeln!(
        prompt,
        "1. Genuine personal connection about the brand{}",
        if has_story { " (use provided connection)" } else { "" }
    );
    prompt.push_str("2. Mention competitors' UGC usage if relevant\n");
    let _ = writeln!(
        prompt,
        "3. Identify market gap{}",
        if focus.is_some() { " (MUST relate to pitch focus)" } else { "" }
    );
    prompt.push_str(
        "4. Position as UGC solution\n\
         5. Propose collaboration\n\
         6. Call to action\n",
    );

    prompt.push_str(
        "\nEXAMPLES:\n\
         - \"I came across your ad and discovered [product] and I'm genuinely fascinated – as someone who deals with [problem], this looks amazing\"\n\
         - \"I was targeted by your ad and I can't express the joy I felt seeing [specific thing]\"\n",
    );

    prompt.push_str(
        "\nRULES:\n\
         - Personal and authentic\n\
         - Only REAL data from research\n\
         - Clear business angle (UGC for Q4, ads, social)\n\
         - Match brand's tone\n\
         - Include portfolio and TikTok links\n\
         - Conversational but professional",
    );
    if focus.is_some() {
        prompt.push_str("\n- CRITICAL: Entire pitch revolves around pitch focus");
    }

    prompt.push_str("\n\nWrite the complete pitch as plain text.");
    prompt
}

fn pretty_json<T: serde::Serialize>(value: &T) -> String {
    // Plain string fields always serialize.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugcpitch_core::{CompetitorRecord, Creator};

    fn request(story: Option<&str>, focus: Option<&str>) -> PitchRequest {
        PitchRequest::new(
            "acme.com",
            story,
            focus,
            Creator {
                name: "Julia".to_string(),
                portfolio_url: "https://julia.example.com/".to_string(),
                social_handle: "@julia".to_string(),
            },
        )
        .expect("valid request")
    }

    fn acme() -> BrandProfile {
        BrandProfile {
            brand_name: "Acme".to_string(),
            industry: "Tools".to_string(),
            products: "Widgets".to_string(),
            ..BrandProfile::default()
        }
    }

    fn widgetco() -> CompetitorSet {
        CompetitorSet {
            competitors: vec![CompetitorRecord {
                name: "WidgetCo".to_string(),
                strengths: "Video ads".to_string(),
                content_approach: "Influencers".to_string(),
                advantages: "Budget".to_string(),
            }],
        }
    }

    #[test]
    fn brand_prompt_names_input_and_schema() {
        let prompt = brand_research_prompt("acme.com");
        assert!(prompt.starts_with("Research this brand: acme.com\n"));
        assert!(prompt.contains("Respond ONLY with valid JSON:"));
        assert!(prompt.contains("\"targetAudience\": \"string\""));
        assert!(prompt.ends_with('}'));
    }

    #[test]
    fn competitor_prompt_uses_name_and_industry() {
        let prompt = competitor_research_prompt(&acme());
        assert!(prompt.starts_with("Find 2-3 competitors for Acme in Tools.\n"));
        assert!(prompt.contains("\"contentApproach\": \"string\""));
    }

    #[test]
    fn pitch_prompt_embeds_research_as_json() {
        let prompt = pitch_prompt(&request(None, None), &acme(), &widgetco());
        assert!(prompt.contains("BRAND: {\n  \"brandName\": \"Acme\""));
        assert!(prompt.contains("COMPETITORS: {\n  \"competitors\": ["));
        assert!(prompt.contains("\"contentApproach\": \"Influencers\""));
        assert!(prompt.contains("CREATOR: Julia\n"));
        assert!(prompt.contains("PORTFOLIO: https://julia.example.com/\n"));
        assert!(prompt.contains("TIKTOK: @julia\n"));
        assert!(prompt.ends_with("Write the complete pitch as plain text."));
    }

    #[test]
    fn pitch_prompt_without_story_or_focus_uses_defaults() {
        let prompt = pitch_prompt(&request(None, None), &acme(), &widgetco());
        assert!(prompt.contains(&format!("PERSONAL CONNECTION: {DEFAULT_PERSONAL_CONNECTION}\n")));
        assert!(!prompt.contains("PITCH FOCUS"));
        assert!(!prompt.contains("(use provided connection)"));
        assert!(!prompt.contains("(MUST relate to pitch focus)"));
        assert!(!prompt.contains("CRITICAL: Entire pitch"));
    }

    #[test]
    fn pitch_prompt_with_story_and_focus_adds_directives() {
        let prompt = pitch_prompt(
            &request(Some("I build birdhouses"), Some("holiday gifting")),
            &acme(),
            &widgetco(),
        );
        assert!(prompt.contains("PERSONAL CONNECTION: I build birdhouses\n\nPITCH FOCUS"));
        assert!(prompt.contains("CENTER ENTIRE PITCH AROUND THIS):\nholiday gifting\n"));
        assert!(prompt.contains("Make this the core problem/opportunity.\nCREATOR: Julia"));
        assert!(prompt.contains(
            "1. Genuine personal connection about the brand (use provided connection)\n"
        ));
        assert!(prompt.contains("3. Identify market gap (MUST relate to pitch focus)\n"));
        assert!(prompt.contains("- Conversational but professional\n- CRITICAL: Entire pitch revolves around pitch focus"));
    }

    #[test]
    fn builders_are_deterministic() {
        let req = request(Some("story"), Some("focus"));
        assert_eq!(brand_research_prompt("acme.com"), brand_research_prompt("acme.com"));
        assert_eq!(
            competitor_research_prompt(&acme()),
            competitor_research_prompt(&acme())
        );
        assert_eq!(
            pitch_prompt(&req, &acme(), &widgetco()),
            pitch_prompt(&req, &acme(), &widgetco())
        );
    }
}
