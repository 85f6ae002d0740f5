//! Advisor-assisted selector refinement
//!
//! After the heuristic stage, an optional text-generation advisor reviews
//! the selectors. Its proposals are validated against real pages, and any
//! selector that matches nothing gets exactly one corrective round.
//!
//! Every advisor failure degrades to the previous selector set; nothing in
//! here returns an error.

mod advisor;
mod chat;
mod reply;

pub use advisor::{AdvisorError, CorrectionRequest, EnhanceRequest, SelectorAdvisor};
pub use chat::{correction_prompt, enhance_prompt, ChatAdvisor};
pub use reply::{parse_reply_object, CorrectionReply, EnhanceReply};

use crate::crawler::{truncate_chars, Page};
use crate::selectors::{
    failed_fields, validate_page, Confidence, Field, Method, SelectorSet, ValidationResult,
};
use crate::state::FetchStatus;
use std::collections::BTreeMap;

/// Characters of markup sent with an enhancement request
pub const ENHANCE_SAMPLE_CHARS: usize = 3000;

/// Characters of markup sent with a correction request
pub const CORRECTION_SAMPLE_CHARS: usize = 2000;

/// Article samples sent with an enhancement request
pub const ENHANCE_ARTICLE_SAMPLES: usize = 2;

const REFINED_SUFFIX: &str = " (refined after validation)";

fn markup_prefix(page: &Page, max_chars: usize) -> String {
    page.markup()
        .map(|markup| truncate_chars(&markup, max_chars))
        .unwrap_or_default()
}

/// Builds the enhancement request from the crawl's homepage sample and the
/// fetched article pages
pub fn enhance_request(
    homepage_sample: &str,
    samples: &[Page],
    selectors: &SelectorSet,
) -> EnhanceRequest {
    EnhanceRequest {
        homepage_sample: truncate_chars(homepage_sample, ENHANCE_SAMPLE_CHARS),
        article_samples: samples
            .iter()
            .filter(|page| page.is_ok())
            .take(ENHANCE_ARTICLE_SAMPLES)
            .map(|page| markup_prefix(page, ENHANCE_SAMPLE_CHARS))
            .collect(),
        selectors: selectors.selectors(),
    }
}

/// Validates `article_links` on the homepage and `title`/`content` on the
/// article page
pub fn validate_selectors(
    selectors: &SelectorSet,
    homepage: &Page,
    article: &Page,
) -> ValidationResult {
    let mut result = validate_page(homepage, &subset(selectors, &[Field::ArticleLinks]));
    result.extend(validate_page(
        article,
        &subset(selectors, &[Field::Title, Field::Content]),
    ));
    result
}

fn subset(selectors: &SelectorSet, fields: &[Field]) -> BTreeMap<Field, String> {
    fields
        .iter()
        .map(|field| (*field, selectors.get(*field).to_string()))
        .collect()
}

/// Runs the refinement loop
///
/// # Arguments
///
/// * `automatic` - Output of the heuristic stage
/// * `homepage` - The fetched homepage, used to validate `article_links`
/// * `homepage_sample` - Markup prefix of the homepage kept by the crawl
/// * `samples` - Fetched article samples; the first usable one is used for
///   validation
/// * `advisor` - The text-generation collaborator
///
/// # Returns
///
/// * `automatic` unchanged if the advisor fails or its reply cannot be parsed
/// * the advisor's set with `method = LlmEnhanced` if every field validates
/// * the corrected set with `method = LlmRefined` once a corrective round
///   has been attempted
pub async fn refine(
    automatic: SelectorSet,
    homepage: &Page,
    homepage_sample: &str,
    samples: &[Page],
    advisor: &dyn SelectorAdvisor,
) -> SelectorSet {
    tracing::info!("Enhancing selectors with advisor analysis");

    let request = enhance_request(homepage_sample, samples, &automatic);
    let reply = match advisor.enhance(&request).await {
        Ok(text) => EnhanceReply::parse(&text),
        Err(e) => Err(e),
    };

    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Advisor analysis failed: {}", e);
            tracing::warn!("Falling back to automatic selectors");
            return automatic;
        }
    };

    for issue in &reply.potential_issues {
        tracing::info!("Advisor flagged: {}", issue);
    }

    let mut enhanced = automatic;
    for (field, selector) in reply.selectors {
        enhanced.set(field, selector);
    }
    enhanced.method = Method::LlmEnhanced;
    enhanced.confidence = reply.confidence.unwrap_or(Confidence::Medium);
    enhanced.notes = reply
        .notes
        .unwrap_or_else(|| "LLM enhanced selectors".to_string());

    let no_article = Page::failed("", FetchStatus::FetchError);
    let article = samples
        .iter()
        .find(|page| page.is_ok())
        .unwrap_or(&no_article);

    let validation = validate_selectors(&enhanced, homepage, article);
    let failed = failed_fields(&validation);
    if failed.is_empty() {
        tracing::info!("All selectors passed validation");
        return enhanced;
    }

    tracing::warn!(
        "Some selectors failed validation: {}",
        failed
            .iter()
            .map(Field::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let correction = CorrectionRequest {
        failed_selectors: subset(&enhanced, &failed),
        homepage_sample: truncate_chars(homepage_sample, CORRECTION_SAMPLE_CHARS),
        article_sample: markup_prefix(article, CORRECTION_SAMPLE_CHARS),
    };

    let corrected = match advisor.correct(&correction).await {
        Ok(text) => CorrectionReply::parse(&text),
        Err(e) => Err(e),
    };

    match corrected {
        Ok(reply) => {
            if let Some(explanation) = &reply.explanation {
                tracing::info!("Advisor correction: {}", explanation);
            }
            for (field, selector) in reply.corrected_selectors {
                enhanced.set(field, selector);
            }
        }
        Err(e) => tracing::warn!("Failed to refine selectors with advisor: {}", e),
    }

    enhanced.method = Method::LlmRefined;
    enhanced.notes.push_str(REFINED_SUFFIX);
    enhanced
}
