//! Derived view of a recommendation: per-item highlight and AI flags
//! plus a deep link into the external request system.

use std::collections::HashSet;

use url::form_urlencoded;

use shared::protocol::{GroupItem, RecommendationResult};

/// Default base for the external request-system deep links.
pub const DEFAULT_REQUEST_SYSTEM_URL: &str = "/request-system";

/// Names that render pre-selected. An explicit configuration set so
/// deployments and tests can vary it instead of inline literals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightList(HashSet<String>);

impl HighlightList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// The groups the deployment pre-selects out of the box.
    pub fn well_known() -> Self {
        Self::new(["DB Access", "Databrick Access"])
    }

    /// Exact name match; no normalization.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// One row of the rendered list. The two flags are independent and may
/// co-occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGroupItem {
    pub name: String,
    pub ai_suggested: bool,
    pub highlighted: bool,
    pub request_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecommendation {
    pub user_id: String,
    pub department: String,
    pub essential: Vec<RenderedGroupItem>,
    pub optional: Vec<RenderedGroupItem>,
}

/// Maps a result to its rendered form. Source order is preserved and
/// duplicates stay separate rows.
pub fn render(
    result: &RecommendationResult,
    highlights: &HighlightList,
    request_base: &str,
) -> RenderedRecommendation {
    RenderedRecommendation {
        user_id: result.user_id.as_str().to_string(),
        department: result.department.clone(),
        essential: render_items(&result.essential, highlights, request_base),
        optional: render_items(&result.optional, highlights, request_base),
    }
}

fn render_items(
    items: &[GroupItem],
    highlights: &HighlightList,
    request_base: &str,
) -> Vec<RenderedGroupItem> {
    items
        .iter()
        .map(|item| RenderedGroupItem {
            name: item.name.clone(),
            ai_suggested: item.ai_suggested,
            highlighted: highlights.contains(&item.name),
            request_url: request_url(request_base, &item.name),
        })
        .collect()
}

/// Deep link keyed by group name. The name is form-encoded; the target
/// itself is an opaque collaborator.
fn request_url(request_base: &str, name: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .finish();
    format!("{request_base}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::UserId;

    fn sample_result() -> RecommendationResult {
        RecommendationResult {
            user_id: UserId("G01234567".into()),
            department: "Finance".into(),
            essential: vec![GroupItem::new("VS Code"), GroupItem::new("VS Code")],
            optional: vec![
                GroupItem::new("Terraform"),
                GroupItem::ai_suggested("Databrick Access"),
            ],
        }
    }

    #[test]
    fn highlight_and_ai_flags_are_independent_and_co_occur() {
        let rendered = render(
            &sample_result(),
            &HighlightList::well_known(),
            DEFAULT_REQUEST_SYSTEM_URL,
        );

        let databrick = &rendered.optional[1];
        assert!(databrick.ai_suggested);
        assert!(databrick.highlighted);

        let terraform = &rendered.optional[0];
        assert!(!terraform.ai_suggested);
        assert!(!terraform.highlighted);
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        let rendered = render(
            &sample_result(),
            &HighlightList::default(),
            DEFAULT_REQUEST_SYSTEM_URL,
        );
        assert_eq!(rendered.essential.len(), 2);
        assert_eq!(rendered.essential[0].name, "VS Code");
        assert_eq!(rendered.essential[1].name, "VS Code");
    }

    #[test]
    fn request_links_form_encode_the_group_name() {
        let rendered = render(
            &sample_result(),
            &HighlightList::default(),
            DEFAULT_REQUEST_SYSTEM_URL,
        );
        assert_eq!(
            rendered.essential[0].request_url,
            "/request-system?name=VS+Code"
        );
    }

    #[test]
    fn highlight_match_is_exact() {
        let highlights = HighlightList::new(["db access"]);
        assert!(!highlights.contains("DB Access"));
    }

    #[test]
    fn custom_request_base_is_respected() {
        let rendered = render(
            &sample_result(),
            &HighlightList::default(),
            "https://requests.example.com/request-system",
        );
        assert_eq!(
            rendered.optional[0].request_url,
            "https://requests.example.com/request-system?name=Terraform"
        );
    }
}
