use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

use crate::domain::UserId;

/// POST body for the access-group recommendation endpoint. Always
/// carries the trimmed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGroupsRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// One recommendation response. Immutable once produced; a new
/// submission fully replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub department: String,
    #[serde(default)]
    pub essential: Vec<GroupItem>,
    #[serde(default)]
    pub optional: Vec<GroupItem>,
}

/// An access group entry, normalized at the deserialization boundary.
///
/// The wire carries two shapes: a bare string, or
/// `{"name": ..., "aiSuggested": ...}`. Anything without the annotated
/// shape decodes as `ai_suggested = false`, so the rest of the codebase
/// never inspects the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupItem {
    pub name: String,
    pub ai_suggested: bool,
}

impl GroupItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ai_suggested: false,
        }
    }

    pub fn ai_suggested(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ai_suggested: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GroupItemRepr {
    Plain(String),
    Annotated {
        name: String,
        #[serde(rename = "aiSuggested", default)]
        ai_suggested: bool,
    },
}

impl<'de> Deserialize<'de> for GroupItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let item = match GroupItemRepr::deserialize(deserializer)? {
            GroupItemRepr::Plain(name) => GroupItem::new(name),
            GroupItemRepr::Annotated { name, ai_suggested } => GroupItem { name, ai_suggested },
        };
        Ok(item)
    }
}

impl Serialize for GroupItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Reproduce the wire polymorphism: plain entries stay bare strings.
        if self.ai_suggested {
            #[derive(Serialize)]
            struct Annotated<'a> {
                name: &'a str,
                #[serde(rename = "aiSuggested")]
                ai_suggested: bool,
            }
            Annotated {
                name: &self.name,
                ai_suggested: true,
            }
            .serialize(serializer)
        } else {
            serializer.serialize_str(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_item_decodes_from_bare_string() {
        let item: GroupItem = serde_json::from_str(r#""VS Code""#).expect("decode");
        assert_eq!(item, GroupItem::new("VS Code"));
    }

    #[test]
    fn group_item_decodes_from_annotated_object() {
        let item: GroupItem =
            serde_json::from_str(r#"{"name":"DB Access","aiSuggested":true}"#).expect("decode");
        assert_eq!(item, GroupItem::ai_suggested("DB Access"));
    }

    #[test]
    fn group_item_without_annotation_normalizes_to_not_ai_suggested() {
        let item: GroupItem = serde_json::from_str(r#"{"name":"Figma"}"#).expect("decode");
        assert_eq!(item, GroupItem::new("Figma"));
    }

    #[test]
    fn group_item_serialization_reproduces_wire_shape() {
        let plain = serde_json::to_string(&GroupItem::new("Postman")).expect("encode");
        assert_eq!(plain, r#""Postman""#);

        let annotated = serde_json::to_string(&GroupItem::ai_suggested("DB Access")).expect("encode");
        assert_eq!(annotated, r#"{"name":"DB Access","aiSuggested":true}"#);
    }

    #[test]
    fn request_body_uses_camel_case_field() {
        let body = AccessGroupsRequest {
            user_id: UserId("G01234567".into()),
        };
        assert_eq!(
            serde_json::to_string(&body).expect("encode"),
            r#"{"userId":"G01234567"}"#
        );
    }

    #[test]
    fn result_tolerates_missing_group_lists() {
        let result: RecommendationResult =
            serde_json::from_str(r#"{"userId":"G01234567","department":"Finance"}"#)
                .expect("decode");
        assert!(result.essential.is_empty());
        assert!(result.optional.is_empty());
    }

    #[test]
    fn result_decodes_mixed_item_shapes_preserving_order() {
        let raw = r#"{
            "userId": "G01234567",
            "department": "Finance",
            "essential": ["VS Code", "VS Code"],
            "optional": ["Terraform", {"name": "Databrick Access", "aiSuggested": true}]
        }"#;
        let result: RecommendationResult = serde_json::from_str(raw).expect("decode");
        // Duplicates are kept as separate rows.
        assert_eq!(
            result.essential,
            vec![GroupItem::new("VS Code"), GroupItem::new("VS Code")]
        );
        assert_eq!(
            result.optional,
            vec![
                GroupItem::new("Terraform"),
                GroupItem::ai_suggested("Databrick Access"),
            ]
        );
    }
}
