//! Content entities as the API serializes them. Field names follow the wire
//! format, including its historical spellings.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_id: Option<i64>,
    pub notice_name: String,
    pub notice_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub public_id: String,
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDto {
    pub sub_id: i64,
    pub subject_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<i64>,
    #[serde(default)]
    pub subject_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chap_id: Option<i64>,
    #[serde(default)]
    pub chapter_title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_id: Option<i64>,
    pub notes_content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chap_id: Option<ChapterRef>,
}

/// A question paper (the API calls it a "test").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qid: Option<i64>,
    pub name: String,
    pub year: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, rename = "imageurls", skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<ImageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_entity: Option<SubjectRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol_id: Option<i64>,
    pub sol_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_entity: Option<SubjectRef>,
}

/// Where new notes go: an existing id or a name to create, per level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotesPlacement {
    pub semester_id: Option<i64>,
    pub new_semester_name: Option<String>,
    pub subject_id: Option<i64>,
    pub new_subject_name: Option<String>,
    pub chapter_id: Option<i64>,
    pub new_chapter_name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_uses_wire_names() {
        let entity: TestEntity = serde_json::from_str(
            r#"{"qid":4,"name":"Midterm","year":"2023","type":"Regular",
                "imageurls":[{"publicId":"p1","imageUrl":"https://img/1"}],
                "subjectEntity":{"subId":2,"subjectName":"Physics"}}"#,
        )
        .unwrap();
        assert_eq!(entity.kind, "Regular");
        assert_eq!(entity.image_urls[0].public_id, "p1");
        assert_eq!(entity.subject_entity.unwrap().subject_name, "Physics");
    }

    #[test]
    fn optional_fields_are_omitted() {
        let notice = NoticeEntity {
            notice_id: None,
            notice_name: "Exam".to_string(),
            notice_message: "Starts Monday".to_string(),
            created_date: None,
        };
        let encoded = serde_json::to_value(&notice).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"noticeName": "Exam", "noticeMessage": "Starts Monday"})
        );
    }
}
