//! Caller-facing input records.
//!
//! `New*` records carry everything needed to create a row. `*Patch` records
//! carry only the fields the caller wants to change; `None` leaves a field
//! untouched. Nullable columns take `Option<Option<T>>` in patches, where
//! `Some(None)` (an explicit JSON `null`) clears the value.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

/// Maps a present key to `Some`, so `null` becomes `Some(None)` instead of `None`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub national_id: String,
    pub email: String,
    pub semester: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub email: Option<String>,
    pub semester: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCourse {
    pub name: String,
    pub credits: i32,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub credits: Option<i32>,
    pub code: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewInstructor {
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InstructorPatch {
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub specialty: Option<Option<String>>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub course_id: i32,
    #[serde(default)]
    pub final_grade: Option<f64>,
    /// Defaults to the current date when omitted
    #[serde(default)]
    pub registered_on: Option<NaiveDate>,
    #[serde(default)]
    pub instructor_ids: Vec<i32>,
}

impl NewEnrollment {
    /// Instructor ids in request order with repeats removed
    pub fn unique_instructor_ids(&self) -> Vec<i32> {
        let mut seen = HashSet::new();
        self.instructor_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Only grade, date and the active flag can change. The student and course
/// fields exist so a caller that sends them can be told they are immutable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnrollmentPatch {
    pub student_id: Option<i32>,
    pub course_id: Option<i32>,
    #[serde(deserialize_with = "nullable")]
    pub final_grade: Option<Option<f64>>,
    pub registered_on: Option<NaiveDate>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewHistory {
    pub student_id: i32,
    #[serde(default)]
    pub average_grade: Option<f64>,
    #[serde(default)]
    pub record_number: Option<String>,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryPatch {
    pub student_id: Option<i32>,
    #[serde(deserialize_with = "nullable")]
    pub average_grade: Option<Option<f64>>,
    #[serde(deserialize_with = "nullable")]
    pub record_number: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub issued_on: Option<Option<NaiveDate>>,
}

#[cfg(test)]
mod test {
    use crate::records::{
        EnrollmentPatch, HistoryPatch, InstructorPatch, NewEnrollment, StudentPatch,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_new_enrollment_defaults() {
        let input: NewEnrollment =
            serde_json::from_str(r#"{"student_id": 1, "course_id": 2}"#).unwrap();

        assert_eq!(input.student_id, 1);
        assert_eq!(input.course_id, 2);
        assert_eq!(input.final_grade, None);
        assert_eq!(input.registered_on, None);
        assert!(input.instructor_ids.is_empty());
    }

    #[test]
    fn test_new_enrollment_with_date_and_instructors() {
        let input: NewEnrollment = serde_json::from_str(
            r#"{"student_id": 1, "course_id": 2, "final_grade": 4.5,
                "registered_on": "2024-02-01", "instructor_ids": [3, 4]}"#,
        )
        .unwrap();

        assert_eq!(input.final_grade, Some(4.5));
        assert_eq!(
            input.registered_on,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(input.instructor_ids, vec![3, 4]);
    }

    #[test]
    fn test_unique_instructor_ids_keeps_first_occurrence() {
        let input = NewEnrollment {
            student_id: 1,
            course_id: 1,
            final_grade: None,
            registered_on: None,
            instructor_ids: vec![7, 3, 7, 9, 3],
        };

        assert_eq!(input.unique_instructor_ids(), vec![7, 3, 9]);
    }

    #[test]
    fn test_patches_accept_partial_bodies() {
        let patch: StudentPatch = serde_json::from_str(r#"{"email": "b@x.com"}"#).unwrap();
        assert_eq!(patch.email.as_deref(), Some("b@x.com"));
        assert_eq!(patch.name, None);
        assert_eq!(patch.active, None);

        let patch: EnrollmentPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch, EnrollmentPatch::default());

        let patch: HistoryPatch = serde_json::from_str(r#"{"student_id": 5}"#).unwrap();
        assert_eq!(patch.student_id, Some(5));
        assert_eq!(patch.average_grade, None);
    }

    #[test]
    fn test_null_clears_nullable_patch_fields() {
        let patch: EnrollmentPatch = serde_json::from_str(r#"{"final_grade": null}"#).unwrap();
        assert_eq!(patch.final_grade, Some(None));

        let patch: EnrollmentPatch = serde_json::from_str(r#"{"final_grade": 3.5}"#).unwrap();
        assert_eq!(patch.final_grade, Some(Some(3.5)));

        let patch: HistoryPatch = serde_json::from_str(
            r#"{"record_number": null, "issued_on": "2024-06-30"}"#,
        )
        .unwrap();
        assert_eq!(patch.record_number, Some(None));
        assert_eq!(
            patch.issued_on,
            Some(NaiveDate::from_ymd_opt(2024, 6, 30))
        );
        assert_eq!(patch.average_grade, None);

        let patch: InstructorPatch = serde_json::from_str(r#"{"specialty": null}"#).unwrap();
        assert_eq!(patch.specialty, Some(None));
    }
}
