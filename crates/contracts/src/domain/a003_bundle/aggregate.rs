use serde::{Deserialize, Serialize};

use crate::domain::a002_proficiency::aggregate::ProficiencyCatalog;
use crate::domain::common::EntityMetadata;
use crate::uuid_aggregate_id;

uuid_aggregate_id!(
    /// Unique bundle identifier
    BundleId
);

/// One subject line of a bundle: what is taught, at which grade, for how long
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonLine {
    pub syllabus: String,
    pub subject: String,
    pub grade: String,
    #[serde(default)]
    pub hours: u32,
}

/// A package of paid lesson hours between a tutor and a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: BundleId,
    pub tutor_id: String,
    pub student_id: String,
    pub lessons: Vec<LessonLine>,
    /// Sum of the lesson hours
    pub hours: u32,
    #[serde(default)]
    pub remaining_hours: u32,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Bundle {
    pub fn new_for_insert(dto: BundleDto) -> Self {
        let hours = dto.total_hours();
        Self {
            id: BundleId::new_v4(),
            tutor_id: dto.tutor_id,
            student_id: dto.student_id,
            lessons: dto.lessons,
            hours,
            remaining_hours: hours,
            metadata: EntityMetadata::new(),
        }
    }
}

/// Body of `POST /api/bundle`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleDto {
    pub tutor_id: String,
    pub student_id: String,
    pub lessons: Vec<LessonLine>,
}

impl BundleDto {
    pub fn total_hours(&self) -> u32 {
        self.lessons.iter().map(|l| l.hours).fold(0, u32::saturating_add)
    }

    pub fn validate(&self, catalog: &ProficiencyCatalog) -> Result<(), String> {
        if self.tutor_id.trim().is_empty() {
            return Err("A tutor must be selected".into());
        }
        if self.student_id.trim().is_empty() {
            return Err("A student must be selected".into());
        }
        if self.lessons.is_empty() {
            return Err("A bundle needs at least one subject".into());
        }
        for line in &self.lessons {
            if line.hours == 0 {
                return Err(format!(
                    "Hours for {} ({}) must be greater than zero",
                    line.subject, line.syllabus
                ));
            }
            let subject = catalog
                .subject(&line.syllabus, &line.subject)
                .ok_or_else(|| format!("Unknown subject {} ({})", line.subject, line.syllabus))?;
            if !subject.offers_grade(&line.grade) {
                return Err(format!(
                    "Grade '{}' is not offered for {} ({})",
                    line.grade, line.subject, line.syllabus
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_proficiency::aggregate::Proficiency;

    fn catalog() -> ProficiencyCatalog {
        ProficiencyCatalog::new(vec![
            Proficiency::new("Cambridge").with_subject("Physics", &["11", "12"])
        ])
    }

    fn line(subject: &str, grade: &str, hours: u32) -> LessonLine {
        LessonLine {
            syllabus: "Cambridge".into(),
            subject: subject.into(),
            grade: grade.into(),
            hours,
        }
    }

    fn dto() -> BundleDto {
        BundleDto {
            tutor_id: "t-1".into(),
            student_id: "s-1".into(),
            lessons: vec![line("Physics", "12", 10)],
        }
    }

    #[test]
    fn test_valid_bundle() {
        assert!(dto().validate(&catalog()).is_ok());
    }

    #[test]
    fn test_rejects_missing_parties_and_hours() {
        let c = catalog();
        let mut d = dto();
        d.student_id.clear();
        assert!(d.validate(&c).is_err());

        let mut d = dto();
        d.lessons[0].hours = 0;
        assert!(d.validate(&c).unwrap_err().contains("Hours for Physics"));

        let mut d = dto();
        d.lessons.clear();
        assert!(d.validate(&c).is_err());
    }

    #[test]
    fn test_rejects_grade_outside_catalog() {
        let mut d = dto();
        d.lessons[0].grade = "9".into();
        assert!(d.validate(&catalog()).unwrap_err().contains("not offered"));
    }

    #[test]
    fn test_new_bundle_totals_lesson_hours() {
        let mut d = dto();
        d.lessons.push(line("Physics", "11", 6));
        let bundle = Bundle::new_for_insert(d);
        assert_eq!(bundle.hours, 16);
        assert_eq!(bundle.remaining_hours, 16);
        assert_eq!(bundle.lessons[1].hours, 6);
    }

    #[test]
    fn test_lesson_line_without_hours_reads_as_zero() {
        let line: LessonLine = serde_json::from_str(
            r#"{"syllabus":"Cambridge","subject":"Physics","grade":"12"}"#,
        )
        .unwrap();
        assert_eq!(line.hours, 0);
    }
}
