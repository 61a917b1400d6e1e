use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub test_scores: [i32; 4],
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl Grade {
    /// 依最終分數判定等第，各區間下界為包含
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= 70.0 {
            Grade::A
        } else if final_score >= 50.0 {
            Grade::B
        } else if final_score >= 35.0 {
            Grade::C
        } else {
            Grade::F
        }
    }

    pub fn min_score(self) -> Option<f64> {
        match self {
            Grade::A => Some(70.0),
            Grade::B => Some(50.0),
            Grade::C => Some(35.0),
            Grade::F => None,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// A student record with its derived final score and grade.
///
/// Fields are private so a graded record cannot drift from the score it was
/// graded with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedRecord {
    #[serde(flatten)]
    student: StudentRecord,
    final_score: f64,
    grade: Grade,
}

impl GradedRecord {
    pub fn new(student: StudentRecord) -> Self {
        let sum: i64 = student.test_scores.iter().map(|&s| i64::from(s)).sum();
        let final_score = sum as f64 / 4.0;
        Self {
            grade: Grade::from_score(final_score),
            final_score,
            student,
        }
    }

    pub fn student(&self) -> &StudentRecord {
        &self.student
    }

    pub fn university(&self) -> &str {
        &self.student.university
    }

    pub fn final_score(&self) -> f64 {
        self.final_score
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub records: Vec<StudentRecord>,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopperReport {
    pub graded_records: Vec<GradedRecord>,
    pub overall_topper: Option<GradedRecord>,
    pub university_toppers: BTreeMap<String, GradedRecord>,
    pub grade_counts: BTreeMap<Grade, usize>,
    pub skipped_rows: usize,
}
