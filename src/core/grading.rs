use crate::domain::model::{Grade, GradedRecord, StudentRecord};
use std::collections::BTreeMap;

/// 計算每位學生的最終分數與等第，輸出順序與輸入一致
pub fn calculate_grades(students: &[StudentRecord]) -> Vec<GradedRecord> {
    students.iter().cloned().map(GradedRecord::new).collect()
}

pub fn grade_distribution(graded: &[GradedRecord]) -> BTreeMap<Grade, usize> {
    graded.iter().fold(BTreeMap::new(), |mut counts, record| {
        *counts.entry(record.grade()).or_insert(0) += 1;
        counts
    })
}
