use crate::domain::model::GradedRecord;
use crate::utils::error::{EtlError, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Returns the record with the highest final score. Ties keep the earliest
/// record; an empty slice is [`EtlError::EmptyInput`].
pub fn find_overall_topper(graded: &[GradedRecord]) -> Result<&GradedRecord> {
    let (first, rest) = graded.split_first().ok_or(EtlError::EmptyInput)?;
    Ok(rest.iter().fold(first, |topper, candidate| {
        if candidate.final_score() > topper.final_score() {
            candidate
        } else {
            topper
        }
    }))
}

/// Best record per university, first seen winning ties. Map order carries no
/// meaning.
pub fn find_topper_per_group(graded: &[GradedRecord]) -> HashMap<&str, &GradedRecord> {
    graded.iter().fold(HashMap::new(), |mut toppers, candidate| {
        match toppers.entry(candidate.university()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.final_score() > slot.get().final_score() {
                    slot.insert(candidate);
                }
            }
        }
        toppers
    })
}
