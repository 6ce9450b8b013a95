use super::normalize::{headsign_query, normalize_name};
use super::StopSchoolMatch;
use crate::algorithm::fuzzy;
use crate::model::demand::StudentTable;
use crate::model::error::AccessError;
use crate::model::service::ServiceTable;
use std::collections::{HashMap, HashSet};

/// maps each service record to its best-guess school by weighted-ratio
/// fuzzy similarity against the known school-name vocabulary.
///
/// records whose best score falls below `score_cutoff` are discarded;
/// output is deduplicated on (stop_id, matched_school), keeping the first
/// occurrence. pure over its inputs.
pub fn match_school_names(
    services: &ServiceTable,
    students: &StudentTable,
    score_cutoff: u32,
) -> Result<Vec<StopSchoolMatch>, AccessError> {
    let school_names = students.school_names()?;

    // the choice list preserves sorted-name order; when two names share a
    // normalization, lookup resolves to the later one
    let mut name_by_norm: HashMap<String, String> = HashMap::new();
    let mut choices: Vec<String> = Vec::with_capacity(school_names.len());
    for name in school_names.iter() {
        let norm = normalize_name(name);
        choices.push(norm.clone());
        name_by_norm.insert(norm, name.clone());
    }

    let mut matches: Vec<StopSchoolMatch> = vec![];
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for index in 0..services.len() {
        let query = headsign_query(&services.candidate_text(index));
        if query.is_empty() {
            continue;
        }
        let best = extract_one(&query, &choices);
        let (best_norm, score) = match best {
            Some(found) => found,
            None => continue,
        };
        if score < score_cutoff {
            continue;
        }
        let matched_school = match name_by_norm.get(best_norm) {
            Some(name) => name.clone(),
            None => continue,
        };
        let stop_id = services.stop_id(index);
        let key = (stop_id.clone(), matched_school.clone());
        if seen.insert(key) {
            matches.push(StopSchoolMatch {
                stop_id,
                stop_name: services.stop_name(index),
                matched_school,
                confidence: score,
            });
        }
    }
    Ok(matches)
}

/// validates the service dataset and runs the matcher, failing when no
/// assignment survives the cutoff.
pub fn prepare_school_stop_mapping(
    services: &ServiceTable,
    students: &StudentTable,
    score_cutoff: u32,
) -> Result<Vec<StopSchoolMatch>, AccessError> {
    if !services.has_any_geometry() {
        return Err(AccessError::ConfigurationError(String::from(
            "school bus services dataset lacks geometry; stops cannot be mapped to the walk graph",
        )));
    }
    let matches = match_school_names(services, students, score_cutoff)?;
    if matches.is_empty() {
        return Err(AccessError::NoMatches(format!(
            "no stop-to-school assignment scored at or above {score_cutoff}; lower the cutoff or inspect the text columns"
        )));
    }
    log::info!(
        "matched {} stop-to-school assignments at cutoff {}",
        matches.len(),
        score_cutoff
    );
    Ok(matches)
}

/// best-scoring choice for a query. choices are scanned in their given
/// order and only a strictly greater score replaces the incumbent, so the
/// scorer's first-best ordering is authoritative on ties.
fn extract_one<'a>(query: &str, choices: &'a [String]) -> Option<(&'a String, u32)> {
    let mut best: Option<(&'a String, u32)> = None;
    for choice in choices.iter() {
        let score = fuzzy::wratio(query, choice) as u32;
        match best {
            Some((_, incumbent)) if score <= incumbent => {}
            _ => best = Some((choice, score)),
        }
    }
    best
}
