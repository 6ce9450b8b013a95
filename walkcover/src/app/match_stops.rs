use crate::config::AccessConfiguration;
use crate::model::demand::StudentTable;
use crate::model::error::AccessError;
use crate::model::io::csv_ops;
use crate::model::matching::match_ops;
use crate::model::service::ServiceTable;

/// the `match` stage: fuzzy-assign service stops to schools and write
/// the match table for downstream stages.
pub fn run(
    services_path: &str,
    students_path: &str,
    output_path: &str,
    conf: &AccessConfiguration,
) -> Result<(), AccessError> {
    log::info!("matching service stops to schools (cutoff {})", conf.score_cutoff);
    let services = ServiceTable::from_geojson_path(services_path)?;
    let students = StudentTable::from_csv_path(students_path)?;
    let matches = match_ops::prepare_school_stop_mapping(&services, &students, conf.score_cutoff)?;
    csv_ops::write_csv(output_path, &matches)?;
    log::info!("wrote {} matches to {output_path}", matches.len());
    Ok(())
}
