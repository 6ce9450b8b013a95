use super::CandidateStop;
use crate::model::cell::{CellCode, PopulationCell};
use crate::util::mercator;
use geo::{Distance, Euclidean, Point};
use std::collections::HashMap;

/// greedy density-maximizing set-cover approximation for new stop
/// placement.
///
/// underserved cells (coverage fraction below 1.0 at the threshold; cells
/// absent from the coverage table count as 0.0) are projected to a metric
/// frame. each round picks the cell with the most underserved neighbors
/// within the walk radius (inclusive, self counted; ties go to the first
/// cell in input order) and removes every cell strictly within the radius
/// disk of the pick. a cell exactly on the boundary survives and stays
/// eligible. stops after `max_new_stops` rounds or when no cell remains.
pub fn greedy_new_stop_candidates(
    cell_coverage: &HashMap<CellCode, f64>,
    cells: &[PopulationCell],
    threshold_min: u32,
    max_new_stops: usize,
    walk_speed_mps: f64,
) -> Vec<CandidateStop> {
    let underserved: Vec<&PopulationCell> = cells
        .iter()
        .filter(|cell| cell_coverage.get(&cell.code).copied().unwrap_or(0.0) < 1.0)
        .collect();
    if underserved.is_empty() {
        log::info!("all cells fully covered at {threshold_min} min; no candidates proposed");
        return vec![];
    }

    let radius_m = f64::from(threshold_min) * 60.0 * walk_speed_mps;
    let projected: Vec<Point<f64>> = underserved
        .iter()
        .map(|cell| mercator::to_mercator(Point::new(cell.x, cell.y)))
        .collect();

    let chosen = greedy_pick(&projected, radius_m, max_new_stops);
    log::info!(
        "proposed {} candidate stops for {} underserved cells",
        chosen.len(),
        underserved.len()
    );
    let reason = format!("improve <= {threshold_min} min walk coverage");
    chosen
        .into_iter()
        .map(|index| CandidateStop {
            lon: underserved[index].x,
            lat: underserved[index].y,
            reason: reason.clone(),
        })
        .collect()
}

/// the greedy rounds over pre-projected metric points. returns indices of
/// the picked points in input order of the rounds.
fn greedy_pick(points: &[Point<f64>], radius_m: f64, max_new_stops: usize) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut chosen: Vec<usize> = vec![];

    for _ in 0..max_new_stops {
        let mut best: Option<(usize, usize)> = None; // (index, neighbor count)
        for candidate in remaining.iter() {
            let count = remaining
                .iter()
                .filter(|other| {
                    Euclidean.distance(points[*candidate], points[**other]) <= radius_m
                })
                .count();
            let improved = match best {
                Some((_, best_count)) => count > best_count,
                None => true,
            };
            if improved {
                best = Some((*candidate, count));
            }
        }
        let (pick, count) = match best {
            Some(found) if found.1 > 0 => found,
            _ => break,
        };
        chosen.push(pick);

        // strictly-within removal: a cell exactly on the boundary survives
        remaining.retain(|other| Euclidean.distance(points[pick], points[*other]) >= radius_m);
        if remaining.is_empty() {
            break;
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(code: &str, x: f64, y: f64) -> PopulationCell {
        PopulationCell {
            code: CellCode::from(code),
            x,
            y,
        }
    }

    #[test]
    fn fully_covered_region_yields_no_candidates() {
        let cells = vec![cell("801", 149.0, -35.3)];
        let coverage = HashMap::from([(CellCode::from("801"), 1.0)]);
        let candidates = greedy_new_stop_candidates(&coverage, &cells, 10, 10, 1.25);
        assert!(candidates.is_empty());
    }

    #[test]
    fn cells_missing_from_coverage_count_as_underserved() {
        let cells = vec![cell("801", 149.0, -35.3)];
        let coverage: HashMap<CellCode, f64> = HashMap::new();
        let candidates = greedy_new_stop_candidates(&coverage, &cells, 10, 10, 1.25);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].reason, "improve <= 10 min walk coverage");
    }

    #[test]
    fn never_proposes_more_than_max_new_stops() {
        // four far-apart clusters, budget of two
        let cells = vec![
            cell("1", 149.00, -35.30),
            cell("2", 149.10, -35.30),
            cell("3", 149.20, -35.30),
            cell("4", 149.30, -35.30),
        ];
        let coverage: HashMap<CellCode, f64> = HashMap::new();
        let candidates = greedy_new_stop_candidates(&coverage, &cells, 10, 2, 1.25);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn terminates_early_when_everything_is_covered() {
        // one tight cluster, generous budget
        let cells = vec![
            cell("1", 149.000, -35.300),
            cell("2", 149.001, -35.300),
            cell("3", 149.002, -35.300),
        ];
        let coverage: HashMap<CellCode, f64> = HashMap::new();
        let candidates = greedy_new_stop_candidates(&coverage, &cells, 10, 100, 1.25);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn densest_cell_is_picked_first() {
        // a pair of near cells and one isolated cell: the pair wins round one
        let cells = vec![
            cell("lonely", 149.20, -35.30),
            cell("pair_a", 149.000, -35.300),
            cell("pair_b", 149.001, -35.300),
        ];
        let coverage: HashMap<CellCode, f64> = HashMap::new();
        let candidates = greedy_new_stop_candidates(&coverage, &cells, 10, 1, 1.25);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lon, 149.000);
    }

    #[test]
    fn boundary_cell_survives_removal_and_seeds_second_candidate() {
        // two points exactly one radius apart in the metric frame
        let radius = 10.0 * 60.0 * 1.25;
        let points = vec![Point::new(0.0, 0.0), Point::new(radius, 0.0)];
        let chosen = greedy_pick(&points, radius, 10);
        assert_eq!(chosen, vec![0, 1]);
    }

    #[test]
    fn interior_cell_is_removed() {
        let radius = 10.0 * 60.0 * 1.25;
        let points = vec![Point::new(0.0, 0.0), Point::new(radius * 0.5, 0.0)];
        let chosen = greedy_pick(&points, radius, 10);
        assert_eq!(chosen, vec![0]);
    }

    #[test]
    fn tie_breaks_on_first_in_input_order() {
        let radius = 100.0;
        // two isolated points, each its own cluster of one
        let points = vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.0)];
        let chosen = greedy_pick(&points, radius, 1);
        assert_eq!(chosen, vec![0]);
    }
}
