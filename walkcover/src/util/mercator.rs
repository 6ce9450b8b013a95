use geo::Point;

const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// projects a WGS84 point to web-mercator meters. adequate as a locally
/// metric frame for neighbor-radius queries at city scale.
pub fn to_mercator(p: Point<f64>) -> Point<f64> {
    let x = EARTH_RADIUS_M * p.x().to_radians();
    let lat = p.y().to_radians();
    let y = EARTH_RADIUS_M * ((std::f64::consts::FRAC_PI_4 + lat / 2.0).tan()).ln();
    Point::new(x, y)
}
