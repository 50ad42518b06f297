//! Station listing and nearest-neighbour ranking.

use crate::distance::{haversine_km, round_km};
use crate::domain::{Coord, Station};

/// A station that has a usable position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub station: &'a Station,
    pub position: Coord,
}

/// Stations with geometry, in layer order. Ids are left untouched.
pub fn located(stations: &[Station]) -> impl Iterator<Item = Located<'_>> {
    stations.iter().filter_map(|station| {
        station.position.map(|position| Located { station, position })
    })
}

/// A ranked station with its distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour<'a> {
    pub located: Located<'a>,
    /// Kilometres, rounded to whole metres
    pub distance_km: f64,
}

/// Rank every located station by distance to `origin` and keep the first `n`.
///
/// Ordering is by rounded distance; the sort is stable so ties keep layer
/// order. A count larger than the number of located stations returns all
/// of them. Zero returns none, and a negative count drops that many of the
/// farthest stations.
pub fn nearest(stations: &[Station], origin: Coord, n: i64) -> Vec<Neighbour<'_>> {
    let mut ranked: Vec<Neighbour<'_>> = located(stations)
        .map(|located| Neighbour {
            located,
            distance_km: round_km(haversine_km(
                origin.lat,
                origin.lon,
                located.position.lat,
                located.position.lon,
            )),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    ranked.truncate(keep_count(ranked.len(), n));
    ranked
}

/// How many of `len` ranked results a count of `n` keeps.
fn keep_count(len: usize, n: i64) -> usize {
    match usize::try_from(n) {
        Ok(keep) => keep.min(len),
        Err(_) => {
            let drop = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
            len.saturating_sub(drop)
        }
    }
}
