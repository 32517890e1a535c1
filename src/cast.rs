use std::collections::HashMap;

use crate::model::{CastMember, CastSelection};

const MIN_POPULARITY: f64 = 5.0;
const DIRECTOR_JOB: &str = "Director";

/// Pick the director and the popular cast shown on a movie page.
///
/// Cast members need a popularity above 5.0. A repeated name keeps the
/// position of its first appearance but takes the later record. The result
/// is stable-sorted ascending by popularity and then reversed, so ties come
/// out in reverse input order. The last crew entry credited as director wins.
pub fn build_cast_selection(cast: &[CastMember], crew: &[CastMember]) -> CastSelection {
    let mut popular_cast: Vec<CastMember> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for member in cast.iter().filter(|m| m.popularity > MIN_POPULARITY) {
        match index_by_name.get(member.name.as_str()) {
            Some(&i) => popular_cast[i] = member.clone(),
            None => {
                index_by_name.insert(member.name.as_str(), popular_cast.len());
                popular_cast.push(member.clone());
            }
        }
    }

    popular_cast.sort_by(|a, b| a.popularity.total_cmp(&b.popularity));
    popular_cast.reverse();

    let director = crew
        .iter()
        .rev()
        .find(|m| m.job.as_deref() == Some(DIRECTOR_JOB))
        .cloned();

    CastSelection {
        director,
        popular_cast,
    }
}
