//! Re-indexes per-cinema showtimes into a date-keyed schedule.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::model::{CinemaShowtimes, DateGroup};

/// Group every upcoming timing by calendar date.
///
/// Timings earlier than `now` are dropped, as are cinemas left without
/// timings for a date and dates left without cinemas. Groups come out in
/// chronological order; cinemas keep their input order and each cinema's
/// timings are ordered by start time.
pub fn build_schedule(cinemas: &[CinemaShowtimes], now: NaiveDateTime) -> Vec<DateGroup> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for timing in cinemas.iter().flat_map(|c| &c.timings) {
        let date = timing.date();
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    let mut groups: Vec<DateGroup> = dates
        .into_iter()
        .filter_map(|date| {
            let cinemas: Vec<CinemaShowtimes> = cinemas
                .iter()
                .filter_map(|cinema| showtimes_on(cinema, date, now))
                .collect();
            if cinemas.is_empty() {
                None
            } else {
                Some(DateGroup { date, cinemas })
            }
        })
        .collect();

    groups.sort_by_key(|g| g.date);

    tracing::debug!(
        cinemas = cinemas.len(),
        dates = groups.len(),
        "built showtime schedule"
    );
    groups
}

fn showtimes_on(
    cinema: &CinemaShowtimes,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Option<CinemaShowtimes> {
    let mut timings: Vec<_> = cinema
        .timings
        .iter()
        .filter(|t| t.date() == date && t.starts_at >= now)
        .cloned()
        .collect();
    if timings.is_empty() {
        return None;
    }
    timings.sort_by_key(|t| t.starts_at);

    Some(CinemaShowtimes {
        name: cinema.name.clone(),
        chain: cinema.chain,
        timings,
    })
}

/// The group for exactly `date`, if any showtimes fall on it.
pub fn find_date(groups: &[DateGroup], date: NaiveDate) -> Option<&DateGroup> {
    groups.iter().find(|g| g.date == date)
}

/// The group shown for a picked date, falling back to the earliest one.
pub fn select_date(groups: &[DateGroup], date: Option<NaiveDate>) -> Option<&DateGroup> {
    date.and_then(|d| find_date(groups, d))
        .or_else(|| groups.first())
}

/// Wall-clock time in the cinemas' local timezone.
pub fn local_now(offset: FixedOffset) -> NaiveDateTime {
    Utc::now().with_timezone(&offset).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TheatreChain, Timing, TimingStatus};

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 12, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn timing(when: NaiveDateTime) -> Timing {
        Timing {
            starts_at: when,
            raw: when.format("%d/%m/%Y %I:%M %p").to_string(),
            status: TimingStatus::Available,
            url: None,
        }
    }

    fn cinema(name: &str, times: &[NaiveDateTime]) -> CinemaShowtimes {
        CinemaShowtimes {
            name: name.to_string(),
            chain: TheatreChain::Gv,
            timings: times.iter().copied().map(timing).collect(),
        }
    }

    #[test]
    fn groups_by_date_with_one_timing_each() {
        let cinemas = vec![cinema("A", &[at(21, 9, 0), at(22, 9, 0)])];
        let groups = build_schedule(&cinemas, at(21, 8, 0));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, at(21, 0, 0).date());
        assert_eq!(groups[1].date, at(22, 0, 0).date());
        for g in &groups {
            assert_eq!(g.cinemas.len(), 1);
            assert_eq!(g.cinemas[0].name, "A");
            assert_eq!(g.cinemas[0].timings.len(), 1);
        }
    }

    #[test]
    fn date_with_only_past_timings_is_omitted() {
        let cinemas = vec![cinema("A", &[at(21, 9, 0), at(22, 9, 0)])];
        let groups = build_schedule(&cinemas, at(21, 10, 0));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, at(22, 0, 0).date());
    }

    #[test]
    fn date_survives_when_another_cinema_still_has_a_slot() {
        let cinemas = vec![
            cinema("A", &[at(21, 9, 0)]),
            cinema("B", &[at(21, 20, 30)]),
        ];
        let groups = build_schedule(&cinemas, at(21, 10, 0));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].cinemas.len(), 1);
        assert_eq!(groups[0].cinemas[0].name, "B");
    }

    #[test]
    fn timing_exactly_at_now_is_kept() {
        let cinemas = vec![cinema("A", &[at(21, 9, 0)])];
        assert_eq!(build_schedule(&cinemas, at(21, 9, 0)).len(), 1);
    }

    #[test]
    fn dates_sorted_chronologically_not_lexically() {
        // "01/01/2022" sorts before "21/12/2021" as a string
        let jan = NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        let cinemas = vec![cinema("A", &[jan, at(21, 13, 0), at(30, 13, 0)])];
        let groups = build_schedule(&cinemas, at(1, 0, 0));

        let dates: Vec<NaiveDate> = groups.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![at(21, 0, 0).date(), at(30, 0, 0).date(), jan.date()]);
    }

    #[test]
    fn cinema_order_is_preserved_and_timings_sorted() {
        let cinemas = vec![
            cinema("Zeta", &[at(21, 21, 0), at(21, 12, 0)]),
            cinema("Alpha", &[at(21, 15, 0)]),
        ];
        let groups = build_schedule(&cinemas, at(21, 0, 0));

        let names: Vec<&str> = groups[0].cinemas.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        let zeta: Vec<NaiveDateTime> = groups[0].cinemas[0]
            .timings
            .iter()
            .map(|t| t.starts_at)
            .collect();
        assert_eq!(zeta, vec![at(21, 12, 0), at(21, 21, 0)]);
    }

    #[test]
    fn empty_input_yields_empty_schedule() {
        assert!(build_schedule(&[], at(21, 0, 0)).is_empty());
        assert!(build_schedule(&[cinema("A", &[])], at(21, 0, 0)).is_empty());
    }

    #[test]
    fn select_date_defaults_to_first_group() {
        let cinemas = vec![cinema("A", &[at(21, 9, 0), at(22, 9, 0)])];
        let groups = build_schedule(&cinemas, at(21, 0, 0));

        let picked = select_date(&groups, Some(at(22, 0, 0).date())).unwrap();
        assert_eq!(picked.date, at(22, 0, 0).date());
        let fallback = select_date(&groups, Some(at(25, 0, 0).date())).unwrap();
        assert_eq!(fallback.date, at(21, 0, 0).date());
        assert_eq!(select_date(&groups, None).unwrap().date, at(21, 0, 0).date());
        assert!(select_date(&[], None).is_none());
    }

    #[test]
    fn find_date_has_no_fallback() {
        let cinemas = vec![cinema("A", &[at(21, 9, 0), at(22, 9, 0)])];
        let groups = build_schedule(&cinemas, at(21, 0, 0));

        assert_eq!(find_date(&groups, at(22, 0, 0).date()).unwrap().date, at(22, 0, 0).date());
        assert!(find_date(&groups, at(25, 0, 0).date()).is_none());
    }
}
