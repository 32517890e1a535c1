use serde::Serialize;

use crate::format::{ScoreBadge, ScoreKind, format_runtime, image_url, review_url};
use crate::model::{MovieInfo, MovieSummary, Score, TheatreChain};

/// Critic or audience score as shown next to its icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePanel {
    pub kind: ScoreKind,
    pub score: String,
    pub count: Option<String>,
    pub badge: Option<ScoreBadge>,
    pub review_url: Option<String>,
}

impl ScorePanel {
    fn new(kind: ScoreKind, score: &Score, reviews: Option<&str>) -> Self {
        Self {
            kind,
            score: score.score.clone(),
            count: score.count.clone(),
            badge: ScoreBadge::classify(kind, &score.score),
            review_url: reviews.map(|base| review_url(base, kind)),
        }
    }
}

/// Score panels are only shown once there is a critic score.
pub fn score_panels(info: &MovieInfo) -> Vec<ScorePanel> {
    let Some(critic) = info.tomato.tomato_score.as_ref() else {
        return Vec::new();
    };
    let reviews = info.review_url.as_deref();

    let mut panels = vec![ScorePanel::new(ScoreKind::Critic, critic, reviews)];
    if let Some(audience) = info.tomato.audience_score.as_ref() {
        panels.push(ScorePanel::new(ScoreKind::Audience, audience, reviews));
    }
    panels
}

/// A movie as it appears on the "now showing" page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub genre: Option<String>,
    pub runtime: Option<String>,
    pub rating: Option<String>,
    pub overview: Option<String>,
    pub image_url: Option<String>,
    pub scores: Vec<ScorePanel>,
    pub theatres: Vec<TheatreChain>,
    pub cinema_count: usize,
}

impl MovieCard {
    pub fn new(movie: &MovieSummary) -> Self {
        let info = &movie.detail.info;
        Self {
            id: movie.id,
            slug: movie.slug.clone(),
            title: info.title.clone(),
            genre: info.genres.first().map(|g| g.name.clone()),
            runtime: (info.runtime > 0).then(|| format_runtime(info.runtime)),
            rating: info.tomato.rating.clone(),
            overview: info.overview.clone(),
            image_url: info.image_path().map(image_url),
            scores: score_panels(info),
            theatres: info.theatres.clone(),
            cinema_count: movie.detail.cinemas.len(),
        }
    }

    /// Path of the movie's detail page.
    pub fn href(&self) -> String {
        format!("/movies/{}", self.slug)
    }
}

/// Cards for every movie still showing somewhere, most widely shown first.
///
/// Movies are stable-sorted ascending by cinema count and the result
/// reversed, so equally shown movies come out in reverse listing order.
pub fn build_listing(movies: &[MovieSummary]) -> Vec<MovieCard> {
    let mut cards: Vec<MovieCard> = movies.iter().map(MovieCard::new).collect();
    cards.sort_by_key(|c| c.cinema_count);
    cards.reverse();
    cards.retain(|c| c.cinema_count > 0);

    tracing::debug!(movies = movies.len(), shown = cards.len(), "built listing");
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CinemaShowtimes, Genre, MovieDetail, TomatoData};

    fn cinema(name: &str) -> CinemaShowtimes {
        CinemaShowtimes {
            name: name.to_string(),
            chain: TheatreChain::Shaw,
            timings: Vec::new(),
        }
    }

    fn movie(id: u64, cinemas: usize) -> MovieSummary {
        MovieSummary {
            id,
            slug: format!("movie-{}", id),
            detail: MovieDetail {
                info: MovieInfo {
                    title: format!("Movie {}", id),
                    ..Default::default()
                },
                cinemas: (0..cinemas).map(|i| cinema(&format!("Hall {}", i))).collect(),
            },
        }
    }

    fn score(score: &str, count: &str) -> Option<Score> {
        Some(Score {
            score: score.to_string(),
            count: Some(count.to_string()),
        })
    }

    #[test]
    fn most_widely_shown_first_and_empty_dropped() {
        let movies = vec![movie(1, 2), movie(2, 0), movie(3, 5), movie(4, 2)];
        let ids: Vec<u64> = build_listing(&movies).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4, 1]);
    }

    #[test]
    fn card_fields() {
        let mut m = movie(7, 1);
        m.detail.info = MovieInfo {
            title: "The Matrix Resurrections".to_string(),
            runtime: 148,
            genres: vec![
                Genre {
                    id: 28,
                    name: "Action".to_string(),
                },
                Genre {
                    id: 12,
                    name: "Adventure".to_string(),
                },
            ],
            poster_path: Some("/poster.jpg".to_string()),
            tomato: TomatoData {
                rating: Some("NC16".to_string()),
                ..Default::default()
            },
            theatres: vec![TheatreChain::Gv, TheatreChain::Cathay],
            ..Default::default()
        };
        let card = MovieCard::new(&m);

        assert_eq!(card.href(), "/movies/movie-7");
        assert_eq!(card.genre.as_deref(), Some("Action"));
        assert_eq!(card.runtime.as_deref(), Some("2h 28m"));
        assert_eq!(card.rating.as_deref(), Some("NC16"));
        assert_eq!(
            card.image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/poster.jpg")
        );
        assert!(card.scores.is_empty());
        assert_eq!(card.theatres, vec![TheatreChain::Gv, TheatreChain::Cathay]);
    }

    #[test]
    fn zero_runtime_has_no_label() {
        assert_eq!(MovieCard::new(&movie(1, 1)).runtime, None);
    }

    #[test]
    fn score_panels_need_a_critic_score() {
        let mut info = MovieInfo {
            review_url: Some("https://www.rottentomatoes.com/m/matrix/reviews".to_string()),
            ..Default::default()
        };
        info.tomato.audience_score = score("63", "2,500+");
        assert!(score_panels(&info).is_empty());

        info.tomato.tomato_score = score("90", "167");
        let panels = score_panels(&info);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].badge, Some(ScoreBadge::Certified));
        assert_eq!(
            panels[0].review_url.as_deref(),
            Some("https://www.rottentomatoes.com/m/matrix/reviews?type=top_critics")
        );
        assert_eq!(panels[1].kind, ScoreKind::Audience);
        assert_eq!(panels[1].badge, Some(ScoreBadge::AudienceCertified));
    }
}
