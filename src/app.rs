use crate::calendar::build_grid;
use crate::config::{Config, Source};
use crate::errors::AppResult;
use crate::github::GitHubSource;
use crate::models::{ActivityMap, CalendarGrid, SelectedOverlay};
use crate::overlay::select_overlays;
use crate::render::render_svg;
use crate::storage::{load_activity_file, write_document};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Drawing {
    pub grid: CalendarGrid,
    pub overlays: Vec<SelectedOverlay>,
    pub svg: String,
}

/// Builds the grid, picks the overlays and renders the document. No I/O.
pub fn draw<R>(today: NaiveDate, activity: &ActivityMap, rng: &mut R) -> Drawing
where
    R: Rng + ?Sized,
{
    let grid = build_grid(today, activity);
    let overlays = select_overlays(&grid.active_cells, rng);
    let svg = render_svg(&grid, &overlays);
    Drawing {
        grid,
        overlays,
        svg,
    }
}

/// Upper bound of the fetch window: the last second of a pinned `today`, else the current time.
pub fn fetch_window_end(today: Option<NaiveDate>) -> DateTime<Utc> {
    match today {
        Some(date) => {
            date.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::seconds(1)
        }
        None => Utc::now(),
    }
}

pub async fn load_activity(source: &Source, now: DateTime<Utc>) -> AppResult<ActivityMap> {
    match source {
        Source::GitHub {
            user,
            token,
            api_url,
        } => {
            info!(user = %user, "fetching contributions from GitHub");
            GitHubSource::new(api_url.as_str(), token.as_str())
                .fetch(user, now)
                .await
        }
        Source::File(path) => {
            info!(path = %path.display(), "reading activity file");
            load_activity_file(path).await
        }
    }
}

/// Fetches activity, draws it and writes the SVG. Returns the written path.
pub async fn run(config: &Config) -> AppResult<PathBuf> {
    let now = fetch_window_end(config.today);
    let today = config.today.unwrap_or_else(|| now.date_naive());
    let activity = load_activity(&config.source, now).await?;

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let drawing = draw(today, &activity, &mut rng);

    match drawing.grid.latest_date {
        Some(date) => info!(%date, "latest commit day"),
        None => info!("no commits in range"),
    }
    info!(
        start = %drawing.grid.start_date,
        end = %drawing.grid.end_date,
        active = drawing.grid.active_cells.len(),
        overlays = drawing.overlays.len(),
        "built contribution grid"
    );
    for overlay in &drawing.overlays {
        debug!(
            index = overlay.index,
            date = %overlay.position.date,
            count = overlay.position.count,
            animal = overlay.animal.name,
            delay = overlay.delay_seconds,
            "stealing commit"
        );
    }

    write_document(&config.output_path, &drawing.svg).await?;
    Ok(config.output_path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn pinned_today_closes_the_fetch_window() {
        let end = fetch_window_end(Some(today()));
        assert_eq!(end.to_rfc3339(), "2024-06-15T23:59:59+00:00");
        assert_eq!(end.date_naive(), today());
    }

    #[test]
    fn same_inputs_same_drawing() {
        let activity = ActivityMap::from_iso_pairs(
            (1..=30u64).map(|d| (format!("2024-04-{d:02}"), d % 7)),
        )
        .unwrap();
        let first = draw(today(), &activity, &mut SmallRng::seed_from_u64(99));
        let second = draw(today(), &activity, &mut SmallRng::seed_from_u64(99));
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.overlays, second.overlays);
        assert_eq!(first.svg, second.svg);
        assert_eq!(first.overlays.len(), 3);
    }

    #[test]
    fn quiet_year_draws_an_empty_grid() {
        let activity = ActivityMap::from_iso_pairs([("2024-06-01", 0)]).unwrap();
        let drawing = draw(today(), &activity, &mut SmallRng::seed_from_u64(1));
        assert_eq!(drawing.grid.latest_date, None);
        assert!(drawing.overlays.is_empty());
        assert!(drawing.svg.contains("Latest commit: none"));
    }

    #[tokio::test]
    async fn run_writes_the_drawing_from_a_file_source() {
        let dir = std::env::temp_dir().join(format!("commit_thief_run_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("activity.json");
        std::fs::write(&input, r#"{"2024-06-15": 3, "2024-06-10": 7}"#).unwrap();

        let config = Config {
            source: Source::File(input),
            output_path: dir.join("out").join("graph.svg"),
            today: Some(today()),
            seed: Some(5),
        };
        let written = run(&config).await.unwrap();
        let svg = std::fs::read_to_string(&written).unwrap();
        assert!(svg.contains("Latest commit: 2024-06-15"));
        assert!(svg.contains("id=\"animal-0\""));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
