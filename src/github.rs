use crate::errors::{AppError, AppResult};
use crate::models::ActivityMap;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    login: &'a str,
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Week {
    contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionDay {
    date: String,
    contribution_count: u64,
}

/// Client for the contributions calendar of a GitHub user.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubSource {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    /// Fetches the last year of daily contribution counts ending at `now`.
    pub async fn fetch(&self, login: &str, now: DateTime<Utc>) -> AppResult<ActivityMap> {
        let request = GraphqlRequest {
            query: CONTRIBUTIONS_QUERY,
            variables: Variables {
                login,
                from: (now - Duration::days(365)).to_rfc3339_opts(SecondsFormat::Secs, true),
                to: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        };
        debug!(url = %self.api_url, login, "querying contributions calendar");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .header(USER_AGENT, concat!("commit_thief/", env!("CARGO_PKG_VERSION")))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unavailable>".to_string());
            return Err(AppError::data_unavailable(format!(
                "contributions query failed ({status}): {body}"
            )));
        }

        let body = response.bytes().await?;
        let activity = parse_response(&body)?;
        info!(days = activity.len(), "fetched contribution calendar");
        Ok(activity)
    }
}

/// Decodes a raw GraphQL body. A body that does not match the calendar shape is malformed.
pub fn parse_response(body: &[u8]) -> AppResult<ActivityMap> {
    let response: GraphqlResponse =
        serde_json::from_slice(body).map_err(|err| AppError::malformed(err.to_string()))?;
    activity_from_response(response)
}

pub fn activity_from_response(response: GraphqlResponse) -> AppResult<ActivityMap> {
    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(AppError::data_unavailable(messages.join("; ")));
    }

    let user = response
        .data
        .and_then(|data| data.user)
        .ok_or_else(|| AppError::data_unavailable("no such user"))?;

    let days: Vec<_> = user
        .contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| (day.date, day.contribution_count))
        .collect();
    if days.is_empty() {
        return Err(AppError::data_unavailable("contribution calendar is empty"));
    }

    ActivityMap::from_iso_pairs(days)
}
