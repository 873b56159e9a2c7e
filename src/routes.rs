use crate::error::{DashboardError, ErrorResponse};
use crate::{pages, params, Dashboard};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

type ApiResult = std::result::Result<Response, ErrorResponse>;

/// Every query parameter any route understands; each route reads the ones it needs
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiQuery {
    pub date: Option<String>,
    pub league: Option<String>,
    pub limit: Option<String>,
    pub division: Option<String>,
    pub team_id: Option<String>,
    pub team1_id: Option<String>,
    pub team2_id: Option<String>,
}

impl ApiQuery {
    /// Pages render with defaults when the query string cannot be read
    pub fn lenient(query: Result<Query<ApiQuery>, QueryRejection>) -> ApiQuery {
        query.map(|Query(query)| query).unwrap_or_default()
    }
}

/// A query string that does not deserialize (e.g. a repeated parameter) is a 400 with the JSON error body
fn api_query(query: Result<Query<ApiQuery>, QueryRejection>, failure: &str) -> Result<ApiQuery, ErrorResponse> {
    query.map(|Query(query)| query).map_err(|rejection| {
        ErrorResponse::from_error(DashboardError::InvalidParameter(rejection.body_text()), failure)
    })
}

/// JSON body with a Cache-Control header. `None` means never cache.
fn json_response<T: Serialize>(max_age: Option<u32>, body: T) -> Response {
    let cache_control = match max_age {
        Some(seconds) => format!("public, max-age={}", seconds),
        None => "no-store".to_string(),
    };
    ([(header::CACHE_CONTROL, cache_control)], Json(body)).into_response()
}

async fn scores(State(dashboard): State<Dashboard>) -> ApiResult {
    let scoreboard = dashboard
        .scores()
        .await
        .map_err(|e| ErrorResponse::from_error(e, "Failed to fetch scores"))?;
    Ok(json_response(Some(60), scoreboard))
}

async fn standings(State(dashboard): State<Dashboard>) -> ApiResult {
    let standings = dashboard
        .standings()
        .await
        .map_err(|e| ErrorResponse::from_error(e, "Failed to fetch standings data"))?;
    Ok(json_response(None, standings))
}

async fn stats(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult {
    let failure = "Failed to fetch stats data";
    let query = api_query(query, failure)?;
    let league = params::parse_league_filter(query.league.as_deref())
        .map_err(|e| ErrorResponse::from_error(e, failure))?;
    let limit =
        params::parse_limit(query.limit.as_deref()).map_err(|e| ErrorResponse::from_error(e, failure))?;

    let leaders = dashboard
        .stat_leaders(league, limit)
        .await
        .map_err(|e| ErrorResponse::from_error(e, failure))?;
    Ok(json_response(None, leaders))
}

async fn schedule(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult {
    let failure = "Failed to fetch schedule data";
    let query = api_query(query, failure)?;
    let date =
        params::parse_date(query.date.as_deref()).map_err(|e| ErrorResponse::from_error(e, failure))?;

    let schedule = dashboard
        .schedule(date)
        .await
        .map_err(|e| ErrorResponse::from_error(e, failure))?;
    Ok(json_response(None, schedule))
}

async fn news(State(dashboard): State<Dashboard>) -> ApiResult {
    let news = dashboard
        .news()
        .await
        .map_err(|e| ErrorResponse::from_error(e, "Failed to fetch news"))?;
    Ok(json_response(Some(300), json!({ "news": news })))
}

async fn teams(State(dashboard): State<Dashboard>) -> ApiResult {
    let teams = dashboard
        .teams()
        .await
        .map_err(|e| ErrorResponse::from_error(e, "Failed to fetch teams data"))?;
    Ok(json_response(Some(3600), json!({ "teams": teams })))
}

async fn team_details(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult {
    let failure = "Failed to fetch team details";
    let query = api_query(query, failure)?;
    let team_id =
        params::require_team_id(query.team_id.as_deref()).map_err(|e| ErrorResponse::from_error(e, failure))?;

    let details = dashboard
        .team_details(&team_id)
        .await
        .map_err(|e| ErrorResponse::from_error(e, failure))?;
    Ok(json_response(None, details))
}

async fn matchup(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult {
    let failure = "Failed to fetch matchup data";
    let query = api_query(query, failure)?;
    let (team1_id, team2_id) =
        params::require_matchup_ids(query.team1_id.as_deref(), query.team2_id.as_deref())
            .map_err(|e| ErrorResponse::from_error(e, failure))?;

    let matchup = dashboard
        .matchup(team1_id, team2_id)
        .await
        .map_err(|e| ErrorResponse::from_error(e, failure))?;
    Ok(json_response(None, matchup))
}

/// The full application: JSON API, HTML pages and static assets
pub fn app(dashboard: Dashboard) -> Router {
    let static_dir = dashboard.config().static_dir.clone();

    Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/api/scores", get(scores))
        .route("/api/standings", get(standings))
        .route("/api/stats", get(stats))
        .route("/api/schedule", get(schedule))
        .route("/api/news", get(news))
        .route("/api/teams", get(teams))
        .route("/api/team-details", get(team_details))
        .route("/api/matchup", get(matchup))
        .merge(pages::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn app_for(base_url: &str) -> Router {
        app(Dashboard::new(Config::with_upstream(base_url, 2025)))
    }

    /// An app whose upstream refuses connections; only validation can succeed
    fn offline_app() -> Router {
        app_for("http://127.0.0.1:9")
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = send(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn schedule_game(pk: u64, date: &str, away: (u32, u32), home: (u32, u32), code: &str) -> Value {
        let abstract_state = if code == "F" { "Final" } else { "Preview" };
        json!({
            "gamePk": pk,
            "gameDate": format!("{}T23:05:00Z", date),
            "officialDate": date,
            "status": { "abstractGameState": abstract_state, "detailedState": abstract_state, "statusCode": code },
            "teams": {
                "away": { "team": { "id": away.0, "name": format!("Team {}", away.0) }, "score": away.1 },
                "home": { "team": { "id": home.0, "name": format!("Team {}", home.0) }, "score": home.1 }
            }
        })
    }

    fn split(name: &str, stat: Value) -> Value {
        json!({
            "player": { "id": 1, "fullName": name },
            "team": { "id": 147, "name": "New York Yankees" },
            "stat": stat
        })
    }

    #[test]
    fn test_json_response_cache_headers() {
        let response = json_response(Some(60), json!({ "games": [] }));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=60"
        );

        let response = json_response(None, json!({}));
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }

    #[test]
    fn test_query_uses_camel_case_names() {
        let query: ApiQuery =
            serde_json::from_value(json!({ "team1Id": "147", "team2Id": "111", "teamId": "10" })).unwrap();
        assert_eq!(query.team1_id.as_deref(), Some("147"));
        assert_eq!(query.team2_id.as_deref(), Some("111"));
        assert_eq!(query.team_id.as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn test_team_details_requires_team_id() {
        let (status, body) = get_json(offline_app(), "/api/team-details").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Team ID is required");
    }

    #[tokio::test]
    async fn test_matchup_requires_both_ids() {
        let (status, body) = get_json(offline_app(), "/api/matchup?team1Id=147").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Both team IDs are required");

        let (status, _) = get_json(offline_app(), "/api/matchup?team1Id=147&team2Id=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_repeated_parameter_is_json_400() {
        let (status, headers, body) =
            send(offline_app(), "/api/matchup?team1Id=147&team1Id=111&team2Id=110").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_page_ignores_unreadable_query() {
        let (status, _, body) = send(offline_app(), "/standings?league=AL&league=NL").await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Failed to load standings"));
    }

    #[tokio::test]
    async fn test_stats_rejects_bad_limit() {
        let (status, body) = get_json(offline_app(), "/api/stats?limit=500").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Limit"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scoreboard"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let (status, body) = get_json(app_for(&mock_server.uri()), "/api/scores").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch scores");
        assert!(!body["details"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_matchup_record_counts_finished_games() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedule"))
            .and(query_param("teamId", "147"))
            .and(query_param("season", "2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dates": [
                    { "date": "2025-04-01", "games": [schedule_game(1, "2025-04-01", (111, 3), (147, 5), "F")] },
                    { "date": "2025-04-02", "games": [schedule_game(2, "2025-04-02", (111, 4), (147, 2), "F")] },
                    { "date": "2025-05-10", "games": [schedule_game(3, "2025-05-10", (147, 7), (111, 1), "F")] },
                    { "date": "2025-05-11", "games": [schedule_game(4, "2025-05-11", (141, 0), (147, 9), "F")] },
                    { "date": "2025-09-01", "games": [schedule_game(5, "2025-09-01", (147, 0), (111, 0), "S")] }
                ]
            })))
            .mount(&mock_server)
            .await;

        let (status, body) =
            get_json(app_for(&mock_server.uri()), "/api/matchup?team1Id=147&team2Id=111").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record"]["team1Wins"], 2);
        assert_eq!(body["record"]["team2Wins"], 1);
        assert_eq!(body["season"], 2025);

        let games = body["games"].as_array().unwrap();
        assert_eq!(games.len(), 4);
        assert!(games
            .iter()
            .all(|g| g["away"]["teamId"] == 111 || g["home"]["teamId"] == 111));
    }

    #[tokio::test]
    async fn test_schedule_only_returns_requested_date() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedule"))
            .and(query_param("date", "2025-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalGames": 3,
                "dates": [
                    { "date": "2025-05-31", "games": [schedule_game(1, "2025-05-31", (147, 1), (111, 2), "F")] },
                    { "date": "2025-06-01", "games": [schedule_game(2, "2025-06-01", (147, 0), (111, 0), "S")] },
                    { "date": "2025-06-02", "games": [schedule_game(3, "2025-06-02", (147, 0), (111, 0), "S")] }
                ]
            })))
            .mount(&mock_server)
            .await;

        let (status, body) = get_json(app_for(&mock_server.uri()), "/api/schedule?date=2025-06-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2025-06-01");
        assert_eq!(body["totalGames"], 1);
        assert_eq!(body["games"][0]["gamePk"], 2);
    }

    #[tokio::test]
    async fn test_stats_are_sorted_and_limited() {
        let mock_server = MockServer::start().await;
        let splits = json!({ "stats": [{ "splits": [
            split("A", json!({ "avg": ".280", "homeRuns": 12, "rbi": 40, "era": "3.10", "wins": 8, "strikeOuts": 120 })),
            split("B", json!({ "avg": ".312", "homeRuns": 30, "rbi": 88, "era": "2.45", "wins": 12, "strikeOuts": 180 })),
            split("C", json!({ "avg": ".295", "homeRuns": 21, "rbi": 61, "era": "4.02", "wins": 5, "strikeOuts": 95 })),
            split("D", json!({ "avg": ".000", "homeRuns": 0, "rbi": 0, "era": "0.00", "wins": 0, "strikeOuts": 0 }))
        ]}]});
        Mock::given(method("GET"))
            .and(path("/stats"))
            .and(query_param("leagueId", "103"))
            .respond_with(ResponseTemplate::new(200).set_body_json(splits))
            .mount(&mock_server)
            .await;

        let (status, body) = get_json(app_for(&mock_server.uri()), "/api/stats?league=AL&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["league"], "AL");

        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 6);
        for category in categories {
            assert!(category["leaders"].as_array().unwrap().len() <= 2);
        }

        let by_key = |key: &str| {
            categories
                .iter()
                .find(|c| c["key"] == key)
                .unwrap()["leaders"]
                .as_array()
                .unwrap()
                .iter()
                .map(|l| l["playerName"].as_str().unwrap().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(by_key("avg"), vec!["B", "C"]);
        assert_eq!(by_key("era"), vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_news_is_cacheable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [{ "headline": "Opening Day", "description": "Baseball is back" }]
            })))
            .mount(&mock_server)
            .await;

        let (status, headers, body) = send(app_for(&mock_server.uri()), "/api/news").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "public, max-age=300");

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["news"][0]["title"], "Opening Day");
    }

    fn standings_body(team_id: u32, name: &str, division_id: u32) -> Value {
        json!({ "records": [{
            "division": { "id": division_id, "name": "Division" },
            "teamRecords": [{
                "team": { "id": team_id, "name": name },
                "wins": 90, "losses": 72,
                "winningPercentage": ".556", "gamesBack": "-",
                "divisionRank": "1",
                "streak": { "streakCode": "W2" }
            }]
        }]})
    }

    #[tokio::test]
    async fn test_standings_returns_both_leagues() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("leagueId", "103"))
            .respond_with(ResponseTemplate::new(200).set_body_json(standings_body(147, "New York Yankees", 201)))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("leagueId", "104"))
            .respond_with(ResponseTemplate::new(200).set_body_json(standings_body(119, "Los Angeles Dodgers", 203)))
            .mount(&mock_server)
            .await;

        let (status, headers, body) = send(app_for(&mock_server.uri()), "/api/standings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["americanLeague"]["divisions"][0]["teams"][0]["name"], "New York Yankees");
        assert_eq!(body["nationalLeague"]["divisions"][0]["teams"][0]["name"], "Los Angeles Dodgers");
    }

    #[tokio::test]
    async fn test_standings_fails_when_one_league_fails() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("leagueId", "103"))
            .respond_with(ResponseTemplate::new(200).set_body_json(standings_body(147, "New York Yankees", 201)))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("leagueId", "104"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let (status, body) = get_json(app_for(&mock_server.uri()), "/api/standings").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch standings data");
        assert!(body.get("americanLeague").is_none());
    }

    #[tokio::test]
    async fn test_stats_fail_when_one_category_fails() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .and(query_param("group", "hitting"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stats": [{ "splits": [
                split("A", json!({ "avg": ".301", "homeRuns": 20, "rbi": 70 }))
            ]}]})))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .and(query_param("group", "pitching"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let (status, body) = get_json(app_for(&mock_server.uri()), "/api/stats").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch stats data");
        assert!(body.get("categories").is_none());
    }

    async fn mount_team_details(mock_server: &MockServer, roster_status: u16) {
        Mock::given(method("GET"))
            .and(path("/teams/10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "team": {
                    "id": "10",
                    "displayName": "New York Yankees",
                    "abbreviation": "NYY",
                    "location": "New York",
                    "name": "Yankees",
                    "color": "003087"
                }
            })))
            .mount(mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/schedule"))
            .and(query_param("teamId", "147"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dates": [
                    { "date": "2025-04-01", "games": [schedule_game(1, "2025-04-01", (111, 3), (147, 5), "F")] },
                    { "date": "2099-04-01", "games": [schedule_game(2, "2099-04-01", (147, 0), (111, 0), "S")] }
                ]
            })))
            .mount(mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/teams/147/roster"))
            .respond_with(ResponseTemplate::new(roster_status).set_body_json(json!({
                "roster": [{
                    "person": { "id": 592450, "fullName": "Aaron Judge" },
                    "jerseyNumber": "99",
                    "position": { "name": "Outfielder", "abbreviation": "RF" }
                }]
            })))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_team_details_joins_espn_and_mlb_ids() {
        let mock_server = MockServer::start().await;
        mount_team_details(&mock_server, 200).await;

        let (status, body) = get_json(app_for(&mock_server.uri()), "/api/team-details?teamId=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["teamInfo"]["name"], "New York Yankees");
        assert_eq!(body["roster"][0]["fullName"], "Aaron Judge");
        assert_eq!(body["rosterGroups"]["outfielders"][0]["jerseyNumber"], "99");
        assert_eq!(body["lastGames"][0]["gamePk"], 1);
        assert_eq!(body["nextGame"]["gamePk"], 2);
    }

    #[tokio::test]
    async fn test_team_details_fails_when_roster_fails() {
        let mock_server = MockServer::start().await;
        mount_team_details(&mock_server, 502).await;

        let (status, body) = get_json(app_for(&mock_server.uri()), "/api/team-details?teamId=10").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch team details");
        assert!(body.get("roster").is_none());
    }

    #[tokio::test]
    async fn test_teams_are_cacheable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sports": [{ "leagues": [{ "teams": [
                    { "team": { "id": "10", "displayName": "New York Yankees", "abbreviation": "NYY" } }
                ]}]}]
            })))
            .mount(&mock_server)
            .await;

        let (status, headers, body) = send(app_for(&mock_server.uri()), "/api/teams").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "public, max-age=3600");

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["teams"][0]["abbr"], "NYY");
        assert_eq!(body["teams"][0]["mlbId"], 147);
        assert_eq!(body["teams"][0]["division"], "al-east");
    }

    #[tokio::test]
    async fn test_scores_page_shows_widget_error() {
        let (status, _, body) = send(offline_app(), "/scores").await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Failed to load scores"));
        assert!(html.contains("Try Again"));
    }
}
