use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::common::{id_of, run_app_test};

#[tokio::test]
async fn live_filter() {
    run_app_test(|app| async move {
        let live = app.add_match("football", Utc::now()).await?;
        let finished = app
            .add_match("football", Utc::now() - Duration::days(2))
            .await?;

        let all = app.get_json("matches").await?;
        assert_eq!(all.as_array().map(Vec::len), Some(2));

        let only_live = app.get_json("matches?live=true").await?;
        let ids = only_live
            .as_array()
            .expect("list")
            .iter()
            .map(id_of)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![live]);
        assert!(!ids.contains(&finished));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn basketball_filter_includes_other_sports() {
    run_app_test(|app| async move {
        let football = app.add_match("football", Utc::now()).await?;
        let tennis = app.add_match("tennis", Utc::now()).await?;

        let list = app.get_json("matches?category=basketball").await?;
        let ids = list
            .as_array()
            .expect("list")
            .iter()
            .map(id_of)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![tennis]);

        let list = app.get_json("matches?category=football").await?;
        let ids = list
            .as_array()
            .expect("list")
            .iter()
            .map(id_of)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![football]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn match_details_include_teams_and_stats() {
    run_app_test(|app| async move {
        let game = app.add_match("football", Utc::now()).await?;
        app.create(&format!("matches/{game}/stats"), json!({ "name": "Shots" }))
            .await?;

        let output: Value = app.get_json(&format!("matches/{game}")).await?;
        assert_eq!(output["team1"]["name"], "Arsenal");
        assert_eq!(output["team2"]["name"], "Chelsea");
        assert_eq!(output["league"], "Premier");
        assert_eq!(output["stats"][0]["name"], "Shots");
        assert_eq!(output["stats"][0]["first"], 0);

        let by_team = app.get_json("matches/team/Chelsea").await?;
        assert_eq!(by_team.as_array().map(Vec::len), Some(1));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn match_with_unknown_team_not_found() {
    run_app_test(|app| async move {
        let league = app.add_league("Premier", "football").await?;
        let team = app.add_team("Arsenal", "football", &league).await?;
        let missing = sports_hub_db::object_id::TeamId::new().to_string();

        let response = app
            .user
            .client
            .post("matches")
            .json(&json!({
                "type": "football",
                "team1": team,
                "team2": missing,
                "league": league,
                "date": Utc::now(),
            }))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 404);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn lineups_replaced_on_update() {
    run_app_test(|app| async move {
        let league = app.add_league("Premier", "football").await?;
        let team1 = app.add_team("Arsenal", "football", &league).await?;
        let team2 = app.add_team("Chelsea", "football", &league).await?;
        let player = app
            .create(
                "players",
                json!({
                    "name": "Bukayo Saka",
                    "age": 21,
                    "height": 178,
                    "weight": 72.0,
                    "nationality": "England",
                }),
            )
            .await?;
        let position = app
            .create(
                "team_positions",
                json!({ "team": team1, "player": id_of(&player), "position": "Winger" }),
            )
            .await?;

        let mut input = json!({
            "type": "football",
            "team1": team1,
            "team2": team2,
            "league": league,
            "date": Utc::now(),
            "player1": [id_of(&position)],
        });
        let game = app.create("matches", input.clone()).await?;
        assert_eq!(game["player1"][0]["player"]["name"], "Bukayo Saka");
        assert_eq!(game["player1"][0]["position"], "Winger");
        assert_eq!(game["sub1"], json!([]));

        input["player1"] = json!([]);
        input["sub1"] = json!([id_of(&position)]);
        let response = app
            .user
            .client
            .put(&format!("matches/{}", id_of(&game)))
            .json(&input)
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200);
        let game: Value = response.json().await?;
        assert_eq!(game["player1"], json!([]));
        assert_eq!(game["sub1"][0]["position"], "Winger");
        Ok(())
    })
    .await
}
