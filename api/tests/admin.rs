use chrono::Utc;
use serde_json::{json, Value};

use crate::common::{id_of, run_app_test, TestClient};

fn with_cookies(client: &TestClient) -> TestClient {
    TestClient {
        client: reqwest::ClientBuilder::new()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Building client"),
        ..client.clone()
    }
}

#[tokio::test]
async fn score_increments() {
    run_app_test(|app| async move {
        let game = app.add_match("basketball", Utc::now()).await?;
        let admin = app.admin_client();

        let response = admin
            .post(&format!("matches/{game}/increase_score/team2/3"))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 303);
        assert_eq!(
            response.headers()["location"].to_str()?,
            "/admin/matches"
        );

        admin
            .get(&format!("matches/{game}/increase_score/team1/1"))
            .send()
            .await?;

        let output = app.get_json(&format!("matches/{game}")).await?;
        assert_eq!(output["score1"], 1);
        assert_eq!(output["score2"], 3);

        let missing = sports_hub_db::object_id::MatchId::new();
        let response = admin
            .post(&format!("matches/{missing}/increase_score/team1/1"))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 404);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn admin_requires_login() {
    run_app_test(|app| async move {
        let game = app.add_match("football", Utc::now()).await?;
        let anonymous = TestClient::new(format!("{}/admin", app.root_url), reqwest::Client::new());

        let response = anonymous
            .post(&format!("matches/{game}/increase_score/team1/1"))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 401);

        let output = app.get_json(&format!("matches/{game}")).await?;
        assert_eq!(output["score1"], 0);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn match_list_offers_sport_specific_buttons() {
    run_app_test(|app| async move {
        let football = app.add_match("football", Utc::now()).await?;
        let basketball = app.add_match("basketball", Utc::now()).await?;

        let page = app.admin_client().get("matches").send().await?.text().await?;
        assert!(page.contains("Arsenal - Chelsea"));
        assert!(page.contains(&format!("/admin/matches/{football}/increase_score/team1/1")));
        assert!(!page.contains(&format!("/admin/matches/{football}/increase_score/team1/3")));
        assert!(page.contains(&format!("/admin/matches/{basketball}/increase_score/team2/3")));
        assert!(page.contains(&format!("/admin/matches/{football}/add_event")));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn match_stat_increments() {
    run_app_test(|app| async move {
        let game = app.add_match("football", Utc::now()).await?;
        let stat = app
            .create(&format!("matches/{game}/stats"), json!({ "name": "Corners" }))
            .await?;
        let stat = id_of(&stat);
        let admin = app.admin_client();

        for _ in 0..2 {
            let response = admin
                .post(&format!("match_stats/{stat}/increase_first"))
                .send()
                .await?;
            assert_eq!(response.status().as_u16(), 303);
        }
        admin
            .post(&format!("match_stats/{stat}/increase_second"))
            .send()
            .await?;

        let output = app.get_json(&format!("matches/{game}")).await?;
        assert_eq!(output["stats"][0]["first"], 2);
        assert_eq!(output["stats"][0]["second"], 1);

        let page = admin.get("match_stats?q=corn").send().await?.text().await?;
        assert!(page.contains("Corners"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn player_stat_increments() {
    run_app_test(|app| async move {
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
        let player = id_of(&player);
        let season = app
            .create(&format!("players/{player}/seasons"), json!({ "season": "2023/24" }))
            .await?;
        let stat = app
            .create(
                &format!("player_seasons/{}/stats", id_of(&season)),
                json!({ "name": "Goals", "value": 4 }),
            )
            .await?;

        let response = app
            .admin_client()
            .post(&format!("player_stats/{}/increase", id_of(&stat)))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 303);

        let output = app.get_json(&format!("players/{player}")).await?;
        assert_eq!(output["stats"][0]["stats"][0]["value"], 5);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn add_event() {
    run_app_test(|app| async move {
        let game = app.add_match("football", Utc::now()).await?;
        let admin = with_cookies(&app.admin_client());

        let form = admin
            .get(&format!("matches/{game}/add_event"))
            .send()
            .await?
            .text()
            .await?;
        assert!(form.contains("Arsenal - Chelsea"));

        let response = admin
            .post(&format!("matches/{game}/add_event"))
            .form(&[("title", ""), ("comment", "kept")])
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200);
        let page = response.text().await?;
        assert!(page.contains("This field is required."));
        assert!(page.contains("kept"));

        let response = admin
            .post(&format!("matches/{game}/add_event"))
            .form(&[("title", "Goal"), ("comment", "Header from a corner")])
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 303);

        let page = admin.get("matches").send().await?.text().await?;
        assert!(page.contains("Event added successfully"));
        let page = admin.get("matches").send().await?.text().await?;
        assert!(!page.contains("Event added successfully"));

        let output: Value = app.get_json(&format!("matches/{game}")).await?;
        assert_eq!(output["events"].as_array().map(Vec::len), Some(1));
        assert_eq!(output["events"][0]["title"], "Goal");
        assert_eq!(output["events"][0]["comment"], "Header from a corner");

        let missing = sports_hub_db::object_id::MatchId::new();
        let response = admin
            .get(&format!("matches/{missing}/add_event"))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 404);
        Ok(())
    })
    .await
}
