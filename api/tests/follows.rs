use serde_json::{json, Value};

use crate::common::run_app_test;

#[tokio::test]
async fn follow_and_unfollow_team() {
    run_app_test(|app| async move {
        let league = app.add_league("Premier", "football").await?;
        let team = app.add_team("Arsenal", "football", &league).await?;
        let client = &app.user.client;

        let response = client
            .post("user_teams")
            .json(&json!({ "team": team }))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 201);

        let response = client
            .post("user_teams")
            .json(&json!({ "team": team }))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 409);

        let followed: Value = client.get("user_teams").send().await?.json().await?;
        assert_eq!(followed, json!([{ "team": "Arsenal" }]));

        let other = app.add_user("other").await?;
        let followed: Value = other.client.get("user_teams").send().await?.json().await?;
        assert_eq!(followed, json!([]));

        let response = client.delete(&format!("user_teams/{team}")).send().await?;
        assert_eq!(response.status().as_u16(), 204);
        let response = client.delete(&format!("user_teams/{team}")).send().await?;
        assert_eq!(response.status().as_u16(), 404);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn following_requires_login() {
    run_app_test(|app| async move {
        let response = app.client.get("user_players").send().await?;
        assert_eq!(response.status().as_u16(), 401);
        Ok(())
    })
    .await
}
