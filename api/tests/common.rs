use anyhow::Result;
use chrono::{DateTime, Utc};
use diesel::RunQueryDsl;
use futures::Future;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

pub use crate::client::*;

use sports_hub_api::Server;
use sports_hub_db::object_id::UserId;
use sports_hub_db::test::{create_database, TestDatabase};
use sports_hub_db::users::NewUser;
use sports_hub_db::PoolExt;

pub struct TestUser {
    pub user_id: UserId,
    pub username: String,
    pub password: String,
    pub api_key: String,
    pub client: TestClient,
}

pub struct TestApp {
    pub database: TestDatabase,
    pub user: TestUser,
    /// A client without credentials, set to the base url of the API.
    pub client: TestClient,
    /// The server root, for the admin pages that live outside of `/api`.
    pub root_url: String,
}

const TEST_COOKIE_KEY: &str = "QjX+c1Nggom7lrxVTJFxMI7iQ0BRVr1oR9N64orRgdW3pp/SV+lE/1FOwo12UZj9QoBUUuv2rvcO0x+Omq+25Q==";

fn build_client() -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .timeout(std::time::Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Building client")
}

async fn start_app(database: TestDatabase) -> Result<TestApp> {
    let config = sports_hub_api::config::Config {
        database_url: database.url.clone(),
        database_pool_size: 4,
        port: 0, // Bind to random port
        host: "127.0.0.1".to_string(),
        env: "test".to_string(),
        cookie_key: TEST_COOKIE_KEY.to_string(),
        session_cookie_name: "sid".to_string(),
    };
    Lazy::force(&sports_hub_test::TRACING);
    let Server { server, host, port } = sports_hub_api::create_server(config).await?;

    tokio::task::spawn(server);

    let root_url = format!("http://{}:{}", host, port);
    let client = TestClient::new(format!("{root_url}/api"), build_client());

    let mut app = TestApp {
        database,
        user: TestUser {
            user_id: UserId::nil(),
            username: String::new(),
            password: String::new(),
            api_key: String::new(),
            client: client.clone(),
        },
        client,
        root_url,
    };

    app.user = app.add_user("operator").await?;
    Ok(app)
}

pub async fn run_app_test<F, R>(f: F)
where
    F: FnOnce(TestApp) -> R,
    R: Future<Output = Result<(), anyhow::Error>>,
{
    let database = create_database().await.expect("Creating database");
    let app = start_app(database.clone()).await.expect("Starting app");
    f(app).await.unwrap();
    database.drop_db().expect("Cleaning up");
}

impl TestApp {
    /// Create a user directly in the database, along with an API key for it.
    pub async fn add_user(&self, username: &str) -> Result<TestUser> {
        let password = format!("{username}-password");
        let user_id = UserId::new();
        let user = NewUser {
            id: user_id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: sports_hub_auth::password::new_hash(&password)?,
            first_name: String::new(),
            last_name: String::new(),
        };

        let key = self
            .database
            .pool
            .interact(move |conn| {
                diesel::insert_into(sports_hub_db::users::table)
                    .values(&user)
                    .execute(conn)?;

                let key = sports_hub_api::api_key::make_key(conn, user_id, None, None)?;
                Ok::<_, sports_hub_api::Error>(key)
            })
            .await?
            .key;

        Ok(TestUser {
            user_id,
            username: username.to_string(),
            password,
            client: self.client.clone_with_api_key(key.clone()),
            api_key: key,
        })
    }

    /// A client pointed at the admin console, authenticated as the default user.
    pub fn admin_client(&self) -> TestClient {
        TestClient::new(format!("{}/admin", self.root_url), build_client())
            .clone_with_api_key(self.user.api_key.clone())
    }

    pub async fn create(&self, path: &str, body: Value) -> Result<Value> {
        let response = self.user.client.post(path).json(&body).send().await?;
        assert_eq!(
            response.status().as_u16(),
            201,
            "creating {path} with {body}"
        );
        Ok(response.json().await?)
    }

    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self.client.get(path).send().await?;
        assert_eq!(response.status().as_u16(), 200, "fetching {path}");
        Ok(response.json().await?)
    }

    pub async fn add_league(&self, name: &str, category: &str) -> Result<String> {
        let league = self
            .create(
                "leagues",
                json!({ "name": name, "type": category, "start_date": "2023-08-01" }),
            )
            .await?;
        Ok(id_of(&league))
    }

    pub async fn add_team(&self, name: &str, category: &str, league: &str) -> Result<String> {
        let team = self
            .create(
                "teams",
                json!({ "name": name, "type": category, "leagues": [league] }),
            )
            .await?;
        Ok(id_of(&team))
    }

    /// Create a league, two teams and a match between them.
    pub async fn add_match(&self, category: &str, date: DateTime<Utc>) -> Result<String> {
        let league = self.add_league("Premier", category).await?;
        let team1 = self.add_team("Arsenal", category, &league).await?;
        let team2 = self.add_team("Chelsea", category, &league).await?;
        let game = self
            .create(
                "matches",
                json!({
                    "type": category,
                    "team1": team1,
                    "team2": team2,
                    "league": league,
                    "date": date,
                }),
            )
            .await?;
        Ok(id_of(&game))
    }
}

pub fn id_of(value: &Value) -> String {
    value["id"]
        .as_str()
        .unwrap_or_else(|| panic!("no id in {value}"))
        .to_string()
}
