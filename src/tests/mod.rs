use crate::cache::PageCache;
use once_cell::sync::OnceCell;
use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::{Client, LocalResponse};
use serde_json::{json, Value};
use std::sync::Mutex;

mod posts;
mod users;

/// One Rocket instance for the whole suite. The blocking client is a
/// single session, so each test holds the lock for its full run.
pub fn client() -> &'static Mutex<Client> {
    static CLIENT: OnceCell<Mutex<Client>> = OnceCell::new();
    CLIENT.get_or_init(|| {
        let client = Client::tracked(crate::rocket()).expect("valid rocket instance");
        Mutex::new(client)
    })
}

pub struct TestUser {
    pub username: String,
    pub token: String,
}

/// Usernames get a random suffix so reruns against a kept database
/// don't trip the unique constraints.
pub fn suffixed(prefix: &str) -> String {
    format!("{}_{}", prefix, rand::random::<u32>())
}

pub fn register(client: &Client, prefix: &str) -> TestUser {
    let username = suffixed(prefix);
    let email = format!("{}@example.com", username);
    let response = client
        .post("/api/users")
        .header(ContentType::JSON)
        .body(
            json!({
                "user": {
                    "username": username,
                    "email": email,
                    "password": "correct horse",
                }
            })
            .to_string(),
        )
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response);
    let token = body["user"]["token"].as_str().expect("token").to_string();
    TestUser { username, token }
}

pub fn auth_header(user: &TestUser) -> Header<'static> {
    Header::new("authorization", format!("Token {}", user.token))
}

pub fn json_body(response: LocalResponse<'_>) -> Value {
    let body = response.into_string().expect("response body");
    serde_json::from_str(&body).expect("valid json body")
}

pub fn create_post(client: &Client, user: &TestUser, text: &str, group: Option<i64>) -> Value {
    let response = client
        .post("/api/posts")
        .header(ContentType::JSON)
        .header(auth_header(user))
        .body(json!({ "post": { "text": text, "group": group } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    json_body(response)["post"].clone()
}

pub fn create_group(client: &Client, user: &TestUser, prefix: &str) -> Value {
    let slug = suffixed(prefix).replace('_', "-");
    let response = client
        .post("/api/groups")
        .header(ContentType::JSON)
        .header(auth_header(user))
        .body(
            json!({
                "group": {
                    "title": format!("{} corner", prefix),
                    "slug": slug,
                    "description": "a place to talk",
                }
            })
            .to_string(),
        )
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    json_body(response)["group"].clone()
}

pub fn clear_page_cache(client: &Client) {
    client
        .rocket()
        .state::<PageCache>()
        .expect("managed page cache")
        .invalidate();
}
