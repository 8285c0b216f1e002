use super::*;

#[test]
fn register_then_fetch_current_user() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "reg");

    let response = client
        .get("/api/user")
        .header(auth_header(&user))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response);
    assert_eq!(body["user"]["username"], json!(user.username));
    assert!(body["user"]["token"].is_string());
    assert!(body["user"].get("hash").is_none());
}

#[test]
fn login_round_trips_credentials() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "login");
    let email = format!("{}@example.com", user.username);

    let response = client
        .post("/api/users/login")
        .header(ContentType::JSON)
        .body(json!({ "user": { "email": email, "password": "correct horse" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response);
    assert_eq!(body["user"]["username"], json!(user.username));

    let email = format!("{}@example.com", user.username);
    let response = client
        .post("/api/users/login")
        .header(ContentType::JSON)
        .body(json!({ "user": { "email": email, "password": "wrong horse" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::UnprocessableEntity);
}

#[test]
fn duplicate_username_is_rejected() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "dup");

    let response = client
        .post("/api/users")
        .header(ContentType::JSON)
        .body(
            json!({
                "user": {
                    "username": user.username,
                    "email": format!("second-{}@example.com", user.username),
                    "password": "correct horse",
                }
            })
            .to_string(),
        )
        .dispatch();
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body = json_body(response);
    assert_eq!(body["errors"]["username"][0], json!("has already been taken"));
}

#[test]
fn registration_validates_fields() {
    let client = client().lock().expect("locked client");
    let response = client
        .post("/api/users")
        .header(ContentType::JSON)
        .body(json!({ "user": { "email": "not-an-email", "password": "short" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body = json_body(response);
    assert_eq!(body["errors"]["username"][0], json!("can't be blank"));
}

#[test]
fn anonymous_current_user_is_forbidden() {
    let client = client().lock().expect("locked client");
    let response = client.get("/api/user").dispatch();
    assert_eq!(response.status(), Status::Forbidden);
}
