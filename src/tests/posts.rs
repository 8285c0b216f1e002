use super::*;

#[test]
fn create_post_round_trips_fields() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "writer");
    let group = create_group(&client, &user, "writers");
    let group_id = group["id"].as_i64().expect("group id");

    let response = client
        .get(format!("/api/profiles/{}/posts", user.username))
        .dispatch();
    let before = json_body(response)["postsCount"].as_i64().expect("count");

    let response = client
        .post("/api/posts")
        .header(ContentType::JSON)
        .header(auth_header(&user))
        .body(
            json!({
                "post": {
                    "text": "a fine first entry",
                    "group": group_id,
                    "image": "https://pictures.example.com/small.gif",
                }
            })
            .to_string(),
        )
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response);
    assert_eq!(body["post"]["text"], json!("a fine first entry"));
    assert_eq!(body["post"]["author"]["username"], json!(user.username));
    assert_eq!(body["post"]["group"]["id"], json!(group_id));
    assert_eq!(
        body["post"]["image"],
        json!("https://pictures.example.com/small.gif")
    );

    let response = client
        .get(format!("/api/profiles/{}/posts", user.username))
        .dispatch();
    let after = json_body(response)["postsCount"].as_i64().expect("count");
    assert_eq!(after, before + 1);
}

#[test]
fn anonymous_post_create_is_forbidden() {
    let client = client().lock().expect("locked client");
    let response = client
        .post("/api/posts")
        .header(ContentType::JSON)
        .body(json!({ "post": { "text": "drive-by" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);
}

#[test]
fn blank_text_is_rejected() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "mute");
    let response = client
        .post("/api/posts")
        .header(ContentType::JSON)
        .header(auth_header(&user))
        .body(json!({ "post": { "text": "" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::UnprocessableEntity);
}

#[test]
fn unknown_group_is_rejected() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "lost");
    let response = client
        .post("/api/posts")
        .header(ContentType::JSON)
        .header(auth_header(&user))
        .body(json!({ "post": { "text": "where am i", "group": 2_000_000_000 } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body = json_body(response);
    assert_eq!(body["errors"]["group"][0], json!("does not exist"));
}

#[test]
fn author_edit_updates_the_text() {
    let client = client().lock().expect("locked client");
    let author = register(&client, "editor");
    let post = create_post(&client, &author, "first draft", None);
    let id = post["id"].as_i64().expect("post id");

    let response = client
        .put(format!("/api/posts/{}", id))
        .header(ContentType::JSON)
        .header(auth_header(&author))
        .body(json!({ "post": { "text": "second draft" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response)["post"]["text"], json!("second draft"));

    let response = client.get(format!("/api/posts/{}", id)).dispatch();
    assert_eq!(json_body(response)["post"]["text"], json!("second draft"));
}

#[test]
fn non_author_edit_changes_nothing() {
    let client = client().lock().expect("locked client");
    let author = register(&client, "owner");
    let intruder = register(&client, "intruder");
    let post = create_post(&client, &author, "mine alone", None);
    let id = post["id"].as_i64().expect("post id");

    let response = client
        .put(format!("/api/posts/{}", id))
        .header(ContentType::JSON)
        .header(auth_header(&intruder))
        .body(json!({ "post": { "text": "mine now" } }).to_string())
        .dispatch();
    // The intruder lands on the detail, post untouched.
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response)["post"]["text"], json!("mine alone"));

    let response = client.get(format!("/api/posts/{}", id)).dispatch();
    assert_eq!(json_body(response)["post"]["text"], json!("mine alone"));
}

#[test]
fn missing_post_is_not_found() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "seeker");

    let response = client.get("/api/posts/4000000000").dispatch();
    assert_eq!(response.status(), Status::NotFound);

    let response = client
        .put("/api/posts/4000000000")
        .header(ContentType::JSON)
        .header(auth_header(&user))
        .body(json!({ "post": { "text": "anyone home" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn comments_attach_to_their_post() {
    let client = client().lock().expect("locked client");
    let author = register(&client, "host");
    let commenter = register(&client, "guest");
    let post = create_post(&client, &author, "discuss below", None);
    let id = post["id"].as_i64().expect("post id");

    let response = client
        .post(format!("/api/posts/{}/comments", id))
        .header(ContentType::JSON)
        .body(json!({ "comment": { "text": "anonymous take" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);

    let response = client
        .post(format!("/api/posts/{}/comments", id))
        .header(ContentType::JSON)
        .header(auth_header(&commenter))
        .body(json!({ "comment": { "text": "good point" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response);
    assert_eq!(body["comment"]["text"], json!("good point"));
    assert_eq!(
        body["comment"]["author"]["username"],
        json!(commenter.username)
    );

    let response = client.get(format!("/api/posts/{}/comments", id)).dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response);
    let comments = body["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], json!("good point"));
}

#[test]
fn blank_comment_is_rejected() {
    let client = client().lock().expect("locked client");
    let user = register(&client, "quiet");
    let post = create_post(&client, &user, "say something", None);
    let id = post["id"].as_i64().expect("post id");

    let response = client
        .post(format!("/api/posts/{}/comments", id))
        .header(ContentType::JSON)
        .header(auth_header(&user))
        .body(json!({ "comment": { "text": "" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::UnprocessableEntity);
}

#[test]
fn deleting_a_post_takes_its_comments() {
    let client = client().lock().expect("locked client");
    let author = register(&client, "remover");
    let other = register(&client, "bystander");
    let post = create_post(&client, &author, "short lived", None);
    let id = post["id"].as_i64().expect("post id");

    let response = client
        .post(format!("/api/posts/{}/comments", id))
        .header(ContentType::JSON)
        .header(auth_header(&other))
        .body(json!({ "comment": { "text": "was here" } }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    // Not the author: the post stays.
    let response = client
        .delete(format!("/api/posts/{}", id))
        .header(auth_header(&other))
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let response = client.get(format!("/api/posts/{}", id)).dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = client
        .delete(format!("/api/posts/{}", id))
        .header(auth_header(&author))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = client.get(format!("/api/posts/{}", id)).dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let response = client.get(format!("/api/posts/{}/comments", id)).dispatch();
    assert_eq!(response.status(), Status::NotFound);
}
