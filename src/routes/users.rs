use crate::auth::Auth;
use crate::config::AppState;
use crate::database::users::UserCreationError;
use crate::database::{self, Db};
use crate::errors::{Errors, FieldValidator};
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize)]
pub struct NewUser {
    user: NewUserData,
}

#[derive(Deserialize, Validate)]
struct NewUserData {
    #[validate(length(min = 1))]
    username: Option<String>,
    #[validate(email)]
    email: Option<String>,
    #[validate(length(min = 8))]
    password: Option<String>,
}

#[post("/users", format = "json", data = "<new_user>")]
pub async fn post_users(
    new_user: Json<NewUser>,
    db: Db,
    state: &State<AppState>,
) -> Result<Value, Errors> {
    let new_user = new_user.into_inner().user;

    let mut extractor = FieldValidator::validate(&new_user);
    let username = extractor.extract("username", new_user.username);
    let email = extractor.extract("email", new_user.email);
    let password = extractor.extract("password", new_user.password);
    extractor.check()?;

    let secret = state.secret.clone();
    db.run(move |conn| {
        database::users::create(conn, &username, &email, &password)
            .map(|user| json!({ "user": user.to_user_auth(&secret) }))
            .map_err(|err| {
                let field = match err {
                    UserCreationError::DuplicatedEmail => "email",
                    UserCreationError::DuplicatedUsername => "username",
                };
                Errors::new(&[(field, "has already been taken")])
            })
    })
    .await
}

#[derive(Deserialize)]
pub struct LoginUser {
    user: LoginUserData,
}

#[derive(Deserialize)]
struct LoginUserData {
    email: Option<String>,
    password: Option<String>,
}

#[post("/users/login", format = "json", data = "<user>")]
pub async fn post_users_login(
    user: Json<LoginUser>,
    db: Db,
    state: &State<AppState>,
) -> Result<Value, Errors> {
    let user = user.into_inner().user;

    let mut extractor = FieldValidator::default();
    let email = extractor.extract("email", user.email);
    let password = extractor.extract("password", user.password);
    extractor.check()?;

    let secret = state.secret.clone();
    db.run(move |conn| {
        database::users::login(conn, &email, &password)
            .map(|user| json!({ "user": user.to_user_auth(&secret) }))
            .ok_or_else(|| Errors::new(&[("email or password", "is invalid")]))
    })
    .await
}

#[get("/user")]
pub async fn get_user(auth: Auth, db: Db, state: &State<AppState>) -> Option<Value> {
    let secret = state.secret.clone();
    db.run(move |conn| database::users::find(conn, auth.id))
        .await
        .map(|user| json!({ "user": user.to_user_auth(&secret) }))
}
