#[macro_use]
extern crate rocket;

#[macro_use]
extern crate diesel;

#[macro_use]
extern crate validator_derive;

use dotenv::dotenv;
use rocket_cors::{AllowedOrigins, Cors, CorsOptions};

mod auth;
mod cache;
mod config;
mod database;
mod errors;
mod models;
mod routes;
mod schema;

#[cfg(test)]
mod tests;

pub fn cors_fairing() -> Cors {
    CorsOptions {
        allowed_origins: AllowedOrigins::all(),
        ..Default::default()
    }
    .to_cors()
    .expect("Cannot create CORS fairing")
}

#[launch]
pub fn rocket() -> _ {
    dotenv().ok();
    rocket::custom(config::from_env())
        .mount(
            "/api",
            routes![
                routes::users::post_users,
                routes::users::post_users_login,
                routes::users::get_user,
                routes::profiles::get_profile,
                routes::profiles::get_profile_posts,
                routes::profiles::follow,
                routes::profiles::unfollow,
                routes::groups::get_groups,
                routes::groups::post_groups,
                routes::groups::get_group_posts,
                routes::groups::delete_group,
                routes::posts::get_posts,
                routes::posts::get_posts_feed,
                routes::posts::get_post,
                routes::posts::post_posts,
                routes::posts::put_post,
                routes::posts::delete_post,
                routes::posts::get_comments,
                routes::posts::post_comment,
            ],
        )
        .attach(database::Db::fairing())
        .attach(cache::PageCache::manage())
        .attach(cors_fairing())
        .attach(config::AppState::manage())
}
