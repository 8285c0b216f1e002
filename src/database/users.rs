use crate::models::user::User;
use crate::schema::users;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use rand::rngs::OsRng;
use scrypt::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use scrypt::Scrypt;

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUser<'a> {
    username: &'a str,
    email: &'a str,
    hash: &'a str,
}

pub enum UserCreationError {
    DuplicatedEmail,
    DuplicatedUsername,
}

impl From<Error> for UserCreationError {
    fn from(err: Error) -> UserCreationError {
        if let Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
            // MySQL reports the violated key by name in the message.
            let message = info.message();
            if message.contains("users_username_key") {
                return UserCreationError::DuplicatedUsername;
            }
            if message.contains("users_email_key") {
                return UserCreationError::DuplicatedEmail;
            }
        }
        panic!("Error creating user: {:?}", err)
    }
}

pub fn create(
    conn: &mut MysqlConnection,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, UserCreationError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(password.as_bytes(), &salt)
        .expect("Error hashing password")
        .to_string();

    let new_user = &NewUser {
        username,
        email,
        hash: &hash,
    };

    diesel::insert_into(users::table)
        .values(new_user)
        .execute(conn)?;

    // MySQL has no RETURNING; read the row back through the unique username.
    users::table
        .filter(users::username.eq(username))
        .get_result::<User>(conn)
        .map_err(Into::into)
}

pub fn login(conn: &mut MysqlConnection, email: &str, password: &str) -> Option<User> {
    let user = users::table
        .filter(users::email.eq(email))
        .get_result::<User>(conn)
        .map_err(|err| eprintln!("users::login: {}", err))
        .ok()?;

    let stored_hash = PasswordHash::new(&user.hash)
        .map_err(|err| eprintln!("users::login: corrupt stored hash: {}", err))
        .ok()?;

    Scrypt
        .verify_password(password.as_bytes(), &stored_hash)
        .map_err(|err| eprintln!("users::login: failed for '{}': {}", email, err))
        .ok()?;

    Some(user)
}

pub fn find(conn: &mut MysqlConnection, id: i32) -> Option<User> {
    users::table
        .find(id)
        .get_result(conn)
        .map_err(|err| eprintln!("users::find: {}", err))
        .ok()
}
