table! {
    comments (id) {
        id -> Int4,
        text -> Text,
        post -> Int8,
        author -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    follows (follower, followed) {
        follower -> Int4,
        followed -> Int4,
    }
}

table! {
    groups (id) {
        id -> Int4,
        title -> Text,
        slug -> Text,
        description -> Text,
    }
}

table! {
    posts (id) {
        id -> Int8,
        text -> Text,
        author -> Int4,
        group_id -> Nullable<Int4>,
        image -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Text,
        email -> Text,
        bio -> Nullable<Text>,
        image -> Nullable<Text>,
        hash -> Text,
    }
}

joinable!(comments -> posts (post));
joinable!(comments -> users (author));
joinable!(posts -> groups (group_id));
joinable!(posts -> users (author));

allow_tables_to_appear_in_same_query!(comments, follows, groups, posts, users,);
