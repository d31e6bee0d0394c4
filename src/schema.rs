diesel::table! {
    ads_songs (id) {
        id -> BigInt,
        title -> Text,
        artist -> Nullable<Text>,
        duration -> Nullable<Integer>,
        url -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}
