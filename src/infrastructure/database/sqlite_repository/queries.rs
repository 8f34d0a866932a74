pub(super) const INSERT_ACCOUNT: &str = r#"
    INSERT INTO accounts (id, display_name, created_at)
    VALUES (?1, ?2, ?3)
"#;

pub(super) const SELECT_ACCOUNT_BY_ID: &str = r#"
    SELECT id, display_name, created_at
    FROM accounts
    WHERE id = ?1
"#;

pub(super) const UPSERT_EXERCISE: &str = r#"
    INSERT INTO custom_exercises (
        id, account_id, name, category, notes,
        created_at, last_modified, is_synced, should_delete
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        category = excluded.category,
        notes = excluded.notes,
        last_modified = excluded.last_modified,
        is_synced = excluded.is_synced,
        should_delete = excluded.should_delete
"#;

pub(super) const SELECT_EXERCISE_BY_ID: &str = r#"
    SELECT id, account_id, name, category, notes,
           created_at, last_modified, is_synced, should_delete
    FROM custom_exercises
    WHERE account_id = ?1 AND id = ?2
"#;

pub(super) const SELECT_ACTIVE_EXERCISES: &str = r#"
    SELECT id, account_id, name, category, notes,
           created_at, last_modified, is_synced, should_delete
    FROM custom_exercises
    WHERE account_id = ?1 AND should_delete = 0
    ORDER BY name ASC
"#;

pub(super) const SELECT_ALL_EXERCISES: &str = r#"
    SELECT id, account_id, name, category, notes,
           created_at, last_modified, is_synced, should_delete
    FROM custom_exercises
    WHERE account_id = ?1
    ORDER BY created_at ASC
"#;

pub(super) const DELETE_EXERCISE: &str = r#"
    DELETE FROM custom_exercises
    WHERE account_id = ?1 AND id = ?2
"#;

pub(super) const UPSERT_PROGRESS_ENTRY: &str = r#"
    INSERT INTO progress_entries (
        account_id, day, weight, pull_ups, push_ups, squats,
        created_at, last_modified, is_synced, should_delete
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(account_id, day) DO UPDATE SET
        weight = excluded.weight,
        pull_ups = excluded.pull_ups,
        push_ups = excluded.push_ups,
        squats = excluded.squats,
        last_modified = excluded.last_modified,
        is_synced = excluded.is_synced,
        should_delete = excluded.should_delete
"#;

pub(super) const SELECT_PROGRESS_BY_DAY: &str = r#"
    SELECT account_id, day, weight, pull_ups, push_ups, squats,
           created_at, last_modified, is_synced, should_delete
    FROM progress_entries
    WHERE account_id = ?1 AND day = ?2
"#;

pub(super) const SELECT_ACTIVE_PROGRESS: &str = r#"
    SELECT account_id, day, weight, pull_ups, push_ups, squats,
           created_at, last_modified, is_synced, should_delete
    FROM progress_entries
    WHERE account_id = ?1 AND should_delete = 0
    ORDER BY day ASC
"#;

pub(super) const SELECT_ALL_PROGRESS: &str = r#"
    SELECT account_id, day, weight, pull_ups, push_ups, squats,
           created_at, last_modified, is_synced, should_delete
    FROM progress_entries
    WHERE account_id = ?1
    ORDER BY day ASC
"#;

pub(super) const DELETE_PROGRESS_ENTRY: &str = r#"
    DELETE FROM progress_entries
    WHERE account_id = ?1 AND day = ?2
"#;

pub(super) const SELECT_PHOTOS_BY_DAY: &str = r#"
    SELECT slot, state, url, data, replaces_remote
    FROM progress_photos
    WHERE account_id = ?1 AND day = ?2
"#;

pub(super) const SELECT_PHOTOS_BY_ACCOUNT: &str = r#"
    SELECT day, slot, state, url, data, replaces_remote
    FROM progress_photos
    WHERE account_id = ?1
"#;

pub(super) const DELETE_PHOTOS_FOR_DAY: &str = r#"
    DELETE FROM progress_photos
    WHERE account_id = ?1 AND day = ?2
"#;

pub(super) const INSERT_PHOTO: &str = r#"
    INSERT INTO progress_photos (account_id, day, slot, state, url, data, replaces_remote)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub(super) const SELECT_READ_MARKERS: &str = r#"
    SELECT day, confirmed
    FROM read_markers
    WHERE account_id = ?1
"#;

pub(super) const INSERT_PENDING_READ_MARKER: &str = r#"
    INSERT INTO read_markers (account_id, day, confirmed)
    VALUES (?1, ?2, 0)
    ON CONFLICT(account_id, day) DO NOTHING
"#;

pub(super) const INSERT_READ_MARKER: &str = r#"
    INSERT INTO read_markers (account_id, day, confirmed)
    VALUES (?1, ?2, ?3)
"#;

pub(super) const DELETE_READ_MARKERS: &str = r#"
    DELETE FROM read_markers
    WHERE account_id = ?1
"#;
