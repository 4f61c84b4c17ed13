// Symbolic names shared with the recorder: broadcast intents and preference keys

pub mod intents {
    pub const TRACK_WP: &str = "me.guillaumin.android.osmtracker.intent.TRACK_WP";
    pub const START_TRACKING: &str = "me.guillaumin.android.osmtracker.intent.START_TRACKING";
    pub const STOP_TRACKING: &str = "me.guillaumin.android.osmtracker.intent.STOP_TRACKING";
    pub const START_NOTIFY_BACKGROUND: &str = "me.guillaumin.android.osmtracker.intent.START_NOTIFY_BACKGROUND";
    pub const STOP_NOTIFY_BACKGROUND: &str = "me.guillaumin.android.osmtracker.intent.STOP_NOTIFY_BACKGROUND";

    /// Extra carrying a waypoint name.
    pub const KEY_NAME: &str = "name";
    /// Extra carrying a waypoint link.
    pub const KEY_LINK: &str = "link";
}

pub mod preferences {
    pub const KEY_STORAGE_DIR: &str = "logging.storage.dir";
    pub const KEY_VOICEREC_DURATION: &str = "voicerec.duration";

    pub const VAL_STORAGE_DIR: &str = "/osmtracker";
    pub const VAL_VOICEREC_DURATION: &str = "2";
}

pub const NAMES: &[(&str, &str)] = &[
    ("intent.track_wp", intents::TRACK_WP),
    ("intent.start_tracking", intents::START_TRACKING),
    ("intent.stop_tracking", intents::STOP_TRACKING),
    ("intent.start_notify_background", intents::START_NOTIFY_BACKGROUND),
    ("intent.stop_notify_background", intents::STOP_NOTIFY_BACKGROUND),
    ("intent.key_name", intents::KEY_NAME),
    ("intent.key_link", intents::KEY_LINK),
    ("preferences.key_storage_dir", preferences::KEY_STORAGE_DIR),
    ("preferences.key_voicerec_duration", preferences::KEY_VOICEREC_DURATION),
    ("preferences.val_storage_dir", preferences::VAL_STORAGE_DIR),
    ("preferences.val_voicerec_duration", preferences::VAL_VOICEREC_DURATION),
];

pub fn lookup(name: &str) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}
