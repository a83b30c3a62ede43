pub mod document_store;
pub mod folder_store;
pub mod member_tags;
pub mod memory_store;
pub mod record_store;

pub use document_store::DocumentStore;
pub use folder_store::FolderStore;
pub use member_tags::MemberTags;
pub use memory_store::MemoryStore;
pub use record_store::PlayerRecordStore;

pub const DATA_FOLDER: &str = ".crprofile";

// Last known good player snapshots, one document per tag
pub const PLAYERS_FOLDER: &str = "players";

// User-defined data
pub const MEMBERS_FILE: &str = "members.json";
pub const SETTINGS_FILE: &str = "settings.json";

// Reference data
pub const ARENAS_FILE: &str = "arenas.json";
