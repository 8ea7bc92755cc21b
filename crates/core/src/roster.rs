//! The two roster kinds and their per-kind constants.
//!
//! Aparatur (organizational officers) and Konselor (counselors) share one
//! record shape and one rule set. They differ only in where they are stored
//! and in the wording of their response messages.

use serde::Serialize;

/// Envelope messages returned by the admin and public endpoints.
#[derive(Debug, Clone, Copy)]
pub struct RosterMessages {
    pub admin_list: &'static str,
    pub public_list: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub detail: &'static str,
    pub detail_missing: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
}

const APARATUR_MESSAGES: RosterMessages = RosterMessages {
    admin_list: "List Data Aparaturs",
    public_list: "List Data Aparaturs",
    created: "Data Anggota Berhasil Disimpan!",
    create_failed: "Data Anggota Gagal Disimpan!",
    detail: "Detail Data Anggota!",
    detail_missing: "Detail Data Anggota Tidak Ditemukan!",
    updated: "Data Anggota Berhasil Diupdate!",
    update_failed: "Data Anggota Gagal Diupdate!",
    deleted: "Data Anggota Berhasil Dihapus!",
    delete_failed: "Data Anggota Gagal Dihapus!",
};

const KONSELOR_MESSAGES: RosterMessages = RosterMessages {
    admin_list: "List Data konselor",
    public_list: "List Data Konselors",
    created: "Data Konselor Berhasil Disimpan!",
    create_failed: "Data Konselor Gagal Disimpan!",
    detail: "Detail Data Konselor!",
    detail_missing: "Detail Data Konselor Tidak Ditemukan!",
    updated: "Data Konselor Berhasil Diupdate!",
    update_failed: "Data Konselor Gagal Diupdate!",
    deleted: "Data Konselor Berhasil Dihapus!",
    delete_failed: "Data Konselor Gagal Dihapus!",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterKind {
    Aparatur,
    Konselor,
}

impl RosterKind {
    pub const ALL: [RosterKind; 2] = [RosterKind::Aparatur, RosterKind::Konselor];

    /// Database table holding this roster.
    pub fn table(self) -> &'static str {
        match self {
            RosterKind::Aparatur => "aparaturs",
            RosterKind::Konselor => "konselors",
        }
    }

    /// Directory under the public storage root where photos are kept.
    pub fn storage_dir(self) -> &'static str {
        match self {
            RosterKind::Aparatur => "aparaturs",
            RosterKind::Konselor => "konselor",
        }
    }

    /// Path segment under `/api/admin` and `/api/public`.
    pub fn route_segment(self) -> &'static str {
        match self {
            RosterKind::Aparatur => "aparaturs",
            RosterKind::Konselor => "konselors",
        }
    }

    /// Entity name used in logs and internal errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            RosterKind::Aparatur => "Aparatur",
            RosterKind::Konselor => "Konselor",
        }
    }

    pub fn messages(self) -> &'static RosterMessages {
        match self {
            RosterKind::Aparatur => &APARATUR_MESSAGES,
            RosterKind::Konselor => &KONSELOR_MESSAGES,
        }
    }

    /// Public URL of a stored photo.
    ///
    /// `base_url` is the externally visible origin without a trailing slash.
    pub fn image_url(self, base_url: &str, filename: &str) -> String {
        format!("{base_url}/storage/{}/{filename}", self.storage_dir())
    }
}

impl std::fmt::Display for RosterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.entity_name())
    }
}
