//! Organizational role catalog shared by every roster kind.
//!
//! Each role label belongs to exactly one unit. Most roles may be held by a
//! single record at a time; the unit "Anggota" (member) roles allow any
//! number of holders. The exemption list in
//! `db/migrations/20260101000001_create_roster_tables.sql` must match
//! [`MULTI_HOLDER_ROLES`].

use serde::Serialize;

/// A single assignable role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDef {
    /// Exact label stored in the `role` column.
    pub label: &'static str,
    /// Unit the role belongs to.
    #[serde(skip)]
    pub unit: &'static str,
    /// Whether more than one record may hold this role.
    pub multiple_holders: bool,
}

/// An organizational unit and its roles, in display order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrgUnit {
    pub unit: &'static str,
    pub roles: &'static [RoleDef],
}

pub const UNIT_BPH: &str = "BPH";
pub const UNIT_SENI: &str = "Pengembangan Seni & Kreativitas";
pub const UNIT_SDM: &str = "Pengembangan SDM";
pub const UNIT_EKRAF: &str = "Ekonomi Kreatif";
pub const UNIT_MEDIA: &str = "Media Kreativitas & Informasi";

const fn single(unit: &'static str, label: &'static str) -> RoleDef {
    RoleDef {
        label,
        unit,
        multiple_holders: false,
    }
}

const fn multi(unit: &'static str, label: &'static str) -> RoleDef {
    RoleDef {
        label,
        unit,
        multiple_holders: true,
    }
}

const BPH_ROLES: &[RoleDef] = &[
    single(UNIT_BPH, "Ketua"),
    single(UNIT_BPH, "Wakil Ketua"),
    single(UNIT_BPH, "Sekretaris"),
    single(UNIT_BPH, "Wakil Sekretaris"),
    single(UNIT_BPH, "Bendahara"),
];

const SENI_ROLES: &[RoleDef] = &[
    single(UNIT_SENI, "Pengembangan Seni & Kreativitas - Ketua"),
    single(UNIT_SENI, "Pengembangan Seni & Kreativitas - Sekretaris"),
    multi(UNIT_SENI, "Pengembangan Seni & Kreativitas - Anggota"),
];

const SDM_ROLES: &[RoleDef] = &[
    single(UNIT_SDM, "Pengembangan SDM - Ketua"),
    single(UNIT_SDM, "Pengembangan SDM - Sekretaris"),
    multi(UNIT_SDM, "Pengembangan SDM - Anggota"),
];

const EKRAF_ROLES: &[RoleDef] = &[
    single(UNIT_EKRAF, "Ekonomi Kreatif - Ketua"),
    single(UNIT_EKRAF, "Ekonomi Kreatif - Sekretaris"),
    multi(UNIT_EKRAF, "Ekonomi Kreatif - Anggota"),
];

const MEDIA_ROLES: &[RoleDef] = &[
    single(UNIT_MEDIA, "Media Kreativitas & Informasi - Ketua"),
    single(UNIT_MEDIA, "Media Kreativitas & Informasi - Sekretaris"),
    multi(UNIT_MEDIA, "Media Kreativitas & Informasi - Anggota"),
];

/// The full catalog, grouped by unit.
pub const CATALOG: &[OrgUnit] = &[
    OrgUnit {
        unit: UNIT_BPH,
        roles: BPH_ROLES,
    },
    OrgUnit {
        unit: UNIT_SENI,
        roles: SENI_ROLES,
    },
    OrgUnit {
        unit: UNIT_SDM,
        roles: SDM_ROLES,
    },
    OrgUnit {
        unit: UNIT_EKRAF,
        roles: EKRAF_ROLES,
    },
    OrgUnit {
        unit: UNIT_MEDIA,
        roles: MEDIA_ROLES,
    },
];

/// Labels of the roles that accept multiple holders.
pub const MULTI_HOLDER_ROLES: &[&str] = &[
    "Pengembangan Seni & Kreativitas - Anggota",
    "Pengembangan SDM - Anggota",
    "Ekonomi Kreatif - Anggota",
    "Media Kreativitas & Informasi - Anggota",
];

/// Units in display order.
pub fn units() -> &'static [OrgUnit] {
    CATALOG
}

/// Every role in catalog order.
pub fn all() -> impl Iterator<Item = &'static RoleDef> {
    CATALOG.iter().flat_map(|unit| unit.roles.iter())
}

/// Look up a role by its exact label.
pub fn find(label: &str) -> Option<&'static RoleDef> {
    all().find(|role| role.label == label)
}

/// Whether `label` names a role in the catalog.
pub fn is_valid(label: &str) -> bool {
    find(label).is_some()
}

/// Whether `label` may be held by more than one record.
///
/// Unknown labels are treated as single-holder.
pub fn allows_multiple_holders(label: &str) -> bool {
    find(label).is_some_and(|role| role.multiple_holders)
}
