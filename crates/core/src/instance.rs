//! Instance identity and headers
//!
//! An instance is an entity or a relationship: something with a globally
//! unique identifier, a type, audit information and a property set.
//!
//! ## Type Categories
//!
//! | Category | Persistable as an instance |
//! |----------|----------------------------|
//! | EntityDef | yes |
//! | RelationshipDef | yes |
//! | ClassificationDef | no |
//! | EnumDef | no |
//! | StructDef | no |
//! | PrimitiveDef | no |
//! | CollectionDef | no |
//! | Unknown | no |

use crate::property::PropertyValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Category of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDefCategory {
    /// Entity type
    EntityDef,
    /// Relationship type
    RelationshipDef,
    /// Classification type
    ClassificationDef,
    /// Enum type
    EnumDef,
    /// Struct type
    StructDef,
    /// Primitive type
    PrimitiveDef,
    /// Collection type
    CollectionDef,
    /// Category not known
    Unknown,
}

impl TypeDefCategory {
    /// All categories (for iteration)
    pub const ALL: [TypeDefCategory; 8] = [
        TypeDefCategory::EntityDef,
        TypeDefCategory::RelationshipDef,
        TypeDefCategory::ClassificationDef,
        TypeDefCategory::EnumDef,
        TypeDefCategory::StructDef,
        TypeDefCategory::PrimitiveDef,
        TypeDefCategory::CollectionDef,
        TypeDefCategory::Unknown,
    ];

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            TypeDefCategory::EntityDef => "EntityDef",
            TypeDefCategory::RelationshipDef => "RelationshipDef",
            TypeDefCategory::ClassificationDef => "ClassificationDef",
            TypeDefCategory::EnumDef => "EnumDef",
            TypeDefCategory::StructDef => "StructDef",
            TypeDefCategory::PrimitiveDef => "PrimitiveDef",
            TypeDefCategory::CollectionDef => "CollectionDef",
            TypeDefCategory::Unknown => "Unknown",
        }
    }

    /// Whether instances of this category can be stored as documents
    pub const fn is_instance(&self) -> bool {
        matches!(
            self,
            TypeDefCategory::EntityDef | TypeDefCategory::RelationshipDef
        )
    }
}

impl fmt::Display for TypeDefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of an instance: category plus guid
///
/// The category of a guid never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceIdentity {
    /// Type category
    pub category: TypeDefCategory,
    /// Opaque unique identifier
    pub guid: String,
}

impl InstanceIdentity {
    /// Create an identity
    pub fn new(category: TypeDefCategory, guid: impl Into<String>) -> Self {
        Self {
            category,
            guid: guid.into(),
        }
    }

    /// Entity identity
    pub fn entity(guid: impl Into<String>) -> Self {
        Self::new(TypeDefCategory::EntityDef, guid)
    }

    /// Relationship identity
    pub fn relationship(guid: impl Into<String>) -> Self {
        Self::new(TypeDefCategory::RelationshipDef, guid)
    }

    /// Identity with a fresh UUID v4 guid
    pub fn generate(category: TypeDefCategory) -> Self {
        Self::new(category, Uuid::new_v4().to_string())
    }
}

/// Lifecycle status of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceStatus {
    /// Unknown
    Unknown,
    /// Being drafted
    Draft,
    /// Ready for review
    Prepared,
    /// Under review
    Proposed,
    /// Approved
    Approved,
    /// Rejected
    Rejected,
    /// Approved concept
    ApprovedConcept,
    /// Under development
    UnderDevelopment,
    /// Ready to launch
    DevelopmentComplete,
    /// Approved for deployment
    ApprovedForDeployment,
    /// Standby
    StandBy,
    /// Live
    Active,
    /// Failed
    Failed,
    /// Disabled
    Disabled,
    /// Completed
    Complete,
    /// Deprecated
    Deprecated,
    /// Other
    Other,
    /// Soft-deleted
    Deleted,
}

impl InstanceStatus {
    /// All statuses (for iteration)
    pub const ALL: [InstanceStatus; 18] = [
        InstanceStatus::Unknown,
        InstanceStatus::Draft,
        InstanceStatus::Prepared,
        InstanceStatus::Proposed,
        InstanceStatus::Approved,
        InstanceStatus::Rejected,
        InstanceStatus::ApprovedConcept,
        InstanceStatus::UnderDevelopment,
        InstanceStatus::DevelopmentComplete,
        InstanceStatus::ApprovedForDeployment,
        InstanceStatus::StandBy,
        InstanceStatus::Active,
        InstanceStatus::Failed,
        InstanceStatus::Disabled,
        InstanceStatus::Complete,
        InstanceStatus::Deprecated,
        InstanceStatus::Other,
        InstanceStatus::Deleted,
    ];

    /// Stored identifier
    pub const fn id(&self) -> &'static str {
        match self {
            InstanceStatus::Unknown => "UNKNOWN",
            InstanceStatus::Draft => "DRAFT",
            InstanceStatus::Prepared => "PREPARED",
            InstanceStatus::Proposed => "PROPOSED",
            InstanceStatus::Approved => "APPROVED",
            InstanceStatus::Rejected => "REJECTED",
            InstanceStatus::ApprovedConcept => "APPROVED_CONCEPT",
            InstanceStatus::UnderDevelopment => "UNDER_DEVELOPMENT",
            InstanceStatus::DevelopmentComplete => "DEVELOPMENT_COMPLETE",
            InstanceStatus::ApprovedForDeployment => "APPROVED_FOR_DEPLOYMENT",
            InstanceStatus::StandBy => "STANDBY",
            InstanceStatus::Active => "ACTIVE",
            InstanceStatus::Failed => "FAILED",
            InstanceStatus::Disabled => "DISABLED",
            InstanceStatus::Complete => "COMPLETE",
            InstanceStatus::Deprecated => "DEPRECATED",
            InstanceStatus::Other => "OTHER",
            InstanceStatus::Deleted => "DELETED",
        }
    }

    /// Parse from stored identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// Audit information carried by every instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceAuditHeader {
    /// Metadata collection that owns the instance
    pub metadata_collection_id: Option<String>,
    /// Creator
    pub created_by: Option<String>,
    /// Last updater
    pub updated_by: Option<String>,
    /// Creation time
    pub create_time: Option<DateTime<Utc>>,
    /// Last update time
    pub update_time: Option<DateTime<Utc>>,
    /// Version, incremented on every update
    pub version: u64,
    /// Lifecycle status
    pub status: Option<InstanceStatus>,
}

impl Default for InstanceAuditHeader {
    fn default() -> Self {
        Self {
            metadata_collection_id: None,
            created_by: None,
            updated_by: None,
            create_time: None,
            update_time: None,
            version: 1,
            status: Some(InstanceStatus::Active),
        }
    }
}

/// An instance: identity, header scalars and named properties
///
/// Built once through the `with_*` methods and read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceHeader {
    identity: InstanceIdentity,
    type_name: Option<String>,
    instance_url: Option<String>,
    re_identified_from_guid: Option<String>,
    audit: InstanceAuditHeader,
    properties: BTreeMap<String, PropertyValue>,
}

impl InstanceHeader {
    /// Create an instance with default audit information and no properties
    pub fn new(identity: InstanceIdentity) -> Self {
        Self {
            identity,
            type_name: None,
            instance_url: None,
            re_identified_from_guid: None,
            audit: InstanceAuditHeader::default(),
            properties: BTreeMap::new(),
        }
    }

    /// Set the type name
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the instance URL
    pub fn with_instance_url(mut self, url: impl Into<String>) -> Self {
        self.instance_url = Some(url.into());
        self
    }

    /// Set the guid this instance was re-identified from
    pub fn with_re_identified_from_guid(mut self, guid: impl Into<String>) -> Self {
        self.re_identified_from_guid = Some(guid.into());
        self
    }

    /// Set the audit header
    ///
    /// Create and update times are truncated to millisecond precision, the
    /// precision they are stored with.
    pub fn with_audit(mut self, mut audit: InstanceAuditHeader) -> Self {
        audit.create_time = audit.create_time.map(truncate_to_millis);
        audit.update_time = audit.update_time.map(truncate_to_millis);
        self.audit = audit;
        self
    }

    /// Add a property
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Add every property, replacing any with the same name
    pub fn with_properties(
        mut self,
        properties: impl IntoIterator<Item = (String, PropertyValue)>,
    ) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Category and guid
    pub fn identity(&self) -> &InstanceIdentity {
        &self.identity
    }

    /// Guid of the instance
    pub fn guid(&self) -> &str {
        &self.identity.guid
    }

    /// Name of the instance's type
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Where the instance can be retrieved from
    pub fn instance_url(&self) -> Option<&str> {
        self.instance_url.as_deref()
    }

    /// Guid this instance was re-identified from
    pub fn re_identified_from_guid(&self) -> Option<&str> {
        self.re_identified_from_guid.as_deref()
    }

    /// Audit information
    pub fn audit(&self) -> &InstanceAuditHeader {
        &self.audit
    }

    /// Named properties
    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// One property by name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}
