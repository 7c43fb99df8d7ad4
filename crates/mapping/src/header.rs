//! Instance header mapping
//!
//! Maps a whole [`InstanceHeader`] to one [`Document`] and back. The
//! document key is the instance reference (see [`crate::reference`]); header
//! scalars and the audit header are top-level fields, and each property is
//! written under the namespace of the instance category.
//!
//! ## Header Fields
//!
//! | Field | Value |
//! |-------|-------|
//! | `type` | type name (string) |
//! | `instanceURL` | string |
//! | `reIdentifiedFromGUID` | string |
//! | `metadataCollectionId` | string |
//! | `createdBy` / `updatedBy` | string |
//! | `createTime` / `updateTime` | epoch milliseconds (int) |
//! | `version` | int |
//! | `currentStatus` | status id (string) |

use crate::context::MappingContext;
use crate::dispatch;
use crate::reference;
use crate::unmapped::{self, ConsumedFields};
use chrono::{DateTime, Utc};
use metastore_core::document::property_name_from_json_key;
use metastore_core::{
    Document, FieldValue, InstanceAuditHeader, InstanceHeader, InstanceStatus, MappingError,
    MappingResult,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Type name
pub const TYPE_FIELD: &str = "type";
/// Instance URL
pub const INSTANCE_URL_FIELD: &str = "instanceURL";
/// Guid the instance was re-identified from
pub const RE_IDENTIFIED_FIELD: &str = "reIdentifiedFromGUID";
/// Owning metadata collection
pub const METADATA_COLLECTION_FIELD: &str = "metadataCollectionId";
/// Creator
pub const CREATED_BY_FIELD: &str = "createdBy";
/// Last updater
pub const UPDATED_BY_FIELD: &str = "updatedBy";
/// Creation time in epoch milliseconds
pub const CREATE_TIME_FIELD: &str = "createTime";
/// Last update time in epoch milliseconds
pub const UPDATE_TIME_FIELD: &str = "updateTime";
/// Instance version
pub const VERSION_FIELD: &str = "version";
/// Lifecycle status id
pub const STATUS_FIELD: &str = "currentStatus";

/// Top-level fields written by the header mapping itself
pub const HEADER_FIELDS: [&str; 10] = [
    TYPE_FIELD,
    INSTANCE_URL_FIELD,
    RE_IDENTIFIED_FIELD,
    METADATA_COLLECTION_FIELD,
    CREATED_BY_FIELD,
    UPDATED_BY_FIELD,
    CREATE_TIME_FIELD,
    UPDATE_TIME_FIELD,
    VERSION_FIELD,
    STATUS_FIELD,
];

/// Context type named in unmapped-field diagnostics
pub const CONTEXT_TYPE: &str = "InstanceHeader";

const SOURCE: &str = module_path!();

/// Maps instances to documents
#[derive(Debug, Clone, Copy)]
pub struct InstanceMapper<'a> {
    ctx: MappingContext<'a>,
}

impl<'a> InstanceMapper<'a> {
    /// Create a mapper over a context
    pub fn new(ctx: MappingContext<'a>) -> Self {
        Self { ctx }
    }

    /// The mapping context
    pub fn context(&self) -> &MappingContext<'a> {
        &self.ctx
    }

    /// Encode an instance into a document
    ///
    /// `Ok(None)` when the instance category cannot be stored; the reason
    /// has been reported to the sink. Any property error fails the whole
    /// instance.
    pub fn encode(&self, header: &InstanceHeader) -> MappingResult<Option<Document>> {
        let key = match reference::guid_reference(self.ctx.sink(), header.identity()) {
            Some(key) => key,
            None => return Ok(None),
        };
        let namespace = match self.ctx.options().namespace_for(header.identity().category) {
            Some(namespace) => namespace,
            None => return Ok(None),
        };

        let mut doc = Document::new(key);
        put_str(&mut doc, TYPE_FIELD, header.type_name());
        put_str(&mut doc, INSTANCE_URL_FIELD, header.instance_url());
        put_str(&mut doc, RE_IDENTIFIED_FIELD, header.re_identified_from_guid());
        encode_audit(&mut doc, header.audit())?;

        for (name, value) in header.properties() {
            dispatch::add_property_to_document(&self.ctx, &mut doc, namespace, name, value)?;
        }

        debug!(
            key = %doc.key,
            properties = header.properties().len(),
            fields = doc.len(),
            "encoded instance"
        );
        Ok(Some(doc))
    }

    /// Decode a document into an instance
    ///
    /// Fields that neither the header nor any property consumed are reported
    /// as unmapped (when enabled) and otherwise ignored.
    pub fn decode(&self, doc: &Document) -> MappingResult<InstanceHeader> {
        let identity = reference::decode_reference(&doc.key)?;
        let namespace = self
            .ctx
            .options()
            .namespace_for(identity.category)
            .ok_or_else(|| {
                MappingError::invalid_reference(doc.key.as_str(), "not an instance reference")
            })?;

        let mut consumed = ConsumedFields::new();
        for field in HEADER_FIELDS {
            if doc.contains(field) {
                consumed.consume(field);
            }
        }

        let mut properties = BTreeMap::new();
        let names: Vec<String> = doc
            .field_keys()
            .filter_map(|key| property_name_from_json_key(namespace, key))
            .collect();
        for name in names {
            if let Some(value) =
                dispatch::decode_property(&self.ctx, doc, namespace, &name, &mut consumed)?
            {
                properties.insert(name, value);
            }
        }

        let mut header = InstanceHeader::new(identity)
            .with_audit(decode_audit(doc)?)
            .with_properties(properties);
        if let Some(type_name) = get_str(doc, TYPE_FIELD)? {
            header = header.with_type_name(type_name);
        }
        if let Some(url) = get_str(doc, INSTANCE_URL_FIELD)? {
            header = header.with_instance_url(url);
        }
        if let Some(guid) = get_str(doc, RE_IDENTIFIED_FIELD)? {
            header = header.with_re_identified_from_guid(guid);
        }

        if self.ctx.options().report_unmapped {
            let unmapped = unmapped::report_unmapped(
                self.ctx.sink(),
                SOURCE,
                "decode",
                doc,
                &consumed,
                CONTEXT_TYPE,
            );
            if !unmapped.is_empty() {
                debug!(key = %doc.key, unmapped = unmapped.len(), "unmapped fields ignored");
            }
        }

        debug!(key = %doc.key, properties = header.properties().len(), "decoded instance");
        Ok(header)
    }
}

fn encode_audit(doc: &mut Document, audit: &InstanceAuditHeader) -> MappingResult<()> {
    let version = i64::try_from(audit.version).map_err(|_| {
        MappingError::invalid_encoding(
            VERSION_FIELD,
            format!("version {} exceeds the stored int range", audit.version),
        )
    })?;
    put_str(doc, METADATA_COLLECTION_FIELD, audit.metadata_collection_id.as_deref());
    put_str(doc, CREATED_BY_FIELD, audit.created_by.as_deref());
    put_str(doc, UPDATED_BY_FIELD, audit.updated_by.as_deref());
    doc.put_opt(
        CREATE_TIME_FIELD,
        audit.create_time.map(|t| FieldValue::Int(t.timestamp_millis())),
    );
    doc.put_opt(
        UPDATE_TIME_FIELD,
        audit.update_time.map(|t| FieldValue::Int(t.timestamp_millis())),
    );
    doc.put(VERSION_FIELD, FieldValue::Int(version));
    doc.put_opt(
        STATUS_FIELD,
        audit.status.map(|s| FieldValue::String(s.id().to_string())),
    );
    Ok(())
}

fn decode_audit(doc: &Document) -> MappingResult<InstanceAuditHeader> {
    let version = match doc.get(VERSION_FIELD) {
        None => InstanceAuditHeader::default().version,
        Some(FieldValue::Int(v)) if *v >= 0 => *v as u64,
        Some(other) => return Err(bad_field(VERSION_FIELD, "non-negative int", other)),
    };
    let status = match get_str(doc, STATUS_FIELD)? {
        None => None,
        Some(id) => Some(InstanceStatus::from_id(&id).ok_or_else(|| {
            MappingError::invalid_encoding(STATUS_FIELD, format!("unknown status '{}'", id))
        })?),
    };
    Ok(InstanceAuditHeader {
        metadata_collection_id: get_str(doc, METADATA_COLLECTION_FIELD)?,
        created_by: get_str(doc, CREATED_BY_FIELD)?,
        updated_by: get_str(doc, UPDATED_BY_FIELD)?,
        create_time: get_time(doc, CREATE_TIME_FIELD)?,
        update_time: get_time(doc, UPDATE_TIME_FIELD)?,
        version,
        status,
    })
}

fn put_str(doc: &mut Document, field: &str, value: Option<&str>) {
    doc.put_opt(field, value.map(FieldValue::from));
}

fn get_str(doc: &Document, field: &str) -> MappingResult<Option<String>> {
    match doc.get(field) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(bad_field(field, "string", other)),
    }
}

fn get_time(doc: &Document, field: &str) -> MappingResult<Option<DateTime<Utc>>> {
    match doc.get(field) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::Int(ms)) => DateTime::from_timestamp_millis(*ms)
            .map(Some)
            .ok_or_else(|| MappingError::invalid_encoding(field, "timestamp out of range")),
        Some(other) => Err(bad_field(field, "epoch milliseconds", other)),
    }
}

fn bad_field(field: &str, expected: &str, found: &FieldValue) -> MappingError {
    MappingError::invalid_encoding(
        field,
        format!("expected {}, found {}", expected, found.type_name()),
    )
}
